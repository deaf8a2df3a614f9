//! Renderers: from a normalised specifier and a value to sink bytes.
//!
//! Every function here expects its [`FormatSpecifier`](stampa_spec::FormatSpecifier)
//! to be fully resolved and normalised — `*` operands folded into
//! `width`/`precision` and pass B of the validator already applied. The
//! driver guarantees both before dispatching.

mod count;
mod error;
mod number;
mod pointer;
mod text;

pub use count::count;
pub use error::RenderError;
pub use number::{signed, unsigned};
pub use pointer::pointer;
pub use text::{chr, string};
