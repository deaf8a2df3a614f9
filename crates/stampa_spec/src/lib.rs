//! Format-directive model and parser for the printf template grammar.
//!
//! This crate is the standalone leaf of the stampa workspace: it knows the
//! `%[pos$][flags][width][.precision][length]type` grammar and nothing about
//! arguments or output. The split mirrors a raw-lexer / driver layering:
//!
//! - **`stampa_spec`** (this crate): turns template bytes into
//!   [`FormatSpecifier`] values and classifies errors and warnings.
//! - **`stampa`**: walks templates, retrieves arguments, and renders.
//!
//! # Usage
//!
//! ```
//! use stampa_spec::{parse_directive, Conv};
//!
//! let parsed = parse_directive(b"%-08.3d", 0).unwrap();
//! assert_eq!(parsed.spec.conv, Conv::Decimal);
//! assert_eq!(parsed.spec.width, 8);
//! assert_eq!(parsed.spec.precision, 3);
//! assert_eq!(parsed.spec.len, 7);
//! ```
//!
//! # Stability
//!
//! - `Conv` / `Length` enums: variants are fixed by the C99 grammar
//! - `FormatSpecifier` fields are stable
//! - `ParseError` / `Warning`: kinds may be refined

mod cursor;
mod diag;
mod parse;
mod spec;
mod validate;

pub use cursor::Cursor;
pub use diag::{ParseError, Warning};
pub use parse::{parse_directive, Parsed};
pub use spec::{Conv, FormatSpecifier, Length, SpecFlags, NEXT_ARG, PRECISION_UNSPECIFIED};
pub use validate::{check_length_conv, normalize};
