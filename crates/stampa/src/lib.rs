//! C99/POSIX `printf`-family formatted output.
//!
//! A format template plus a heterogeneous argument sequence in, a
//! formatted character stream out — to a byte stream, a raw file
//! descriptor, a caller buffer (optionally capped), or a freshly
//! allocated buffer whose ownership transfers to the caller.
//!
//! The template grammar is `%[pos$][flags][width][.precision][length]type`,
//! with POSIX numbered positions: a call is either all-positional or
//! all-sequential, decided by its first directive. Positional calls
//! pre-scan the whole template and capture every argument in declaration
//! order before rendering starts, because a variadic source only moves
//! forward.
//!
//! # Example
//!
//! ```
//! use stampa::{snprintf, Arg};
//!
//! let mut buf = [0u8; 32];
//! let n = snprintf(&mut buf, 32, b"%2$s %1$s!", &[Arg::str("world"), Arg::str("hello")]);
//! assert_eq!(n, 12);
//! assert_eq!(&buf[..12], b"hello world!");
//! ```
//!
//! The C-shaped entries return `-1` on any failure; [`vformat`] returns
//! the real [`Error`]. Floating-point conversions and wide `%lc`/`%ls`
//! parse and validate but fail cleanly as [`Error::Unsupported`].

mod api;
mod audit;
mod driver;
mod error;

pub use api::{
    asprintf, dprintf, fprintf, printf, snprintf, sprintf, vasprintf, vdprintf, vformat,
    vfprintf, vprintf, vsnprintf, vsprintf,
};
pub use audit::{audit, AuditKind, AuditNote};
pub use error::Error;

// The argument and sink vocabulary callers need to drive the entries.
pub use stampa_args::{Arg, ArgClass, ArgError, ArgSource, SliceArgs};
pub use stampa_sink::{AllocSink, BufferSink, FdSink, OwnedBuf, Sink, SinkError, StreamSink};
pub use stampa_spec::{Conv, FormatSpecifier, Length, ParseError, SpecFlags, Warning};
