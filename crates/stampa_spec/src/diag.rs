//! Parse diagnostics: fatal errors and normalisation warnings.
//!
//! Errors abort the whole formatting call. Warnings never surface through
//! the public entry points; the normaliser applies them silently and they
//! are visible only to tests and the template audit helper.

use std::fmt;

use crate::spec::{Conv, Length};

/// Fatal directive errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// `*` width inside a positional directive without its `m$` index.
    MissingPositionalWidth,
    /// `.*` precision inside a positional directive without its `m$` index.
    MissingPositionalPrecision,
    /// The type stage saw a byte outside the conversion set.
    UnknownConv {
        /// The offending byte, `0x00` at end of template.
        byte: u8,
    },
    /// A length modifier the conversion does not accept (`%Ld`, `%hs`, …).
    IncompatibleLength {
        /// The declared modifier.
        length: Length,
        /// The conversion it was attached to.
        conv: Conv,
    },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::MissingPositionalWidth => {
                write!(f, "`*` width requires a `$`-numbered argument here")
            }
            ParseError::MissingPositionalPrecision => {
                write!(f, "`.*` precision requires a `$`-numbered argument here")
            }
            ParseError::UnknownConv { byte: 0 } => {
                write!(f, "template ended inside a directive")
            }
            ParseError::UnknownConv { byte } => {
                write!(f, "unknown conversion `{}`", char::from(*byte))
            }
            ParseError::IncompatibleLength { length, conv } => {
                write!(f, "length `{length}` cannot qualify `%{conv}`")
            }
        }
    }
}

impl std::error::Error for ParseError {}

/// Normalisation categories.
///
/// Each records why a field was silently dropped or rewritten; rendering
/// proceeds with the normalised specifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Warning {
    /// A flag with no effect for this conversion was dropped.
    IneffectiveFlag,
    /// The same flag appeared more than once.
    RepeatedFlag,
    /// A field width that cannot affect output was dropped.
    IneffectiveWidth,
    /// A precision that cannot affect output was dropped.
    IneffectivePrecision,
    /// The directive emits nothing at all.
    NoOutput,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::IneffectiveFlag => write!(f, "flag has no effect for this conversion"),
            Warning::RepeatedFlag => write!(f, "flag repeated"),
            Warning::IneffectiveWidth => write!(f, "width has no effect for this conversion"),
            Warning::IneffectivePrecision => {
                write!(f, "precision has no effect for this conversion")
            }
            Warning::NoOutput => write!(f, "directive produces no output"),
        }
    }
}
