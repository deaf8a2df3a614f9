//! Retrieval and planning failures.

use std::fmt;

use stampa_spec::ParseError;

use crate::arg::ArgClass;

/// Argument-retrieval failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgError {
    /// The source ran out before the template did.
    Missing,
    /// The supplied argument's class does not match the declared one.
    Mismatch {
        /// What the directive declared.
        expected: ArgClass,
        /// What the source handed over.
        found: ArgClass,
    },
}

impl fmt::Display for ArgError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgError::Missing => write!(f, "argument list exhausted"),
            ArgError::Mismatch { expected, found } => {
                write!(f, "expected a {expected} argument, found a {found}")
            }
        }
    }
}

impl std::error::Error for ArgError {}

/// Failures of the positional pre-scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlanError {
    /// A directive with no `m$` position inside a positional template.
    MixedMode {
        /// Byte offset of the offending directive.
        at: usize,
    },
    /// Positions skip `position`: every index up to the maximum must be
    /// referenced.
    UnassignedSlot {
        /// The 1-based hole.
        position: u32,
    },
    /// One position declared with two different (class, length) shapes.
    Conflict {
        /// The 1-based doubly-declared index.
        position: u32,
    },
    /// A directive failed to parse or failed the legality table.
    Parse {
        /// Byte offset of the directive.
        at: usize,
        /// The underlying diagnostic.
        err: ParseError,
    },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanError::MixedMode { at } => {
                write!(f, "directive at byte {at} has no `$` position")
            }
            PlanError::UnassignedSlot { position } => {
                write!(f, "positional argument {position} is never referenced")
            }
            PlanError::Conflict { position } => {
                write!(f, "positional argument {position} declared with conflicting types")
            }
            PlanError::Parse { at, err } => write!(f, "bad directive at byte {at}: {err}"),
        }
    }
}

impl std::error::Error for PlanError {}
