//! The composite formatting error.

use stampa_args::{ArgError, PlanError};
use stampa_render::RenderError;
use stampa_sink::SinkError;
use stampa_spec::{Conv, ParseError};

/// Any failure of a formatting call.
///
/// The C-shaped entry points collapse every variant to `-1`; [`Error`]
/// itself is what [`vformat`](crate::vformat) callers see.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A directive failed to parse or failed the legality table.
    #[error("bad directive at byte {at}: {err}")]
    Parse {
        /// Byte offset of the directive's `%`.
        at: usize,
        /// The underlying diagnostic.
        err: ParseError,
    },
    /// A recognised conversion with no implementation: the floats and
    /// the wide `%lc` / `%ls`.
    #[error("conversion `%{0}` is not implemented")]
    Unsupported(Conv),
    /// Some directives carry `m$` positions and some do not.
    #[error("positional and sequential directives mixed at byte {at}")]
    MixedPositional {
        /// Byte offset of the first offender.
        at: usize,
    },
    /// Positional indices leave a hole below the maximum.
    #[error("positional argument {position} is never referenced")]
    PositionGap {
        /// The 1-based unreferenced index.
        position: u32,
    },
    /// One position declared with two different (class, length) shapes.
    #[error("positional argument {position} declared with conflicting types")]
    PositionConflict {
        /// The 1-based doubly-declared index.
        position: u32,
    },
    /// Argument retrieval failed.
    #[error(transparent)]
    Arg(#[from] ArgError),
    /// `%n` with no target.
    #[error("count writeback target is null")]
    NullCountTarget,
    /// The sink failed: stream or fd write error, or allocation failure.
    #[error(transparent)]
    Sink(#[from] SinkError),
}

impl From<PlanError> for Error {
    fn from(err: PlanError) -> Self {
        match err {
            PlanError::MixedMode { at } => Error::MixedPositional { at },
            PlanError::UnassignedSlot { position } => Error::PositionGap { position },
            PlanError::Conflict { position } => Error::PositionConflict { position },
            PlanError::Parse { at, err } => Error::Parse { at, err },
        }
    }
}

impl From<RenderError> for Error {
    fn from(err: RenderError) -> Self {
        match err {
            RenderError::Sink(err) => Error::Sink(err),
            RenderError::NullCountTarget => Error::NullCountTarget,
        }
    }
}
