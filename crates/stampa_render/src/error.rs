//! Rendering failures.

use stampa_sink::SinkError;

/// A renderer either could not emit or had nowhere to write a count.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The sink failed underneath the renderer.
    #[error(transparent)]
    Sink(#[from] SinkError),
    /// `%n` with no target to store into.
    #[error("count writeback target is null")]
    NullCountTarget,
}
