//! Sink-level failures.

use std::collections::TryReserveError;

/// Any of these aborts the formatting call that hit it.
#[derive(Debug, thiserror::Error)]
pub enum SinkError {
    /// The destination rejected a write.
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
    /// A single-byte fd write consumed zero bytes.
    #[error("file descriptor write made no progress")]
    ShortWrite,
    /// Growing the allocated buffer failed.
    #[error("buffer allocation failed: {0}")]
    Alloc(#[from] TryReserveError),
}
