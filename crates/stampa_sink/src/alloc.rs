//! Sink that owns a growable buffer.

use crate::{Sink, SinkError};

/// Capacity granted by the first grow.
const FIRST_ALLOC: usize = 32;

/// Collects output into an owned buffer, doubling capacity on demand.
///
/// Growth goes through `try_reserve_exact`, so an exhausted allocator
/// surfaces as [`SinkError::Alloc`] instead of aborting the process; the
/// partially-built buffer is dropped by the caller's error path.
#[derive(Default)]
pub struct AllocSink {
    buf: Vec<u8>,
    written: u64,
}

impl AllocSink {
    /// Empty sink; the first byte triggers the first allocation.
    pub fn new() -> Self {
        AllocSink::default()
    }

    /// Terminate the buffer and transfer it to the caller.
    ///
    /// Guarantees capacity for the terminator, so the returned buffer is
    /// always NUL-terminated.
    pub fn finish(mut self) -> Result<OwnedBuf, SinkError> {
        self.reserve_one()?;
        self.buf.push(0);
        Ok(OwnedBuf { bytes: self.buf })
    }

    /// Double the capacity if the next push would not fit.
    fn reserve_one(&mut self) -> Result<(), SinkError> {
        if self.buf.len() == self.buf.capacity() {
            let grow = self.buf.capacity().max(FIRST_ALLOC);
            self.buf.try_reserve_exact(grow)?;
        }
        Ok(())
    }
}

impl Sink for AllocSink {
    fn put(&mut self, byte: u8) -> Result<(), SinkError> {
        self.reserve_one()?;
        self.buf.push(byte);
        self.written += 1;
        Ok(())
    }

    fn written(&self) -> u64 {
        self.written
    }
}

/// Heap buffer produced by the allocated-string entry points.
///
/// Always NUL-terminated. Unlike [`std::ffi::CString`], interior NUL
/// bytes are legal — `%c` with value 0 embeds one — so this type keeps
/// the terminator by construction instead of by scanning.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OwnedBuf {
    /// Invariant: non-empty, last byte is `0x00`.
    bytes: Vec<u8>,
}

impl OwnedBuf {
    /// The formatted content, terminator excluded.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes[..self.bytes.len() - 1]
    }

    /// The formatted content plus the trailing NUL.
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        &self.bytes
    }

    /// Length of the formatted content.
    pub fn len(&self) -> usize {
        self.bytes.len() - 1
    }

    /// True when nothing was formatted.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
