//! Sink over a caller-supplied buffer with a character cap.

use crate::{Sink, SinkError};

/// Stores bytes into a caller buffer, capped.
///
/// The final capped slot is reserved for the terminator written by
/// [`finish`](BufferSink::finish): stores happen only while the write
/// offset stays below `cap - 1`. With a cap of 0 nothing is ever stored.
/// Suppressed writes still advance the count, so the caller learns the
/// length the output *would* have had.
///
/// # Invariant
///
/// The cap never exceeds the buffer length, so stores cannot overrun.
pub struct BufferSink<'buf> {
    buf: &'buf mut [u8],
    cap: usize,
    at: usize,
    written: u64,
}

impl<'buf> BufferSink<'buf> {
    /// Wrap `buf` with a character cap. A cap beyond `buf.len()` is
    /// clamped to it.
    pub fn new(buf: &'buf mut [u8], cap: usize) -> Self {
        let cap = cap.min(buf.len());
        BufferSink {
            buf,
            cap,
            at: 0,
            written: 0,
        }
    }

    /// Terminate the stored bytes and return how many were stored.
    ///
    /// With a nonzero cap, the byte after the stored content — index
    /// `min(count, cap - 1)` — becomes `0x00`.
    pub fn finish(self) -> usize {
        if self.cap > 0 {
            self.buf[self.at] = 0;
        }
        self.at
    }
}

impl Sink for BufferSink<'_> {
    fn put(&mut self, byte: u8) -> Result<(), SinkError> {
        self.written += 1;
        if self.at + 1 < self.cap {
            self.buf[self.at] = byte;
            self.at += 1;
        }
        Ok(())
    }

    fn written(&self) -> u64 {
        self.written
    }
}
