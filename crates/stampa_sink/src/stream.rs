//! Sink over any byte stream.

use std::io::Write;

use crate::{Sink, SinkError};

/// Forwards each byte to an [`io::Write`](std::io::Write) stream.
///
/// Errors from the stream propagate and abort the call; nothing is
/// buffered here, so the stream's own buffering (or lack of it) decides
/// the syscall pattern.
pub struct StreamSink<W: Write> {
    stream: W,
    written: u64,
}

impl<W: Write> StreamSink<W> {
    /// Wrap a stream.
    pub fn new(stream: W) -> Self {
        StreamSink { stream, written: 0 }
    }

    /// Hand the stream back.
    pub fn into_inner(self) -> W {
        self.stream
    }
}

impl<W: Write> Sink for StreamSink<W> {
    fn put(&mut self, byte: u8) -> Result<(), SinkError> {
        self.stream.write_all(&[byte])?;
        self.written += 1;
        Ok(())
    }

    fn written(&self) -> u64 {
        self.written
    }
}
