//! Sink over a raw file descriptor.

use std::os::fd::BorrowedFd;

use nix::unistd;

use crate::{Sink, SinkError};

/// Issues one `write(2)` per byte on a borrowed descriptor.
///
/// A syscall error or a zero-length write is a failure. `EINTR` is not
/// retried: an interrupted write aborts the call.
pub struct FdSink<'fd> {
    fd: BorrowedFd<'fd>,
    written: u64,
}

impl<'fd> FdSink<'fd> {
    /// Wrap a descriptor. The caller keeps ownership.
    pub fn new(fd: BorrowedFd<'fd>) -> Self {
        FdSink { fd, written: 0 }
    }
}

impl Sink for FdSink<'_> {
    fn put(&mut self, byte: u8) -> Result<(), SinkError> {
        let stored = unistd::write(self.fd, &[byte])
            .map_err(|errno| SinkError::Io(std::io::Error::from_raw_os_error(errno as i32)))?;
        if stored != 1 {
            return Err(SinkError::ShortWrite);
        }
        self.written += 1;
        Ok(())
    }

    fn written(&self) -> u64 {
        self.written
    }
}
