//! The thirteen public entry points.
//!
//! Twelve C-shaped wrappers — direct (`&[Arg]`) and handle-taking
//! (`&mut dyn ArgSource`) forms over each of the six destinations — plus
//! [`vformat`], the generic core every wrapper goes through.
//!
//! The C-shaped entries return the character count as `i32`, or `-1` on
//! any failure (template error, argument error, allocation failure, sink
//! failure, or a count beyond `i32::MAX`).

use std::io::{self, Write};
use std::os::fd::BorrowedFd;

use tracing::debug;

use stampa_args::{Arg, ArgSource, SliceArgs};
use stampa_sink::{AllocSink, BufferSink, FdSink, OwnedBuf, Sink, StreamSink};

use crate::driver;
use crate::error::Error;

/// Format into any [`Sink`]. The one non-C-shaped entry: the full count
/// and the real error come back instead of `-1`.
pub fn vformat<'a, S: Sink>(
    sink: &mut S,
    template: &[u8],
    args: &mut dyn ArgSource<'a>,
) -> Result<u64, Error> {
    driver::run(sink, template, args)
}

/// Collapse a driver result to the C return convention.
fn c_ret(result: Result<u64, Error>) -> i32 {
    match result {
        Ok(count) => i32::try_from(count).unwrap_or(-1),
        Err(err) => {
            debug!(error = %err, "formatting call failed");
            -1
        }
    }
}

/// `printf`: format to the default output stream.
pub fn printf(template: &[u8], args: &[Arg<'_>]) -> i32 {
    vprintf(template, &mut SliceArgs::new(args))
}

/// `vprintf`: [`printf`] over a pre-captured argument handle.
pub fn vprintf<'a>(template: &[u8], args: &mut dyn ArgSource<'a>) -> i32 {
    let stdout = io::stdout();
    let mut sink = StreamSink::new(stdout.lock());
    c_ret(vformat(&mut sink, template, args))
}

/// `fprintf`: format to a named byte stream.
pub fn fprintf<W: Write>(stream: &mut W, template: &[u8], args: &[Arg<'_>]) -> i32 {
    vfprintf(stream, template, &mut SliceArgs::new(args))
}

/// `vfprintf`: [`fprintf`] over a pre-captured argument handle.
pub fn vfprintf<'a, W: Write>(
    stream: &mut W,
    template: &[u8],
    args: &mut dyn ArgSource<'a>,
) -> i32 {
    let mut sink = StreamSink::new(stream);
    c_ret(vformat(&mut sink, template, args))
}

/// `sprintf`: format into a caller buffer, terminated.
///
/// Safe Rust cannot overrun, so the cap is the buffer length; where C
/// would scribble past the end, this truncates like `snprintf`.
pub fn sprintf(buf: &mut [u8], template: &[u8], args: &[Arg<'_>]) -> i32 {
    vsprintf(buf, template, &mut SliceArgs::new(args))
}

/// `vsprintf`: [`sprintf`] over a pre-captured argument handle.
pub fn vsprintf<'a>(buf: &mut [u8], template: &[u8], args: &mut dyn ArgSource<'a>) -> i32 {
    let cap = buf.len();
    vsnprintf(buf, cap, template, args)
}

/// `snprintf`: format into a caller buffer with a character cap.
///
/// At most `cap - 1` bytes are stored, then a terminator; the return
/// value is the length the output *would* have had, so
/// `ret >= cap as i32` means truncation.
pub fn snprintf(buf: &mut [u8], cap: usize, template: &[u8], args: &[Arg<'_>]) -> i32 {
    vsnprintf(buf, cap, template, &mut SliceArgs::new(args))
}

/// `vsnprintf`: [`snprintf`] over a pre-captured argument handle.
pub fn vsnprintf<'a>(
    buf: &mut [u8],
    cap: usize,
    template: &[u8],
    args: &mut dyn ArgSource<'a>,
) -> i32 {
    let mut sink = BufferSink::new(buf, cap);
    match vformat(&mut sink, template, args) {
        Ok(count) => {
            sink.finish();
            i32::try_from(count).unwrap_or(-1)
        }
        Err(err) => {
            debug!(error = %err, "formatting call failed");
            -1
        }
    }
}

/// `asprintf`: format into a freshly-allocated buffer.
///
/// On success `out` receives the NUL-terminated buffer and the count is
/// returned; on any failure `out` is `None` and the return is `-1`.
pub fn asprintf(out: &mut Option<OwnedBuf>, template: &[u8], args: &[Arg<'_>]) -> i32 {
    vasprintf(out, template, &mut SliceArgs::new(args))
}

/// `vasprintf`: [`asprintf`] over a pre-captured argument handle.
pub fn vasprintf<'a>(
    out: &mut Option<OwnedBuf>,
    template: &[u8],
    args: &mut dyn ArgSource<'a>,
) -> i32 {
    *out = None;
    let mut sink = AllocSink::new();
    match vformat(&mut sink, template, args) {
        Ok(count) => match (sink.finish(), i32::try_from(count)) {
            (Ok(buf), Ok(ret)) => {
                *out = Some(buf);
                ret
            }
            (finished, _) => {
                if let Err(err) = finished {
                    debug!(error = %err, "allocated-buffer finish failed");
                }
                -1
            }
        },
        Err(err) => {
            debug!(error = %err, "formatting call failed");
            -1
        }
    }
}

/// `dprintf`: format straight to a file descriptor.
pub fn dprintf(fd: BorrowedFd<'_>, template: &[u8], args: &[Arg<'_>]) -> i32 {
    vdprintf(fd, template, &mut SliceArgs::new(args))
}

/// `vdprintf`: [`dprintf`] over a pre-captured argument handle.
pub fn vdprintf<'a>(fd: BorrowedFd<'_>, template: &[u8], args: &mut dyn ArgSource<'a>) -> i32 {
    let mut sink = FdSink::new(fd);
    c_ret(vformat(&mut sink, template, args))
}
