//! The shared integer pipeline.
//!
//! Magnitudes are expanded least-significant-digit-first into a local
//! buffer, then emitted with precision zeros, sign/prefix characters,
//! and width padding in the order the flag combination dictates:
//!
//! - zero-padded: prefix, `0`-width-padding, `0`-precision-padding, digits
//! - left-justified: prefix, `0`-precision-padding, digits, space-padding
//! - default: space-padding, prefix, `0`-precision-padding, digits

use stampa_sink::Sink;
use stampa_spec::{FormatSpecifier, SpecFlags};

use crate::error::RenderError;

/// Worst-case digit expansion: a 64-bit value in octal.
const DIGIT_CAP: usize = 22;

const LOWER: &[u8; 16] = b"0123456789abcdef";
const UPPER: &[u8; 16] = b"0123456789ABCDEF";

/// Render `%d` / `%i`: a signed decimal with sign handling.
pub fn signed<S: Sink>(
    sink: &mut S,
    spec: &FormatSpecifier,
    value: i64,
) -> Result<(), RenderError> {
    let sign: &[u8] = if value < 0 {
        b"-"
    } else if spec.flags.contains(SpecFlags::ALWAYS_SIGN) {
        b"+"
    } else if spec.flags.contains(SpecFlags::EMPTY_SIGN) {
        b" "
    } else {
        b""
    };
    emit(sink, spec, value.unsigned_abs(), 10, false, sign)
}

/// Render `%u %o %x %X`: an unsigned magnitude in the given base.
pub fn unsigned<S: Sink>(
    sink: &mut S,
    spec: &FormatSpecifier,
    value: u64,
    base: u64,
    upper: bool,
) -> Result<(), RenderError> {
    emit(sink, spec, value, base, upper, b"")
}

fn emit<S: Sink>(
    sink: &mut S,
    spec: &FormatSpecifier,
    magnitude: u64,
    base: u64,
    upper: bool,
    sign: &[u8],
) -> Result<(), RenderError> {
    let alphabet = if upper { UPPER } else { LOWER };
    let mut digits = [0u8; DIGIT_CAP];

    // Zero with an explicit zero precision emits no digits at all.
    let ndigits = if magnitude == 0 && spec.precision == 0 {
        0
    } else {
        to_digits(&mut digits, magnitude, base, alphabet)
    };

    #[allow(
        clippy::cast_sign_loss,
        reason = "guarded: only non-negative precisions reach the cast"
    )]
    let precision_pad = if spec.precision > 0 {
        (spec.precision as usize).saturating_sub(ndigits)
    } else {
        0
    };

    let prefix: &[u8] = if sign.is_empty() {
        alt_prefix(spec, base, upper, magnitude, ndigits, precision_pad)
    } else {
        sign
    };

    let width_pad =
        (spec.width as usize).saturating_sub(ndigits + precision_pad + prefix.len());

    if spec.flags.contains(SpecFlags::ZERO_PADDED) {
        // Normalisation already dropped `0` under `-` or a precision, so
        // this branch is right-justified with no precision padding.
        sink.put_all(prefix)?;
        sink.put_n(b'0', width_pad)?;
        sink.put_n(b'0', precision_pad)?;
        put_digits(sink, &digits, ndigits)?;
    } else if spec.flags.contains(SpecFlags::LEFT_JUSTIFY) {
        sink.put_all(prefix)?;
        sink.put_n(b'0', precision_pad)?;
        put_digits(sink, &digits, ndigits)?;
        sink.put_n(b' ', width_pad)?;
    } else {
        sink.put_n(b' ', width_pad)?;
        sink.put_all(prefix)?;
        sink.put_n(b'0', precision_pad)?;
        put_digits(sink, &digits, ndigits)?;
    }
    Ok(())
}

/// The `#` prefix, when one applies.
///
/// Octal `#` exists to force a leading zero; it stands down when the
/// precision padding or the digits themselves (a zero value) already
/// provide one. Hex prefixes only nonzero values, matching the C99
/// "nonzero result" wording.
fn alt_prefix(
    spec: &FormatSpecifier,
    base: u64,
    upper: bool,
    magnitude: u64,
    ndigits: usize,
    precision_pad: usize,
) -> &'static [u8] {
    if !spec.flags.contains(SpecFlags::ALTERNATE_FORM) {
        return b"";
    }
    match base {
        8 => {
            let already_zero = precision_pad > 0 || (magnitude == 0 && ndigits > 0);
            if already_zero {
                b""
            } else {
                b"0"
            }
        }
        16 if magnitude != 0 => {
            if upper {
                b"0X"
            } else {
                b"0x"
            }
        }
        _ => b"",
    }
}

/// Expand `value` least-significant-digit-first; returns the digit count.
fn to_digits(buf: &mut [u8; DIGIT_CAP], mut value: u64, base: u64, alphabet: &[u8; 16]) -> usize {
    let mut count = 0;
    loop {
        #[allow(
            clippy::cast_possible_truncation,
            reason = "value % base < 16 by construction"
        )]
        let digit = (value % base) as usize;
        buf[count] = alphabet[digit];
        value /= base;
        count += 1;
        if value == 0 {
            break;
        }
    }
    count
}

/// Emit the buffered digits most-significant-first.
fn put_digits<S: Sink>(sink: &mut S, digits: &[u8; DIGIT_CAP], count: usize) -> Result<(), RenderError> {
    for index in (0..count).rev() {
        sink.put(digits[index])?;
    }
    Ok(())
}
