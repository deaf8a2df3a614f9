//! The directive parser.
//!
//! Consumes one `%…` directive through a fixed stage pipeline:
//! position → flags → width → precision → length → type. One nuance: a
//! leading decimal run (first digit `1`–`9`) is a positional `pos$` index
//! only when a `$` follows; otherwise the digits were the field width, and
//! parsing resumes at the precision stage. The flags stage is *not*
//! re-entered on that path — flag bytes can only precede the width in the
//! branch where no leading digits were seen.

use crate::cursor::Cursor;
use crate::diag::{ParseError, Warning};
use crate::spec::{Conv, FormatSpecifier, Length, SpecFlags, NEXT_ARG};

/// A successfully parsed directive plus the last parse-stage warning.
#[derive(Clone, Copy, Debug)]
pub struct Parsed {
    /// The directive, rendering fields not yet normalised.
    pub spec: FormatSpecifier,
    /// Last warning raised while parsing (currently only flag repetition).
    pub warning: Option<Warning>,
}

/// Parse the directive starting at `template[at]`, which must be the `%`.
///
/// On success, `spec.len` is the byte count consumed including the `%`,
/// so the caller resumes at `at + spec.len`.
pub fn parse_directive(template: &[u8], at: usize) -> Result<Parsed, ParseError> {
    debug_assert_eq!(template.get(at), Some(&b'%'), "caller must position at `%`");
    let mut cur = Cursor::at(template, at + 1);
    let mut spec = FormatSpecifier::default();
    let mut warning = None;

    // Position prefix, or a bare width.
    let mut flags_allowed = true;
    if matches!(cur.current(), b'1'..=b'9') {
        if let Some(n) = cur.eat_digits() {
            if cur.current() == b'$' {
                cur.advance();
                spec.position = reindex(n);
            } else {
                spec.width = reindex(n);
                flags_allowed = false;
            }
        }
    }

    if flags_allowed {
        parse_flags(&mut cur, &mut spec, &mut warning);
        parse_width(&mut cur, &mut spec)?;
    }
    parse_precision(&mut cur, &mut spec)?;
    spec.length = parse_length(&mut cur);
    parse_conv(&mut cur, &mut spec)?;

    #[allow(
        clippy::cast_possible_truncation,
        reason = "directive lengths are tiny; a template longer than u32 cannot parse"
    )]
    {
        spec.len = (cur.pos() - at) as u32;
    }
    Ok(Parsed { spec, warning })
}

/// Digit-run values are non-negative by construction.
#[allow(clippy::cast_sign_loss, reason = "eat_digits never returns a negative")]
fn reindex(n: i32) -> u32 {
    n as u32
}

fn parse_flags(cur: &mut Cursor<'_>, spec: &mut FormatSpecifier, warning: &mut Option<Warning>) {
    loop {
        let flag = match cur.current() {
            b'-' => SpecFlags::LEFT_JUSTIFY,
            b'+' => SpecFlags::ALWAYS_SIGN,
            b' ' => SpecFlags::EMPTY_SIGN,
            b'#' => SpecFlags::ALTERNATE_FORM,
            b'0' => SpecFlags::ZERO_PADDED,
            _ => break,
        };
        if spec.flags.contains(flag) {
            // The repetition is harmless; the flag stays set.
            *warning = Some(Warning::RepeatedFlag);
        }
        spec.flags.insert(flag);
        cur.advance();
    }
}

fn parse_width(cur: &mut Cursor<'_>, spec: &mut FormatSpecifier) -> Result<(), ParseError> {
    if cur.current() == b'*' {
        cur.advance();
        spec.preceding_width =
            star_operand(cur, spec.is_positional()).ok_or(ParseError::MissingPositionalWidth)?;
    } else if let Some(n) = cur.eat_digits() {
        spec.width = reindex(n);
    }
    Ok(())
}

fn parse_precision(cur: &mut Cursor<'_>, spec: &mut FormatSpecifier) -> Result<(), ParseError> {
    if cur.current() != b'.' {
        // Absent: precision stays unspecified.
        return Ok(());
    }
    cur.advance();
    if cur.current() == b'*' {
        cur.advance();
        spec.preceding_precision = star_operand(cur, spec.is_positional())
            .ok_or(ParseError::MissingPositionalPrecision)?;
        // The value arrives with the arguments; until then the precision
        // stays unspecified.
    } else {
        // `.` with no digits is an explicit zero.
        spec.precision = cur.eat_digits().unwrap_or(0);
    }
    Ok(())
}

/// Resolve the operand of a `*`.
///
/// Positional directives require an `m$` index (first digit `1`–`9`,
/// then `$`); sequential directives use the next-argument sentinel.
fn star_operand(cur: &mut Cursor<'_>, positional: bool) -> Option<u32> {
    if !positional {
        return Some(NEXT_ARG);
    }
    if !matches!(cur.current(), b'1'..=b'9') {
        return None;
    }
    let index = cur.eat_digits()?;
    if cur.current() != b'$' {
        return None;
    }
    cur.advance();
    Some(reindex(index))
}

fn parse_length(cur: &mut Cursor<'_>) -> Length {
    let length = match cur.current() {
        b'h' => {
            if cur.peek() == b'h' {
                cur.advance();
                Length::Char
            } else {
                Length::Short
            }
        }
        b'l' => {
            if cur.peek() == b'l' {
                cur.advance();
                Length::LongLong
            } else {
                Length::Long
            }
        }
        b'j' => Length::Max,
        b'z' => Length::Size,
        b't' => Length::Ptrdiff,
        b'L' => Length::LongDouble,
        _ => return Length::None,
    };
    cur.advance();
    length
}

fn parse_conv(cur: &mut Cursor<'_>, spec: &mut FormatSpecifier) -> Result<(), ParseError> {
    let byte = cur.current();
    match Conv::from_byte(byte) {
        Some(conv) => {
            spec.conv = conv;
            cur.advance();
            Ok(())
        }
        // The specifier stays poisoned (`Conv::Error`).
        None => Err(ParseError::UnknownConv { byte }),
    }
}
