//! The template driver.
//!
//! One pass over the template: literal runs go straight to the sink,
//! `%%` emits a `%`, and every other `%` becomes a directive. The first
//! directive elects the call's mode — positional directives trigger the
//! full pre-scan and argument capture before anything else is rendered —
//! and every later directive must match the election.

use std::cell::Cell;

use memchr::memchr;
use tracing::{debug, trace};

use stampa_args::{
    narrow_signed, narrow_unsigned, plan, take_int, Arg, ArgClass, ArgError, ArgSource, SlotTable,
};
use stampa_render as render;
use stampa_sink::Sink;
use stampa_spec::{
    check_length_conv, normalize, parse_directive, Conv, Length, SpecFlags,
    PRECISION_UNSPECIFIED,
};

use crate::error::Error;

/// Elected once per call, by the first directive.
enum Mode<'a> {
    /// No directive seen yet.
    Unelected,
    /// Arguments pop from the live stream, one directive at a time.
    Sequential,
    /// Arguments were captured up front; directives serve from the table.
    Positional(SlotTable<'a>),
}

/// Walk `template`, emitting into `sink`; returns the character count.
pub fn run<'a, S: Sink>(
    sink: &mut S,
    template: &[u8],
    source: &mut dyn ArgSource<'a>,
) -> Result<u64, Error> {
    let mut state = Mode::Unelected;
    let mut pos = 0usize;

    while pos < template.len() {
        let Some(offset) = memchr(b'%', &template[pos..]) else {
            sink.put_all(&template[pos..])?;
            break;
        };
        sink.put_all(&template[pos..pos + offset])?;
        let at = pos + offset;

        if template.get(at + 1) == Some(&b'%') {
            sink.put(b'%')?;
            pos = at + 2;
            continue;
        }

        let parsed = parse_directive(template, at).map_err(|err| Error::Parse { at, err })?;
        let mut spec = parsed.spec;
        check_length_conv(&spec).map_err(|err| Error::Parse { at, err })?;

        if matches!(state, Mode::Unelected) {
            state = if spec.is_positional() {
                debug!(at, "positional mode elected");
                let mut table = plan(template)?;
                table.fill(source)?;
                Mode::Positional(table)
            } else {
                Mode::Sequential
            };
        }
        match (&state, spec.is_positional()) {
            (Mode::Sequential, true) | (Mode::Positional(_), false) => {
                return Err(Error::MixedPositional { at });
            }
            _ => {}
        }

        resolve_star_operands(&mut spec, &state, source)?;
        if let Some(warning) = normalize(&mut spec) {
            trace!(at, %warning, "directive normalised");
        }
        trace!(at, conv = %spec.conv, width = spec.width, precision = spec.precision, "dispatch");

        dispatch(sink, &spec, &state, source)?;
        pos = at + spec.len as usize;
    }

    Ok(sink.written())
}

/// Fold `*` width/precision operands into the specifier.
///
/// A negative width turns on left-justification and uses the absolute
/// value, `i32::MIN` saturating to `i32::MAX`. A negative precision is
/// treated as unspecified.
fn resolve_star_operands<'a>(
    spec: &mut stampa_spec::FormatSpecifier,
    state: &Mode<'a>,
    source: &mut dyn ArgSource<'a>,
) -> Result<(), Error> {
    if spec.preceding_width > 0 {
        let width = operand_int(state, source, spec.preceding_width)?;
        if width < 0 {
            spec.flags.insert(SpecFlags::LEFT_JUSTIFY);
            #[allow(
                clippy::cast_sign_loss,
                reason = "i32::MAX is in range for u32"
            )]
            {
                spec.width = width.unsigned_abs().min(i32::MAX as u32);
            }
        } else {
            #[allow(clippy::cast_sign_loss, reason = "guarded non-negative")]
            {
                spec.width = width as u32;
            }
        }
    }
    if spec.preceding_precision > 0 {
        let precision = operand_int(state, source, spec.preceding_precision)?;
        spec.precision = if precision < 0 {
            PRECISION_UNSPECIFIED
        } else {
            precision
        };
    }
    Ok(())
}

/// One `int` operand: from the slot table in positional mode, from the
/// stream otherwise.
fn operand_int<'a>(
    state: &Mode<'a>,
    source: &mut dyn ArgSource<'a>,
    position: u32,
) -> Result<i32, Error> {
    match state {
        Mode::Positional(table) => Ok(table.int_at(position)?),
        Mode::Sequential | Mode::Unelected => Ok(take_int(source)?),
    }
}

/// The directive's own argument.
fn next_arg<'a>(
    state: &Mode<'a>,
    source: &mut dyn ArgSource<'a>,
    position: u32,
) -> Result<Arg<'a>, Error> {
    match state {
        Mode::Positional(table) => Ok(table.arg_at(position)?),
        Mode::Sequential | Mode::Unelected => {
            source.next_arg().ok_or(Error::Arg(ArgError::Missing))
        }
    }
}

fn mismatch(expected: ArgClass, found: Arg<'_>) -> Error {
    Error::Arg(ArgError::Mismatch {
        expected,
        found: found.class(),
    })
}

fn expect_signed(arg: Arg<'_>, length: Length) -> Result<i64, Error> {
    match arg {
        Arg::Int(value) => Ok(narrow_signed(value, length)),
        other => Err(mismatch(ArgClass::Signed, other)),
    }
}

fn expect_unsigned(arg: Arg<'_>, length: Length) -> Result<u64, Error> {
    match arg {
        Arg::Uint(value) => Ok(narrow_unsigned(value, length)),
        other => Err(mismatch(ArgClass::Unsigned, other)),
    }
}

fn expect_str<'a>(arg: Arg<'a>) -> Result<Option<&'a [u8]>, Error> {
    match arg {
        Arg::Str(value) => Ok(value),
        other => Err(mismatch(ArgClass::Str, other)),
    }
}

fn expect_ptr(arg: Arg<'_>) -> Result<usize, Error> {
    match arg {
        Arg::Ptr(value) => Ok(value),
        other => Err(mismatch(ArgClass::Ptr, other)),
    }
}

fn expect_count<'a>(arg: Arg<'a>) -> Result<Option<&'a Cell<i64>>, Error> {
    match arg {
        Arg::Count(target) => Ok(target),
        other => Err(mismatch(ArgClass::Count, other)),
    }
}

fn dispatch<'a, S: Sink>(
    sink: &mut S,
    spec: &stampa_spec::FormatSpecifier,
    state: &Mode<'a>,
    source: &mut dyn ArgSource<'a>,
) -> Result<(), Error> {
    match spec.conv {
        Conv::Decimal | Conv::Integer => {
            let value = expect_signed(next_arg(state, source, spec.position)?, spec.length)?;
            render::signed(sink, spec, value)?;
        }
        Conv::Unsigned => {
            let value = expect_unsigned(next_arg(state, source, spec.position)?, spec.length)?;
            render::unsigned(sink, spec, value, 10, false)?;
        }
        Conv::Octal => {
            let value = expect_unsigned(next_arg(state, source, spec.position)?, spec.length)?;
            render::unsigned(sink, spec, value, 8, false)?;
        }
        Conv::Hex => {
            let value = expect_unsigned(next_arg(state, source, spec.position)?, spec.length)?;
            render::unsigned(sink, spec, value, 16, false)?;
        }
        Conv::UpperHex => {
            let value = expect_unsigned(next_arg(state, source, spec.position)?, spec.length)?;
            render::unsigned(sink, spec, value, 16, true)?;
        }
        // `%lc` parses and validates but stays unimplemented.
        Conv::Char if spec.length == Length::Long => {
            return Err(Error::Unsupported(Conv::Char));
        }
        Conv::Char => {
            let value = expect_signed(next_arg(state, source, spec.position)?, Length::None)?;
            #[allow(
                clippy::cast_possible_truncation,
                clippy::cast_sign_loss,
                reason = "%c narrows its int argument to an unsigned byte"
            )]
            render::chr(sink, spec, value as u8)?;
        }
        // `%ls` parses and validates but stays unimplemented.
        Conv::Str if spec.length == Length::Long => {
            return Err(Error::Unsupported(Conv::Str));
        }
        Conv::Str => {
            let value = expect_str(next_arg(state, source, spec.position)?)?;
            render::string(sink, spec, value)?;
        }
        Conv::Pointer => {
            let value = expect_ptr(next_arg(state, source, spec.position)?)?;
            render::pointer(sink, spec, value)?;
        }
        Conv::Count => {
            let target = expect_count(next_arg(state, source, spec.position)?)?;
            render::count(target, sink.written(), spec.length)?;
        }
        other => {
            // Only the float conversions reach here: everything else has
            // an arm above, and poisoned specifiers already failed the
            // legality pass.
            debug_assert!(other.is_float() || other == Conv::Error);
            return Err(Error::Unsupported(other));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use stampa_args::SliceArgs;
    use stampa_sink::StreamSink;
    use stampa_spec::ParseError;

    use super::*;

    fn format(template: &[u8], args: &[Arg<'_>]) -> Result<(String, u64), Error> {
        let mut sink = StreamSink::new(Vec::new());
        let mut source = SliceArgs::new(args);
        let count = run(&mut sink, template, &mut source)?;
        Ok((
            String::from_utf8_lossy(&sink.into_inner()).into_owned(),
            count,
        ))
    }

    fn ok(template: &[u8], args: &[Arg<'_>]) -> (String, u64) {
        match format(template, args) {
            Ok(out) => out,
            Err(err) => panic!("{:?} failed: {err}", template),
        }
    }

    fn err(template: &[u8], args: &[Arg<'_>]) -> Error {
        match format(template, args) {
            Ok((out, _)) => panic!("{:?} rendered {out:?}", template),
            Err(err) => err,
        }
    }

    // === Literals and %% ===

    #[test]
    fn literal_only_template() {
        assert_eq!(ok(b"plain text", &[]), ("plain text".into(), 10));
    }

    #[test]
    fn empty_template() {
        assert_eq!(ok(b"", &[]), (String::new(), 0));
    }

    #[test]
    fn percent_escape() {
        assert_eq!(ok(b"100%%", &[]), ("100%".into(), 4));
        assert_eq!(ok(b"%%%%", &[]), ("%%".into(), 2));
        assert_eq!(ok(b"%%d", &[]), ("%d".into(), 2));
    }

    // === Sequential calls ===

    #[test]
    fn directives_interleave_with_literals() {
        let (out, count) = ok(b"x=%d, y=%d.", &[Arg::Int(3), Arg::Int(-7)]);
        assert_eq!(out, "x=3, y=-7.");
        assert_eq!(count, 10);
    }

    #[test]
    fn star_width_consumes_an_int_first() {
        let (out, _) = ok(b"%*d", &[Arg::Int(6), Arg::Int(42)]);
        assert_eq!(out, "    42");
    }

    #[test]
    fn star_width_and_precision_order() {
        let (out, count) = ok(b"%*.*d", &[Arg::Int(6), Arg::Int(3), Arg::Int(42)]);
        assert_eq!(out, "   042");
        assert_eq!(count, 6);
    }

    #[test]
    fn negative_star_width_left_justifies() {
        let (out, _) = ok(b"%*d|", &[Arg::Int(-6), Arg::Int(42)]);
        assert_eq!(out, "42    |");
    }

    #[test]
    fn most_negative_star_width_saturates() {
        // Rendering a saturated field would emit 2 GiB of padding, so
        // check the resolution step directly.
        let parsed = match stampa_spec::parse_directive(b"%*d", 0) {
            Ok(parsed) => parsed,
            Err(err) => panic!("parse failed: {err}"),
        };
        let mut spec = parsed.spec;
        let args = [Arg::Int(i64::from(i32::MIN))];
        let mut source = SliceArgs::new(&args);
        let state = Mode::Sequential;
        if let Err(err) = resolve_star_operands(&mut spec, &state, &mut source) {
            panic!("resolve failed: {err}");
        }
        assert!(spec.flags.contains(SpecFlags::LEFT_JUSTIFY));
        assert_eq!(spec.width, i32::MAX as u32);
    }

    #[test]
    fn negative_star_precision_is_unspecified() {
        let (out, _) = ok(b"%.*d", &[Arg::Int(-1), Arg::Int(42)]);
        assert_eq!(out, "42");
    }

    // === Positional calls ===

    #[test]
    fn positions_reorder_arguments() {
        let (out, count) = ok(b"%2$s %1$s", &[Arg::str("world"), Arg::str("hello")]);
        assert_eq!(out, "hello world");
        assert_eq!(count, 11);
    }

    #[test]
    fn one_argument_used_twice() {
        let (out, _) = ok(b"%1$d + %1$d", &[Arg::Int(21)]);
        assert_eq!(out, "21 + 21");
    }

    #[test]
    fn positional_star_operands() {
        let (out, _) = ok(
            b"%3$*1$.*2$d",
            &[Arg::Int(6), Arg::Int(3), Arg::Int(42)],
        );
        assert_eq!(out, "   042");
    }

    #[test]
    fn positional_and_sequential_agree() {
        let sequential = ok(b"<%s|%08.3d|%c>", &[Arg::str("ab"), Arg::Int(5), Arg::Int(i64::from(b'z'))]);
        let positional = ok(
            b"<%1$s|%2$08.3d|%3$c>",
            &[Arg::str("ab"), Arg::Int(5), Arg::Int(i64::from(b'z'))],
        );
        assert_eq!(sequential, positional);
    }

    // === Mode enforcement ===

    #[test]
    fn sequential_then_positional_is_fatal() {
        assert!(matches!(
            err(b"%d %2$d", &[Arg::Int(1), Arg::Int(2)]),
            Error::MixedPositional { at: 3 }
        ));
    }

    #[test]
    fn positional_then_sequential_is_fatal() {
        // The planner sweep sees the whole template and rejects it.
        assert!(matches!(
            err(b"%1$d %d", &[Arg::Int(1), Arg::Int(2)]),
            Error::MixedPositional { at: 5 }
        ));
    }

    #[test]
    fn positional_gap_is_fatal() {
        assert!(matches!(
            err(b"%1$d %3$d", &[Arg::Int(1), Arg::Int(2), Arg::Int(3)]),
            Error::PositionGap { position: 2 }
        ));
    }

    #[test]
    fn positional_conflict_is_fatal() {
        assert!(matches!(
            err(b"%1$d %1$s", &[Arg::Int(1)]),
            Error::PositionConflict { position: 1 }
        ));
    }

    // === Failures ===

    #[test]
    fn missing_argument_fails() {
        assert!(matches!(err(b"%d", &[]), Error::Arg(ArgError::Missing)));
    }

    #[test]
    fn class_mismatch_fails() {
        assert!(matches!(
            err(b"%d", &[Arg::str("nope")]),
            Error::Arg(ArgError::Mismatch { .. })
        ));
    }

    #[test]
    fn unknown_conversion_fails_with_offset() {
        assert!(matches!(
            err(b"ab%qcd", &[]),
            Error::Parse {
                at: 2,
                err: ParseError::UnknownConv { byte: b'q' },
            }
        ));
    }

    #[test]
    fn trailing_percent_fails() {
        assert!(matches!(
            err(b"oops%", &[]),
            Error::Parse {
                at: 4,
                err: ParseError::UnknownConv { byte: 0 },
            }
        ));
    }

    #[test]
    fn illegal_length_fails() {
        assert!(matches!(
            err(b"%Ld", &[Arg::Int(1)]),
            Error::Parse { at: 0, .. }
        ));
    }

    #[test]
    fn floats_are_recognised_but_unsupported() {
        assert!(matches!(
            err(b"%f", &[Arg::Double(1.5)]),
            Error::Unsupported(Conv::Double)
        ));
        assert!(matches!(
            err(b"%.2Lg", &[Arg::Double(1.5)]),
            Error::Unsupported(Conv::Auto)
        ));
    }

    #[test]
    fn wide_text_is_recognised_but_unsupported() {
        assert!(matches!(
            err(b"%lc", &[Arg::Int(65)]),
            Error::Unsupported(Conv::Char)
        ));
        assert!(matches!(
            err(b"%ls", &[Arg::str("w")]),
            Error::Unsupported(Conv::Str)
        ));
    }

    // === %n ===

    #[test]
    fn count_reports_progress_without_output() {
        let cell = std::cell::Cell::new(0i64);
        let (out, count) = ok(b"ab%ncd", &[Arg::Count(Some(&cell))]);
        assert_eq!(out, "abcd");
        assert_eq!(count, 4);
        assert_eq!(cell.get(), 2);
    }

    #[test]
    fn count_with_null_target_fails() {
        assert!(matches!(
            err(b"ab%n", &[Arg::Count(None)]),
            Error::NullCountTarget
        ));
    }

    // === Count invariant ===

    #[test]
    fn returned_count_matches_emitted_bytes() {
        let args = [Arg::str("str"), Arg::Int(1234), Arg::Uint(0xFF)];
        let (out, count) = ok(b"[%s] %08d %#x!", &args);
        assert_eq!(out.len() as u64, count);
    }
}
