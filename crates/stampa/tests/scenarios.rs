//! End-to-end scenarios over the public entry points.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

use std::cell::Cell;

use pretty_assertions::assert_eq;
use stampa::{asprintf, fprintf, snprintf, Arg};

/// Format through the allocated-buffer entry and hand back text + count.
fn fmt(template: &[u8], args: &[Arg<'_>]) -> (String, i32) {
    let mut out = None;
    let ret = asprintf(&mut out, template, args);
    let text = out
        .map(|buf| String::from_utf8_lossy(buf.as_bytes()).into_owned())
        .unwrap_or_default();
    (text, ret)
}

#[test]
fn negative_decimal() {
    assert_eq!(fmt(b"%d", &[Arg::Int(-5)]), ("-5".into(), 2));
}

#[test]
fn width_with_precision() {
    assert_eq!(fmt(b"%5.3d", &[Arg::Int(42)]), ("  042".into(), 5));
}

#[test]
fn left_justified_field() {
    assert_eq!(fmt(b"%-5d|", &[Arg::Int(42)]), ("42   |".into(), 6));
}

#[test]
fn alternate_hex_zero_padded() {
    assert_eq!(fmt(b"%#010x", &[Arg::Uint(255)]), ("0x000000ff".into(), 10));
}

#[test]
fn positional_swap() {
    let args = [Arg::str("world"), Arg::str("hello")];
    assert_eq!(fmt(b"%2$s %1$s", &args), ("hello world".into(), 11));
}

#[test]
fn string_precision_truncates() {
    assert_eq!(fmt(b"%.3s", &[Arg::str("abcdef")]), ("abc".into(), 3));
}

#[test]
fn star_width_and_precision() {
    let args = [Arg::Int(6), Arg::Int(3), Arg::Int(42)];
    assert_eq!(fmt(b"%*.*d", &args), ("   042".into(), 6));
}

#[test]
fn null_pointer() {
    assert_eq!(fmt(b"%p", &[Arg::Ptr(0)]), ("(nil)".into(), 5));
}

#[test]
fn single_character() {
    assert_eq!(fmt(b"%c", &[Arg::Int(0x41)]), ("A".into(), 1));
}

#[test]
fn capped_buffer_truncates_and_terminates() {
    let mut buf = [0xAAu8; 8];
    let ret = snprintf(&mut buf, 4, b"%d", &[Arg::Int(12345)]);
    assert_eq!(ret, 5);
    assert_eq!(&buf[..4], b"123\0");
    assert_eq!(&buf[4..], [0xAA; 4]);
}

// === Beyond the canonical ten ===

#[test]
fn lengths_narrow_before_rendering() {
    assert_eq!(fmt(b"%hhd", &[Arg::Int(300)]), ("44".into(), 2));
    assert_eq!(fmt(b"%hd", &[Arg::Int(0x1_0005)]), ("5".into(), 1));
    assert_eq!(fmt(b"%hhu", &[Arg::Uint(0x1FF)]), ("255".into(), 3));
    assert_eq!(
        fmt(b"%lld", &[Arg::Int(i64::MIN)]),
        ("-9223372036854775808".into(), 20)
    );
}

#[test]
fn unsigned_bases() {
    let args = [Arg::Uint(255), Arg::Uint(255), Arg::Uint(255), Arg::Uint(255)];
    assert_eq!(
        fmt(b"%u %o %x %X", &args),
        ("255 377 ff FF".into(), 13)
    );
}

#[test]
fn null_string_substitution() {
    assert_eq!(fmt(b"%s!", &[Arg::Str(None)]), ("(null)!".into(), 7));
    assert_eq!(fmt(b"%.3s!", &[Arg::Str(None)]), ("(nu!".into(), 4));
    assert_eq!(fmt(b"%.0s!", &[Arg::Str(None)]), ("!".into(), 1));
}

#[test]
fn pointer_formats_as_prefixed_hex() {
    assert_eq!(fmt(b"%p", &[Arg::Ptr(0xdead)]), ("0xdead".into(), 6));
}

#[test]
fn count_observes_capped_totals() {
    // The cap suppresses stores but the count keeps the true total, and
    // %n must see that total.
    let cell = Cell::new(0i64);
    let mut buf = [0u8; 4];
    let args = [Arg::str("abcdef"), Arg::Count(Some(&cell))];
    let ret = snprintf(&mut buf, 4, b"%s%n", &args);
    assert_eq!(ret, 6);
    assert_eq!(cell.get(), 6);
    assert_eq!(&buf[..4], b"abc\0");
}

#[test]
fn zero_with_zero_precision_is_empty() {
    assert_eq!(fmt(b"[%.0d]", &[Arg::Int(0)]), ("[]".into(), 2));
    assert_eq!(fmt(b"[%.0o]", &[Arg::Uint(0)]), ("[]".into(), 2));
    assert_eq!(fmt(b"[%.0x]", &[Arg::Uint(0)]), ("[]".into(), 2));
}

#[test]
fn failures_return_minus_one() {
    let (_, ret) = fmt(b"%f", &[Arg::Double(2.5)]);
    assert_eq!(ret, -1);
    let (_, ret) = fmt(b"%1$d %d", &[Arg::Int(1), Arg::Int(2)]);
    assert_eq!(ret, -1);
    let (_, ret) = fmt(b"%d", &[]);
    assert_eq!(ret, -1);
}

#[test]
fn stream_and_buffer_agree() {
    let args = [Arg::Int(-42), Arg::str("mid"), Arg::Uint(7)];
    let template: &[u8] = b"a%06db%-4sc%#od";

    let mut stream = Vec::new();
    let stream_ret = fprintf(&mut stream, template, &args);

    let (text, alloc_ret) = fmt(template, &args);
    assert_eq!(stream_ret, alloc_ret);
    assert_eq!(stream, text.as_bytes());
}
