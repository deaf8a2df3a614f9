//! Property tests for the public entry points.
//!
//! The invariants checked here are the load-bearing ones:
//! 1. The returned count equals the bytes the sink received.
//! 2. The capped buffer stores `min(count, cap - 1)` bytes, terminated.
//! 3. Positional and sequential calls produce identical output.
//! 4. Decimal output round-trips through string parsing.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests can panic")]

use proptest::prelude::*;
use stampa::{asprintf, fprintf, snprintf, Arg};

fn fmt(template: &[u8], args: &[Arg<'_>]) -> Option<(Vec<u8>, i32)> {
    let mut out = None;
    let ret = asprintf(&mut out, template, args);
    out.map(|buf| (buf.as_bytes().to_vec(), ret))
}

/// Templates exercising one int directive with assorted decoration.
fn int_template() -> impl Strategy<Value = String> {
    (
        prop::sample::select(vec!["", "-", "+", " ", "0", "-+", " 0"]),
        prop::option::of(0u32..30),
        prop::option::of(0u32..20),
        prop::sample::select(vec!["d", "i"]),
    )
        .prop_map(|(flags, width, precision, conv)| {
            let mut template = String::from("%");
            template.push_str(flags);
            if let Some(width) = width {
                template.push_str(&width.to_string());
            }
            if let Some(precision) = precision {
                template.push('.');
                template.push_str(&precision.to_string());
            }
            template.push_str(conv);
            template
        })
}

proptest! {
    #[test]
    fn count_equals_emitted_length(template in int_template(), value in any::<i64>()) {
        let mut stream = Vec::new();
        let ret = fprintf(&mut stream, template.as_bytes(), &[Arg::Int(value)]);
        prop_assert!(ret >= 0, "{template} failed");
        prop_assert_eq!(stream.len() as i32, ret);
    }

    #[test]
    fn allocated_and_stream_sinks_agree(template in int_template(), value in any::<i64>()) {
        let mut stream = Vec::new();
        let stream_ret = fprintf(&mut stream, template.as_bytes(), &[Arg::Int(value)]);
        let (alloc, alloc_ret) = fmt(template.as_bytes(), &[Arg::Int(value)]).unwrap();
        prop_assert_eq!(stream_ret, alloc_ret);
        prop_assert_eq!(stream, alloc);
    }

    #[test]
    fn capped_buffer_law(value in any::<i64>(), cap in 1usize..16) {
        let (full, ret) = fmt(b"%d", &[Arg::Int(value)]).unwrap();
        let mut buf = vec![0xAAu8; 16];
        let capped_ret = snprintf(&mut buf, cap, b"%d", &[Arg::Int(value)]);
        prop_assert_eq!(capped_ret, ret);

        let stored = (ret as usize).min(cap - 1);
        prop_assert_eq!(&buf[..stored], &full[..stored]);
        prop_assert_eq!(buf[stored], 0);
        // Bytes past the cap are untouched.
        for &byte in &buf[cap.max(stored + 1)..] {
            prop_assert_eq!(byte, 0xAA);
        }
    }

    #[test]
    fn positional_matches_sequential(
        value in any::<i64>(),
        text in "[a-zA-Z0-9 ]{0,12}",
        width in 0u32..20,
    ) {
        let sequential = format!("%{width}d=%s");
        let positional = format!("%1${width}d=%2$s");
        let args = [Arg::Int(value), Arg::str(&text)];
        let seq = fmt(sequential.as_bytes(), &args).unwrap();
        let pos = fmt(positional.as_bytes(), &args).unwrap();
        prop_assert_eq!(seq, pos);
    }

    #[test]
    fn positional_swap_matches_reordered_sequential(
        first in "[a-z]{0,8}",
        second in "[A-Z]{0,8}",
    ) {
        let args = [Arg::str(&first), Arg::str(&second)];
        let swapped_args = [Arg::str(&second), Arg::str(&first)];
        let pos = fmt(b"%2$s %1$s", &args).unwrap();
        let seq = fmt(b"%s %s", &swapped_args).unwrap();
        prop_assert_eq!(pos, seq);
    }

    #[test]
    fn decimal_round_trips(value in any::<i64>()) {
        let (bytes, _) = fmt(b"%d", &[Arg::Int(value)]).unwrap();
        let text = String::from_utf8(bytes).unwrap();
        prop_assert_eq!(text.parse::<i64>(), Ok(value));
    }

    #[test]
    fn octal_and_hex_round_trip(value in any::<u64>()) {
        let (octal, _) = fmt(b"%o", &[Arg::Uint(value)]).unwrap();
        let (hex, _) = fmt(b"%x", &[Arg::Uint(value)]).unwrap();
        prop_assert_eq!(u64::from_str_radix(&String::from_utf8(octal).unwrap(), 8), Ok(value));
        prop_assert_eq!(u64::from_str_radix(&String::from_utf8(hex).unwrap(), 16), Ok(value));
    }

    #[test]
    fn zero_padded_exact_width_is_all_digits(value in 1u64..=u64::MAX) {
        let (plain, _) = fmt(b"%u", &[Arg::Uint(value)]).unwrap();
        let template = format!("%0{}u", plain.len());
        let (padded, _) = fmt(template.as_bytes(), &[Arg::Uint(value)]).unwrap();
        prop_assert_eq!(plain, padded);
    }

    #[test]
    fn string_precision_never_reads_past(text in "[ -~]{0,20}", precision in 0usize..24) {
        let template = format!("%.{precision}s");
        let args = [Arg::str(&text)];
        let (bytes, ret) = fmt(template.as_bytes(), &args).unwrap();
        let shown = text.len().min(precision);
        prop_assert_eq!(bytes.len(), shown);
        prop_assert_eq!(ret as usize, shown);
        prop_assert_eq!(&bytes[..], &text.as_bytes()[..shown]);
    }
}
