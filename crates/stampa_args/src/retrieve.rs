//! Typed pops and width narrowing.
//!
//! Values arrive promoted; the directive's length modifier decides the
//! width they are narrowed back to before rendering, exactly like
//! assigning a `va_arg(ap, int)` result to a `short`.

#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    clippy::cast_sign_loss,
    reason = "deliberate width narrowing mirrors va_arg assignment"
)]

use stampa_spec::Length;

use crate::arg::{Arg, ArgClass};
use crate::error::ArgError;
use crate::source::ArgSource;

/// Narrow a promoted signed value to the width the directive declared.
pub fn narrow_signed(value: i64, length: Length) -> i64 {
    match length {
        Length::Char => i64::from(value as i8),
        Length::Short => i64::from(value as i16),
        Length::None => i64::from(value as i32),
        Length::Size | Length::Ptrdiff => value as isize as i64,
        Length::Long | Length::LongLong | Length::Max | Length::LongDouble => value,
    }
}

/// Narrow a promoted unsigned value to the width the directive declared.
pub fn narrow_unsigned(value: u64, length: Length) -> u64 {
    match length {
        Length::Char => u64::from(value as u8),
        Length::Short => u64::from(value as u16),
        Length::None => u64::from(value as u32),
        Length::Size | Length::Ptrdiff => value as usize as u64,
        Length::Long | Length::LongLong | Length::Max | Length::LongDouble => value,
    }
}

/// Take one `int`, the type of every `*` width/precision operand.
pub fn take_int<'a>(source: &mut dyn ArgSource<'a>) -> Result<i32, ArgError> {
    match source.next_arg().ok_or(ArgError::Missing)? {
        Arg::Int(value) => Ok(value as i32),
        other => Err(ArgError::Mismatch {
            expected: ArgClass::Signed,
            found: other.class(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::source::SliceArgs;

    #[test]
    fn signed_narrowing_wraps_like_assignment() {
        assert_eq!(narrow_signed(300, Length::Char), 44);
        assert_eq!(narrow_signed(-1, Length::Char), -1);
        assert_eq!(narrow_signed(0x1_0000 + 5, Length::Short), 5);
        assert_eq!(narrow_signed(i64::from(i32::MAX) + 1, Length::None), i64::from(i32::MIN));
        assert_eq!(narrow_signed(i64::MIN, Length::LongLong), i64::MIN);
        assert_eq!(narrow_signed(-7, Length::Max), -7);
    }

    #[test]
    fn unsigned_narrowing_masks_the_low_bits() {
        assert_eq!(narrow_unsigned(0x1FF, Length::Char), 0xFF);
        assert_eq!(narrow_unsigned(0xFFFF_FFFF_FF, Length::None), 0xFFFF_FFFF);
        assert_eq!(narrow_unsigned(u64::MAX, Length::LongLong), u64::MAX);
        assert_eq!(narrow_unsigned(42, Length::Size), 42);
    }

    #[test]
    fn take_int_pops_a_signed_argument() {
        let args = [Arg::Int(-3)];
        let mut source = SliceArgs::new(&args);
        assert_eq!(take_int(&mut source), Ok(-3));
        assert_eq!(take_int(&mut source), Err(ArgError::Missing));
    }

    #[test]
    fn take_int_rejects_other_classes() {
        let args = [Arg::Str(None)];
        let mut source = SliceArgs::new(&args);
        assert_eq!(
            take_int(&mut source),
            Err(ArgError::Mismatch {
                expected: ArgClass::Signed,
                found: ArgClass::Str,
            })
        );
    }
}
