//! Length/type legality (pass A) and flag-coherence normalisation (pass B).
//!
//! Pass A is fatal and runs right after parsing. Pass B runs just before
//! rendering, once `*` width/precision operands have been resolved, and
//! silently rewrites the specifier; the category of the last rewrite is
//! reported for the audit helper and tests.

use crate::diag::{ParseError, Warning};
use crate::spec::{Conv, FormatSpecifier, Length, SpecFlags, PRECISION_UNSPECIFIED};

/// Pass A: reject length modifiers the conversion cannot accept.
///
/// The legality table:
///
/// | conversion        | legal lengths                  |
/// |-------------------|--------------------------------|
/// | `d i n u o x X`   | none, `hh h l ll j z t`        |
/// | `f F e E g G a A` | none, `L`                      |
/// | `c s`             | none, `l`                      |
/// | `p`               | none                           |
pub fn check_length_conv(spec: &FormatSpecifier) -> Result<(), ParseError> {
    let legal = match spec.conv {
        Conv::Decimal
        | Conv::Integer
        | Conv::Count
        | Conv::Unsigned
        | Conv::Octal
        | Conv::Hex
        | Conv::UpperHex => spec.length != Length::LongDouble,
        Conv::Double
        | Conv::UpperDouble
        | Conv::Exponential
        | Conv::UpperExponential
        | Conv::Auto
        | Conv::UpperAuto
        | Conv::HexDouble
        | Conv::UpperHexDouble => {
            matches!(spec.length, Length::None | Length::LongDouble)
        }
        Conv::Char | Conv::Str => matches!(spec.length, Length::None | Length::Long),
        Conv::Pointer => spec.length == Length::None,
        Conv::Error => false,
    };
    if legal {
        Ok(())
    } else {
        Err(ParseError::IncompatibleLength {
            length: spec.length,
            conv: spec.conv,
        })
    }
}

/// Pass B: silently drop flags and fields with no effect, returning the
/// category of the last normalisation applied.
///
/// `preceding_width` / `preceding_precision` are left alone even where
/// width and precision are cleared, so argument consumption stays in step
/// with the template.
pub fn normalize(spec: &mut FormatSpecifier) -> Option<Warning> {
    let mut last = None;

    // `+` wins over space.
    if spec.flags.contains(SpecFlags::ALWAYS_SIGN | SpecFlags::EMPTY_SIGN) {
        spec.flags.remove(SpecFlags::EMPTY_SIGN);
        last = Some(Warning::IneffectiveFlag);
    }

    // `#` changes nothing in base 10.
    if matches!(spec.conv, Conv::Decimal | Conv::Integer | Conv::Unsigned) {
        drop_flags(spec, SpecFlags::ALTERNATE_FORM, &mut last);
    }

    // Hex is unsigned; sign flags cannot fire.
    if matches!(spec.conv, Conv::Hex | Conv::UpperHex) {
        drop_flags(
            spec,
            SpecFlags::ALWAYS_SIGN | SpecFlags::EMPTY_SIGN,
            &mut last,
        );
    }

    // Text and pointers take no numeric decoration.
    if matches!(spec.conv, Conv::Char | Conv::Str | Conv::Pointer) {
        drop_flags(
            spec,
            SpecFlags::ALWAYS_SIGN
                | SpecFlags::EMPTY_SIGN
                | SpecFlags::ALTERNATE_FORM
                | SpecFlags::ZERO_PADDED,
            &mut last,
        );
    }

    // `%n` emits nothing: every rendering field is inert.
    if spec.conv == Conv::Count {
        drop_flags(spec, SpecFlags::all(), &mut last);
        if spec.width != 0 {
            spec.width = 0;
            #[allow(unused_assignments)]
            {
                last = Some(Warning::IneffectiveWidth);
            }
        }
        if spec.precision != PRECISION_UNSPECIFIED {
            spec.precision = PRECISION_UNSPECIFIED;
            #[allow(unused_assignments)]
            {
                last = Some(Warning::IneffectivePrecision);
            }
        }
        last = Some(Warning::NoOutput);
    }

    // A precision means nothing for single characters or addresses.
    if matches!(spec.conv, Conv::Char | Conv::Pointer)
        && spec.precision != PRECISION_UNSPECIFIED
    {
        spec.precision = PRECISION_UNSPECIFIED;
        last = Some(Warning::IneffectivePrecision);
    }

    // Left-justified fields pad on the right; zeros there would change
    // the value.
    if spec.flags.contains(SpecFlags::LEFT_JUSTIFY) {
        drop_flags(spec, SpecFlags::ZERO_PADDED, &mut last);
    }

    // An explicit precision already controls the leading zeros.
    if spec.precision != PRECISION_UNSPECIFIED {
        drop_flags(spec, SpecFlags::ZERO_PADDED, &mut last);
    }

    last
}

fn drop_flags(spec: &mut FormatSpecifier, unwanted: SpecFlags, last: &mut Option<Warning>) {
    if spec.flags.intersects(unwanted) {
        spec.flags.remove(unwanted);
        *last = Some(Warning::IneffectiveFlag);
    }
}
