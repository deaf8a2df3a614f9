//! The parsed shape of one `%…` directive.

use std::fmt;

/// `precision` value meaning "no precision was given".
///
/// Distinct from an explicit `.0`, which parses to `0`.
pub const PRECISION_UNSPECIFIED: i32 = -1;

/// `preceding_width` / `preceding_precision` sentinel used in sequential
/// mode: the value comes from the next argument in the stream.
///
/// In positional mode the same fields hold a 1-based `m$` index instead;
/// [`FormatSpecifier::position`] being nonzero tells the two apart.
pub const NEXT_ARG: u32 = 1;

bitflags::bitflags! {
    /// The five directive flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct SpecFlags: u8 {
        /// `-`: pad on the right instead of the left.
        const LEFT_JUSTIFY = 1 << 0;
        /// `+`: non-negative signed values get an explicit `+`.
        const ALWAYS_SIGN = 1 << 1;
        /// space: non-negative signed values get a leading space.
        const EMPTY_SIGN = 1 << 2;
        /// `#`: `0` prefix for octal, `0x`/`0X` for hex.
        const ALTERNATE_FORM = 1 << 3;
        /// `0`: pad with zeros after the sign instead of spaces before it.
        const ZERO_PADDED = 1 << 4;
    }
}

/// Argument-width qualifier (`hh h l ll j z t L`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Length {
    /// No modifier.
    #[default]
    None,
    /// `hh`
    Char,
    /// `h`
    Short,
    /// `l`
    Long,
    /// `ll`
    LongLong,
    /// `j`
    Max,
    /// `z`
    Size,
    /// `t`
    Ptrdiff,
    /// `L`
    LongDouble,
}

impl Length {
    /// The modifier as written in a template.
    pub fn as_str(self) -> &'static str {
        match self {
            Length::None => "",
            Length::Char => "hh",
            Length::Short => "h",
            Length::Long => "l",
            Length::LongLong => "ll",
            Length::Max => "j",
            Length::Size => "z",
            Length::Ptrdiff => "t",
            Length::LongDouble => "L",
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Conversion letter (the `d` in `%d`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Conv {
    /// `%d`
    Decimal,
    /// `%i`
    Integer,
    /// `%u`
    Unsigned,
    /// `%o`
    Octal,
    /// `%x`
    Hex,
    /// `%X`
    UpperHex,
    /// `%f`
    Double,
    /// `%F`
    UpperDouble,
    /// `%e`
    Exponential,
    /// `%E`
    UpperExponential,
    /// `%g`
    Auto,
    /// `%G`
    UpperAuto,
    /// `%a`
    HexDouble,
    /// `%A`
    UpperHexDouble,
    /// `%c`
    Char,
    /// `%s`
    Str,
    /// `%p`
    Pointer,
    /// `%n`
    Count,
    /// Poisoned: the type stage saw a byte outside the conversion set.
    #[default]
    Error,
}

impl Conv {
    /// Map a template byte to its conversion, or `None` for anything
    /// outside the set.
    pub fn from_byte(byte: u8) -> Option<Self> {
        match byte {
            b'd' => Some(Conv::Decimal),
            b'i' => Some(Conv::Integer),
            b'u' => Some(Conv::Unsigned),
            b'o' => Some(Conv::Octal),
            b'x' => Some(Conv::Hex),
            b'X' => Some(Conv::UpperHex),
            b'f' => Some(Conv::Double),
            b'F' => Some(Conv::UpperDouble),
            b'e' => Some(Conv::Exponential),
            b'E' => Some(Conv::UpperExponential),
            b'g' => Some(Conv::Auto),
            b'G' => Some(Conv::UpperAuto),
            b'a' => Some(Conv::HexDouble),
            b'A' => Some(Conv::UpperHexDouble),
            b'c' => Some(Conv::Char),
            b's' => Some(Conv::Str),
            b'p' => Some(Conv::Pointer),
            b'n' => Some(Conv::Count),
            _ => None,
        }
    }

    /// The conversion letter, `?` for poisoned specifiers.
    pub fn letter(self) -> char {
        match self {
            Conv::Decimal => 'd',
            Conv::Integer => 'i',
            Conv::Unsigned => 'u',
            Conv::Octal => 'o',
            Conv::Hex => 'x',
            Conv::UpperHex => 'X',
            Conv::Double => 'f',
            Conv::UpperDouble => 'F',
            Conv::Exponential => 'e',
            Conv::UpperExponential => 'E',
            Conv::Auto => 'g',
            Conv::UpperAuto => 'G',
            Conv::HexDouble => 'a',
            Conv::UpperHexDouble => 'A',
            Conv::Char => 'c',
            Conv::Str => 's',
            Conv::Pointer => 'p',
            Conv::Count => 'n',
            Conv::Error => '?',
        }
    }

    /// True for the eight floating conversions (`f F e E g G a A`).
    pub fn is_float(self) -> bool {
        matches!(
            self,
            Conv::Double
                | Conv::UpperDouble
                | Conv::Exponential
                | Conv::UpperExponential
                | Conv::Auto
                | Conv::UpperAuto
                | Conv::HexDouble
                | Conv::UpperHexDouble
        )
    }

}

impl fmt::Display for Conv {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.letter())
    }
}

/// The parsed description of a single `%…` directive.
///
/// # Invariant
///
/// `position` is nonzero iff the whole call is positional. When
/// `position > 0`, a nonzero `preceding_width` / `preceding_precision` is
/// a 1-based positional index; otherwise it is the [`NEXT_ARG`] sentinel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatSpecifier {
    /// Bytes consumed from the template, including the leading `%`.
    pub len: u32,
    /// The flag set, as parsed (normalisation may drop members later).
    pub flags: SpecFlags,
    /// `*` width operand: 0 when absent, see the struct invariant.
    pub preceding_width: u32,
    /// Minimum field width. 0 when absent.
    pub width: u32,
    /// `.*` precision operand: 0 when absent, see the struct invariant.
    pub preceding_precision: u32,
    /// Precision; [`PRECISION_UNSPECIFIED`] when absent. `.0` parses to 0.
    pub precision: i32,
    /// Argument-width qualifier.
    pub length: Length,
    /// Conversion letter.
    pub conv: Conv,
    /// 1-based `pos$` index, 0 when the directive is not positional.
    pub position: u32,
}

impl Default for FormatSpecifier {
    fn default() -> Self {
        FormatSpecifier {
            len: 0,
            flags: SpecFlags::empty(),
            preceding_width: 0,
            width: 0,
            preceding_precision: 0,
            precision: PRECISION_UNSPECIFIED,
            length: Length::None,
            conv: Conv::Error,
            position: 0,
        }
    }
}

impl FormatSpecifier {
    /// True when the directive carries a `pos$` prefix.
    pub fn is_positional(&self) -> bool {
        self.position > 0
    }

    /// True when a precision was given (inline or already resolved).
    pub fn has_precision(&self) -> bool {
        self.precision >= 0
    }
}
