//! The tagged argument variant.

use std::cell::Cell;
use std::fmt;

/// One variadic argument, pre-promoted per the C calling convention.
///
/// Integers arrive at their widest width regardless of the directive's
/// length modifier; the retrieval helpers narrow them back down, the way
/// `va_arg`-then-assign narrowing behaves in C.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Arg<'a> {
    /// `%d %i %c` and the `*` width/precision operands, at any length.
    Int(i64),
    /// `%u %o %x %X` at any length.
    Uint(u64),
    /// The float conversions. Retrieved but never rendered.
    Double(f64),
    /// `%s`. `None` stands in for a null pointer and renders `(null)`.
    Str(Option<&'a [u8]>),
    /// `%p`. Zero is the null pointer and renders `(nil)`.
    Ptr(usize),
    /// `%n`. Receives the running write count, narrowed to the declared
    /// length. `None` is a clean failure.
    Count(Option<&'a Cell<i64>>),
}

impl<'a> Arg<'a> {
    /// Borrow a byte string for `%s`.
    pub fn str(bytes: &'a (impl AsRef<[u8]> + ?Sized)) -> Self {
        Arg::Str(Some(bytes.as_ref()))
    }

    /// The retrieval class this value satisfies.
    pub fn class(&self) -> ArgClass {
        match self {
            Arg::Int(_) => ArgClass::Signed,
            Arg::Uint(_) => ArgClass::Unsigned,
            Arg::Double(_) => ArgClass::Double,
            Arg::Str(_) => ArgClass::Str,
            Arg::Ptr(_) => ArgClass::Ptr,
            Arg::Count(_) => ArgClass::Count,
        }
    }
}

/// Argument classes, as declared by a (conversion, length) pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArgClass {
    /// Signed integer of any width.
    Signed,
    /// Unsigned integer of any width.
    Unsigned,
    /// Floating point at any width.
    Double,
    /// Byte string.
    Str,
    /// Raw address.
    Ptr,
    /// `%n` writeback target.
    Count,
}

impl fmt::Display for ArgClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ArgClass::Signed => "signed integer",
            ArgClass::Unsigned => "unsigned integer",
            ArgClass::Double => "float",
            ArgClass::Str => "string",
            ArgClass::Ptr => "pointer",
            ArgClass::Count => "count target",
        };
        f.write_str(name)
    }
}
