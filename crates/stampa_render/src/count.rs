//! `%n`: write the running count back to the caller.

use std::cell::Cell;

use stampa_spec::Length;

use crate::error::RenderError;

/// Store `written` into the caller's count cell, narrowed to the width
/// the length modifier declares.
///
/// Emits nothing. A missing target is a clean failure, never a crash.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_possible_wrap,
    reason = "deliberate width narrowing mirrors the C objects %n writes to"
)]
pub fn count(
    target: Option<&Cell<i64>>,
    written: u64,
    length: Length,
) -> Result<(), RenderError> {
    let target = target.ok_or(RenderError::NullCountTarget)?;
    let full = written as i64;
    let narrowed = match length {
        Length::Char => i64::from(full as i8),
        Length::Short => i64::from(full as i16),
        Length::None => i64::from(full as i32),
        Length::Size | Length::Ptrdiff => full as isize as i64,
        Length::Long | Length::LongLong | Length::Max | Length::LongDouble => full,
    };
    target.set(narrowed);
    Ok(())
}
