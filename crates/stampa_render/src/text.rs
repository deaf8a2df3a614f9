//! String and character renderers.

use stampa_sink::Sink;
use stampa_spec::{FormatSpecifier, SpecFlags};

use crate::error::RenderError;

/// What a null `%s` argument prints, when the precision leaves room.
const NULL_STR: &[u8] = b"(null)";

/// Render `%s`.
///
/// A null argument substitutes `(null)` unless the precision is an
/// explicit zero. The shown length is capped by the precision; the cap
/// applies to the substitute text too.
pub fn string<S: Sink>(
    sink: &mut S,
    spec: &FormatSpecifier,
    value: Option<&[u8]>,
) -> Result<(), RenderError> {
    let bytes = match value {
        Some(bytes) => bytes,
        None if spec.precision != 0 => NULL_STR,
        None => b"",
    };
    #[allow(
        clippy::cast_sign_loss,
        reason = "guarded: only non-negative precisions reach the cast"
    )]
    let shown = if spec.precision >= 0 {
        bytes.len().min(spec.precision as usize)
    } else {
        bytes.len()
    };
    let width_pad = (spec.width as usize).saturating_sub(shown);

    if spec.flags.contains(SpecFlags::LEFT_JUSTIFY) {
        sink.put_all(&bytes[..shown])?;
        sink.put_n(b' ', width_pad)?;
    } else {
        sink.put_n(b' ', width_pad)?;
        sink.put_all(&bytes[..shown])?;
    }
    Ok(())
}

/// Render `%c`: one byte inside the field width.
pub fn chr<S: Sink>(sink: &mut S, spec: &FormatSpecifier, byte: u8) -> Result<(), RenderError> {
    let width_pad = (spec.width as usize).saturating_sub(1);
    if spec.flags.contains(SpecFlags::LEFT_JUSTIFY) {
        sink.put(byte)?;
        sink.put_n(b' ', width_pad)?;
    } else {
        sink.put_n(b' ', width_pad)?;
        sink.put(byte)?;
    }
    Ok(())
}
