//! Pointer renderer.

use stampa_sink::Sink;
use stampa_spec::{FormatSpecifier, SpecFlags, PRECISION_UNSPECIFIED};

use crate::error::RenderError;
use crate::{number, text};

/// What the null pointer prints.
const NIL_PTR: &[u8] = b"(nil)";

/// Render `%p`: the address as `%#x`, or `(nil)` for null.
///
/// Width and left-justification carry over; the precision is forced to
/// unspecified either way.
pub fn pointer<S: Sink>(
    sink: &mut S,
    spec: &FormatSpecifier,
    value: usize,
) -> Result<(), RenderError> {
    let mut shaped = *spec;
    shaped.precision = PRECISION_UNSPECIFIED;
    if value == 0 {
        return text::string(sink, &shaped, Some(NIL_PTR));
    }
    shaped.flags.insert(SpecFlags::ALTERNATE_FORM);
    number::unsigned(sink, &shaped, value as u64, 16, false)
}
