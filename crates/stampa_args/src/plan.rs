//! The positional pre-scan and argument cache.
//!
//! A positional call must know the type of every numbered argument
//! before the first one can be popped: the variadic handle only moves
//! forward. [`plan`] sweeps the entire template once, typing every
//! position (including the `int`s behind `*m$` width/precision
//! operands), and [`SlotTable::fill`] then pops each argument exactly
//! once, in slot-index order — declaration order by construction.

use memchr::memchr;
use tracing::debug;

use stampa_spec::{check_length_conv, parse_directive, Conv, Length};

use crate::arg::{Arg, ArgClass};
use crate::error::{ArgError, PlanError};
use crate::retrieve;
use crate::source::ArgSource;

/// Slot count the table starts from; growth doubles from here.
const INITIAL_SLOTS: usize = 8;

/// Declared shape of one positional slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotDecl {
    /// Argument class the directives demand.
    pub class: ArgClass,
    /// Declared width qualifier.
    pub length: Length,
}

/// One entry of the positional cache.
#[derive(Debug)]
struct Slot<'a> {
    decl: SlotDecl,
    value: Option<Arg<'a>>,
}

/// The positional argument cache: slot `i` holds position `i + 1`.
#[derive(Debug)]
pub struct SlotTable<'a> {
    slots: Vec<Slot<'a>>,
}

/// The class a conversion retrieves, `None` for poisoned specifiers.
fn class_of(conv: Conv) -> Option<ArgClass> {
    match conv {
        // `%c` takes an int, like the other promoted small integers.
        Conv::Decimal | Conv::Integer | Conv::Char => Some(ArgClass::Signed),
        Conv::Unsigned | Conv::Octal | Conv::Hex | Conv::UpperHex => Some(ArgClass::Unsigned),
        Conv::Double
        | Conv::UpperDouble
        | Conv::Exponential
        | Conv::UpperExponential
        | Conv::Auto
        | Conv::UpperAuto
        | Conv::HexDouble
        | Conv::UpperHexDouble => Some(ArgClass::Double),
        Conv::Str => Some(ArgClass::Str),
        Conv::Pointer => Some(ArgClass::Ptr),
        Conv::Count => Some(ArgClass::Count),
        Conv::Error => None,
    }
}

/// Sweep the whole template, typing every numbered position.
///
/// Rendering-only fields of each directive are discarded; only the
/// (class, length) declarations matter here. Conflicting declarations
/// for one position, a hole below the maximum position, or any
/// position-less directive fail the call.
pub fn plan<'a>(template: &[u8]) -> Result<SlotTable<'a>, PlanError> {
    let mut decls: Vec<Option<SlotDecl>> = Vec::new();
    let mut high = 0usize;
    let mut pos = 0usize;

    while let Some(offset) = memchr(b'%', &template[pos..]) {
        let at = pos + offset;
        if template.get(at + 1) == Some(&b'%') {
            pos = at + 2;
            continue;
        }
        let parsed =
            parse_directive(template, at).map_err(|err| PlanError::Parse { at, err })?;
        let spec = parsed.spec;
        check_length_conv(&spec).map_err(|err| PlanError::Parse { at, err })?;
        if !spec.is_positional() {
            return Err(PlanError::MixedMode { at });
        }

        if let Some(class) = class_of(spec.conv) {
            record(
                &mut decls,
                &mut high,
                spec.position,
                SlotDecl {
                    class,
                    length: spec.length,
                },
            )?;
        }
        // `*m$` operands are plain ints regardless of the directive.
        let int_decl = SlotDecl {
            class: ArgClass::Signed,
            length: Length::None,
        };
        if spec.preceding_width > 0 {
            record(&mut decls, &mut high, spec.preceding_width, int_decl)?;
        }
        if spec.preceding_precision > 0 {
            record(&mut decls, &mut high, spec.preceding_precision, int_decl)?;
        }

        pos = at + spec.len as usize;
    }

    // Every slot below the maximum must have been declared.
    let mut slots = Vec::with_capacity(high);
    for (index, decl) in decls.iter().take(high).enumerate() {
        match decl {
            Some(decl) => slots.push(Slot {
                decl: *decl,
                value: None,
            }),
            #[allow(
                clippy::cast_possible_truncation,
                reason = "slot indices are bounded by parsed positions, which fit u32"
            )]
            None => {
                return Err(PlanError::UnassignedSlot {
                    position: index as u32 + 1,
                })
            }
        }
    }

    debug!(slots = slots.len(), "positional plan complete");
    Ok(SlotTable { slots })
}

/// Declare `position` with `decl`, growing the table by powers of two.
fn record(
    decls: &mut Vec<Option<SlotDecl>>,
    high: &mut usize,
    position: u32,
    decl: SlotDecl,
) -> Result<(), PlanError> {
    let index = position as usize - 1;
    if index >= decls.len() {
        let target = (index + 1).next_power_of_two().max(INITIAL_SLOTS);
        decls.resize(target, None);
    }
    *high = (*high).max(index + 1);
    match decls[index] {
        None => {
            decls[index] = Some(decl);
            Ok(())
        }
        Some(existing) if existing == decl => Ok(()),
        Some(_) => Err(PlanError::Conflict { position }),
    }
}

impl<'a> SlotTable<'a> {
    /// Pop one argument per slot, in declaration order.
    pub fn fill(&mut self, source: &mut dyn ArgSource<'a>) -> Result<(), ArgError> {
        for slot in &mut self.slots {
            let arg = source.next_arg().ok_or(ArgError::Missing)?;
            if arg.class() != slot.decl.class {
                return Err(ArgError::Mismatch {
                    expected: slot.decl.class,
                    found: arg.class(),
                });
            }
            slot.value = Some(arg);
        }
        Ok(())
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the template referenced no positions.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// The value captured for a 1-based position.
    pub fn arg_at(&self, position: u32) -> Result<Arg<'a>, ArgError> {
        position
            .checked_sub(1)
            .and_then(|index| self.slots.get(index as usize))
            .and_then(|slot| slot.value)
            .ok_or(ArgError::Missing)
    }

    /// The `int` captured for a `*m$` width or precision operand.
    pub fn int_at(&self, position: u32) -> Result<i32, ArgError> {
        match self.arg_at(position)? {
            #[allow(
                clippy::cast_possible_truncation,
                reason = "width/precision operands are declared int; narrowing is the contract"
            )]
            Arg::Int(value) => Ok(value as i32),
            other => Err(ArgError::Mismatch {
                expected: ArgClass::Signed,
                found: other.class(),
            }),
        }
    }

    /// The signed value at `position`, narrowed to `length`.
    pub fn signed_at(&self, position: u32, length: Length) -> Result<i64, ArgError> {
        match self.arg_at(position)? {
            Arg::Int(value) => Ok(retrieve::narrow_signed(value, length)),
            other => Err(ArgError::Mismatch {
                expected: ArgClass::Signed,
                found: other.class(),
            }),
        }
    }
}
