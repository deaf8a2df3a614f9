//! Variadic argument model, typed retrieval, and the positional planner.
//!
//! Arguments reach the formatter the way `va_list` hands them to C:
//! front-to-back, one per declared parameter, already promoted to their
//! widest class. The [`Arg`] tagged variant carries one such value; an
//! [`ArgSource`] hands them out in declaration order.
//!
//! Sequential calls pop as directives are rendered. Positional calls
//! first run the [`plan`] pre-scan over the whole template, then
//! [`SlotTable::fill`] pops every argument once — in declaration order,
//! which for positions *is* slot-index order — and rendering is served
//! from the table afterwards.

mod arg;
mod error;
mod plan;
mod retrieve;
mod source;

pub use arg::{Arg, ArgClass};
pub use error::{ArgError, PlanError};
pub use plan::{plan, SlotDecl, SlotTable};
pub use retrieve::{narrow_signed, narrow_unsigned, take_int};
pub use source::{ArgSource, SliceArgs};
