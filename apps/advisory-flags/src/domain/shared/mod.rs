//! Shared Kernel
//!
//! Primitives used by every rule set: the severity taxonomy, the flag record,
//! the ordering rule, numeric coercion, snapshot record access and message
//! formatting.

mod coerce;
pub mod format;
mod flag;
mod ordering;
mod record;
mod severity;

pub use coerce::{coerce, finite_or};
pub use flag::Flag;
pub use ordering::{
    SeverityOrder, SeverityTagged, sort_by_severity, sort_flag_records, sort_flags,
};
pub use record::{Record, entry_name, truthy};
pub use severity::Severity;
