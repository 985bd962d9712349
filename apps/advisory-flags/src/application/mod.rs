//! Application Layer
//!
//! Routes snapshots to their rule set and shapes the results for callers:
//!
//! - **Dispatch**: [`FlagDomain`] and [`generate_flags`]
//! - **DTOs**: [`FlagReport`] for JSON consumers
//! - **IO**: snapshot input and report rendering

pub mod dispatch;
pub mod dto;
pub mod io;

pub use dispatch::{FlagDomain, generate_flags};
pub use dto::{FlagReport, SeverityCounts};
pub use io::{parse_json, read_json, render_json};
