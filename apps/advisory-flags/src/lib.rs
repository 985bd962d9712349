// Allow unwrap/expect in tests - tests should panic on unexpected errors
#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::float_cmp,
        clippy::too_many_lines,
        clippy::needless_pass_by_value
    )
)]

//! Advisory Flags - Rust Core Library
//!
//! Turns already-computed analysis snapshots into short, severity-tagged
//! advisory flags for agents and UIs.
//!
//! # Architecture
//!
//! ## Layers (inside → outside)
//!
//! - **Domain**: pure, synchronous flag interpretation
//!   - `shared`: severity taxonomy, [`Flag`], ordering, coercion, record access
//!   - `rules`: one rule set per analysis domain
//!   - `rebalance`: rebalance result aggregate and its JSON-safe projections
//!
//! - **Application**: domain dispatch, report DTOs, JSON input/output
//!
//! - **CLI**: `clap` command definitions for the binary
//!
//! - **Ambient**: `config` (YAML + env interpolation), `telemetry`
//!   (tracing subscriber), `error`
//!
//! # Example
//!
//! ```rust
//! use advisory_flags::{Severity, generate_risk_flags};
//! use serde_json::json;
//!
//! let flags = generate_risk_flags(&json!({
//!     "status": "success",
//!     "overall_score": 45,
//!     "is_compliant": true,
//! }));
//! assert_eq!(flags[0].severity, Severity::Warning);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::pedantic)]

/// Domain layer - flag interpretation with no I/O.
pub mod domain;

/// Application layer - dispatch, DTOs and I/O.
pub mod application;

/// Command-line interface definitions.
pub mod cli;

/// Configuration loading.
pub mod config;

/// Boundary error types.
pub mod error;

/// Logging setup.
pub mod telemetry;

pub use application::{FlagDomain, FlagReport, generate_flags};
pub use domain::rebalance::{
    RebalanceResult, RebalanceStatus, SkippedTrade, SummaryValue, TradeLeg, TradeSide,
    UnmanagedHandling,
};
pub use domain::rules::{
    generate_exit_signal_flags, generate_factor_flags, generate_futures_curve_flags,
    generate_greeks_flags, generate_income_flags, generate_leverage_flags,
    generate_rebalance_flags, generate_risk_flags, generate_tax_harvest_flags,
};
pub use domain::shared::{Flag, Severity, SeverityOrder, coerce, sort_flag_records, sort_flags};
pub use error::AdvisoryError;
