//! Leverage capacity rule set.

use serde_json::Value;

use super::status_failure;
use crate::domain::shared::{Flag, Record, entry_name, format, sort_flags};

/// Headroom fraction below which capacity is considered tight.
pub const TIGHT_HEADROOM_PCT: f64 = 0.10;

/// Decoded leverage capacity snapshot.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct LeverageSnapshot {
    /// Dollar capacity remaining before the binding constraint (negative when breached).
    pub headroom: f64,
    /// Headroom as a fraction of the binding limit.
    pub headroom_pct: f64,
    /// Name of the constraint closest to binding.
    pub binding_constraint: String,
    /// Names of breached constraints.
    pub breached_constraints: Vec<String>,
    /// Names of limits whose invariants failed.
    pub invariant_failures: Vec<String>,
    /// Warnings raised by the capacity engine.
    pub warning_count: i64,
    /// Maximum permitted leverage multiple.
    pub max_leverage: f64,
    /// Current leverage multiple.
    pub current_leverage: f64,
}

impl LeverageSnapshot {
    /// Decode from a snapshot record.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            headroom: record.f64_or("headroom", 0.0),
            headroom_pct: record.f64_or("headroom_pct", 0.0),
            binding_constraint: record.str_or("binding_constraint", "leverage").to_string(),
            breached_constraints: names(
                record.list("breached_constraints"),
                &["constraint", "name"],
            ),
            invariant_failures: names(record.list("invariant_failures"), &["limit", "name"]),
            warning_count: record.count("warning_count"),
            max_leverage: record.f64_or("max_leverage", 0.0),
            current_leverage: record.f64_or("current_leverage", 0.0),
        }
    }
}

fn names(entries: &[Value], keys: &[&str]) -> Vec<String> {
    entries
        .iter()
        .map(|entry| entry_name(entry, keys).unwrap_or("unknown").to_string())
        .collect()
}

/// Generate leverage capacity flags.
#[must_use]
pub fn generate_leverage_flags(snapshot: &Value) -> Vec<Flag> {
    let record = Record::from_value_or_empty(snapshot);
    if let Some(failure) = status_failure(
        &record,
        "capacity_failed",
        "Leverage capacity analysis failed",
    ) {
        return vec![failure];
    }
    let capacity = LeverageSnapshot::from_record(&record);
    let mut flags = Vec::new();
    let headroom_display = format::ratio_pct(capacity.headroom_pct.abs());

    if capacity.headroom < 0.0 {
        let message = if capacity.breached_constraints.len() > 1 {
            format!(
                "Over-leveraged: {} breached ({})",
                format::counted(capacity.breached_constraints.len() as i64, "constraint"),
                capacity.breached_constraints.join(", ")
            )
        } else {
            format!(
                "Over-leveraged: {headroom_display} beyond the {} constraint",
                capacity.binding_constraint
            )
        };
        flags.push(
            Flag::warning("over_leveraged", message)
                .with_metric("headroom", capacity.headroom)
                .with_metric("headroom_pct", capacity.headroom_pct),
        );
    } else if capacity.headroom_pct < TIGHT_HEADROOM_PCT {
        flags.push(
            Flag::info(
                "tight_headroom",
                format!(
                    "Only {headroom_display} headroom before the {} constraint binds",
                    capacity.binding_constraint
                ),
            )
            .with_metric("headroom_pct", capacity.headroom_pct),
        );
    }

    if !capacity.invariant_failures.is_empty() {
        flags.push(Flag::warning(
            "invariant_failures",
            format!(
                "Leverage invariants failed for: {}",
                capacity.invariant_failures.join(", ")
            ),
        ));
    }

    if capacity.warning_count > 0 {
        flags.push(Flag::info(
            "capacity_warnings",
            format!(
                "{} raised during capacity analysis",
                format::counted(capacity.warning_count, "warning")
            ),
        ));
    }

    if capacity.headroom >= 0.0
        && capacity.headroom_pct >= TIGHT_HEADROOM_PCT
        && capacity.invariant_failures.is_empty()
    {
        flags.push(
            Flag::success(
                "healthy_headroom",
                format!(
                    "{headroom_display} headroom before the {} constraint",
                    capacity.binding_constraint
                ),
            )
            .with_metric("headroom_pct", capacity.headroom_pct),
        );
    }

    if flags.is_empty() {
        flags.push(Flag::info(
            "leverage_summary",
            format!(
                "Max leverage {}, current {}",
                format::leverage(capacity.max_leverage),
                format::leverage(capacity.current_leverage)
            ),
        ));
    }

    sort_flags(flags)
}
