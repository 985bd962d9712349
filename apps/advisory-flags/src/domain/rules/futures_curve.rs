//! Futures curve rule set.

use serde_json::Value;

use super::status_failure;
use crate::domain::shared::{Flag, Record, format, sort_flags};

/// Annualized front-month basis above which rolling is flagged as costly.
pub const HIGH_BASIS_PCT: f64 = 5.0;
/// Days to front-month expiry at or below which a roll reminder fires.
pub const EXPIRY_WARNING_DAYS: f64 = 5.0;
/// Back-month volume below which a contract is considered illiquid.
pub const MIN_BACK_MONTH_VOLUME: f64 = 10.0;

/// Shape of the term structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveShape {
    /// Deferred contracts above the front.
    Contango,
    /// Deferred contracts below the front.
    Backwardation,
    /// Flat, mixed or unreported.
    Other,
}

impl CurveShape {
    fn parse(tag: &str) -> Self {
        match tag {
            "contango" => Self::Contango,
            "backwardation" => Self::Backwardation,
            _ => Self::Other,
        }
    }
}

/// One contract month on the curve.
#[derive(Debug, Clone, PartialEq)]
pub struct CurveMonth {
    /// Contract code, when reported.
    pub contract: Option<String>,
    /// Traded volume (missing counts as zero).
    pub volume: f64,
}

/// Decoded futures curve snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct FuturesCurveSnapshot {
    /// Root symbol, when reported.
    pub symbol: Option<String>,
    /// Term structure shape.
    pub curve_shape: CurveShape,
    /// Front-to-back spread, already in percent.
    pub total_spread_pct: f64,
    /// Annualized basis of the nearest contract, in percent.
    pub nearest_annualized_basis_pct: f64,
    /// Days until the front contract expires, when known.
    pub days_to_front_expiry: Option<f64>,
    /// Contract months, front first.
    pub months: Vec<CurveMonth>,
}

impl FuturesCurveSnapshot {
    /// Decode from a snapshot record.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            symbol: record.opt_str("symbol").map(str::to_string),
            curve_shape: CurveShape::parse(record.str_or("curve_shape", "")),
            total_spread_pct: record.f64_or("total_spread_pct", 0.0),
            nearest_annualized_basis_pct: record.f64_or("nearest_annualized_basis_pct", 0.0),
            days_to_front_expiry: record.opt_f64("days_to_front_expiry"),
            months: record
                .records("months")
                .map(|month| CurveMonth {
                    contract: month.opt_str("contract").map(str::to_string),
                    volume: month.f64_or("volume", 0.0),
                })
                .collect(),
        }
    }

    fn curve_label(&self) -> String {
        self.symbol
            .as_deref()
            .map_or_else(|| "Curve".to_string(), |symbol| format!("{symbol} curve"))
    }
}

/// Generate futures curve flags.
#[must_use]
pub fn generate_futures_curve_flags(snapshot: &Value) -> Vec<Flag> {
    let record = Record::from_value_or_empty(snapshot);
    if let Some(failure) = status_failure(
        &record,
        "curve_fetch_failed",
        "Futures curve fetch failed",
    ) {
        return vec![failure];
    }
    let curve = FuturesCurveSnapshot::from_record(&record);
    let mut flags = Vec::new();

    let spread = format::signed_pct(curve.total_spread_pct);
    match curve.curve_shape {
        CurveShape::Contango => flags.push(
            Flag::info(
                "contango",
                format!("{} in contango ({spread} front to back)", curve.curve_label()),
            )
            .with_metric("total_spread_pct", curve.total_spread_pct),
        ),
        CurveShape::Backwardation => flags.push(
            Flag::info(
                "backwardation",
                format!(
                    "{} in backwardation ({spread} front to back)",
                    curve.curve_label()
                ),
            )
            .with_metric("total_spread_pct", curve.total_spread_pct),
        ),
        CurveShape::Other => {}
    }

    if curve.nearest_annualized_basis_pct > HIGH_BASIS_PCT {
        flags.push(Flag::warning(
            "high_roll_cost",
            format!(
                "Front-month annualized basis of {} makes holding through rolls expensive",
                format::pct(curve.nearest_annualized_basis_pct)
            ),
        ));
    }

    if let Some(days) = curve.days_to_front_expiry {
        if days <= EXPIRY_WARNING_DAYS {
            let days = days as i64;
            flags.push(Flag::info(
                "front_month_expiring",
                format!(
                    "Front month expires in {}; consider rolling",
                    format::counted(days, "day")
                ),
            ));
        }
    }

    let illiquid = curve
        .months
        .iter()
        .skip(1)
        .filter(|month| month.volume < MIN_BACK_MONTH_VOLUME)
        .count() as i64;
    if illiquid > 0 {
        flags.push(Flag::warning(
            "low_liquidity_warning",
            format!(
                "{} back {} with volume under {MIN_BACK_MONTH_VOLUME:.0} contracts",
                illiquid,
                format::pluralize(illiquid, "month")
            ),
        ));
    }

    let fetched = curve.months.len() as i64;
    let mut message = format!("Fetched {}", format::counted(fetched, "contract month"));
    if let Some(symbol) = &curve.symbol {
        message.push_str(&format!(" for {symbol}"));
    }
    flags.push(Flag::success("curve_fetched", message).with_metric("month_count", fetched as f64));

    sort_flags(flags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shared::Severity;
    use serde_json::json;

    fn kinds(flags: &[Flag]) -> Vec<&str> {
        flags.iter().map(|f| f.kind.as_str()).collect()
    }

    #[test]
    fn contango_with_illiquid_back_month() {
        let flags = generate_futures_curve_flags(&json!({
            "status": "success",
            "curve_shape": "contango",
            "total_spread_pct": 2.5,
            "months": [{"volume": 20}, {"volume": 5}],
        }));
        assert_eq!(
            kinds(&flags),
            vec!["low_liquidity_warning", "contango", "curve_fetched"]
        );
        assert_eq!(flags[0].message, "1 back month with volume under 10 contracts");
        assert_eq!(flags[1].message, "Curve in contango (+2.5% front to back)");
        assert_eq!(flags[2].message, "Fetched 2 contract months");
    }

    #[test]
    fn backwardation_reports_signed_spread() {
        let flags = generate_futures_curve_flags(&json!({
            "status": "success",
            "symbol": "CL",
            "curve_shape": "backwardation",
            "total_spread_pct": -3.14,
            "months": [{"volume": 900}],
        }));
        assert_eq!(kinds(&flags), vec!["backwardation", "curve_fetched"]);
        assert_eq!(flags[0].message, "CL curve in backwardation (-3.1% front to back)");
        assert_eq!(flags[1].message, "Fetched 1 contract month for CL");
    }

    #[test]
    fn front_month_volume_is_not_checked() {
        let flags = generate_futures_curve_flags(&json!({
            "status": "success",
            "months": [{"volume": 1}, {"volume": 50}],
        }));
        assert_eq!(kinds(&flags), vec!["curve_fetched"]);
    }

    #[test]
    fn missing_back_month_volume_counts_as_zero() {
        let flags = generate_futures_curve_flags(&json!({
            "status": "success",
            "months": [{"volume": 100}, {}, {"volume": "n/a"}, {"volume": 10}],
        }));
        assert_eq!(flags[0].kind, "low_liquidity_warning");
        assert!(flags[0].message.starts_with("2 back months"));
    }

    #[test]
    fn basis_and_expiry_thresholds() {
        let flags = generate_futures_curve_flags(&json!({
            "status": "success",
            "nearest_annualized_basis_pct": 5.01,
            "days_to_front_expiry": 5,
            "months": [],
        }));
        assert_eq!(
            kinds(&flags),
            vec!["high_roll_cost", "front_month_expiring", "curve_fetched"]
        );
        assert_eq!(flags[1].message, "Front month expires in 5 days; consider rolling");

        let flags = generate_futures_curve_flags(&json!({
            "status": "success",
            "nearest_annualized_basis_pct": 5.0,
            "days_to_front_expiry": 6,
        }));
        assert_eq!(kinds(&flags), vec!["curve_fetched"]);
    }

    #[test]
    fn fetched_flag_always_present() {
        let flags = generate_futures_curve_flags(&json!({}));
        assert_eq!(kinds(&flags), vec!["curve_fetched"]);
        assert_eq!(flags[0].severity, Severity::Success);
    }

    #[test]
    fn failed_fetch_short_circuits() {
        let flags = generate_futures_curve_flags(&json!({
            "status": "error",
            "error": "No contracts found for XX",
            "curve_shape": "contango",
        }));
        assert_eq!(flags.len(), 1);
        assert_eq!(flags[0].severity, Severity::Error);
        assert_eq!(flags[0].message, "No contracts found for XX");
    }
}
