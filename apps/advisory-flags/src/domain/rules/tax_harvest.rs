//! Tax-loss harvesting rule set.

use serde_json::Value;

use super::{Branch, first_match, status_failure};
use crate::domain::shared::{Flag, Record, entry_name, format, sort_flags};

/// Annual ordinary-income deduction limit for net capital losses.
pub const ANNUAL_DEDUCTION_LIMIT: f64 = 3000.0;
/// Short-term share of losses at which the mix is called out.
pub const SHORT_TERM_SHARE: f64 = 0.5;
/// Wash-sale tickers listed by name before the overflow suffix.
pub const WASH_SALE_TICKERS_SHOWN: usize = 3;
const LOW_COVERAGE_PCT: f64 = 50.0;
const PARTIAL_COVERAGE_PCT: f64 = 75.0;

/// Decoded tax-loss harvesting snapshot.
#[derive(Debug, Clone, PartialEq)]
pub struct TaxHarvestSnapshot {
    /// Harvest candidates found.
    pub candidate_count: i64,
    /// Total harvestable loss (typically negative).
    pub total_harvestable_loss: f64,
    /// Short-term portion of the loss.
    pub short_term_loss: f64,
    /// Share of positions with lot data, in percent (default 100).
    pub data_coverage_pct: f64,
    /// Tickers at risk of a wash sale.
    pub wash_sale_ticker_count: i64,
    /// Wash-sale ticker symbols.
    pub wash_sale_tickers: Vec<String>,
    /// Positions analyzed.
    pub positions_analyzed: i64,
    /// Positions with tax-lot data.
    pub positions_with_lots: i64,
}

impl TaxHarvestSnapshot {
    /// Decode from a snapshot record.
    #[must_use]
    pub fn from_record(record: &Record<'_>) -> Self {
        Self {
            candidate_count: record.count("candidate_count"),
            total_harvestable_loss: record.f64_or("total_harvestable_loss", 0.0),
            short_term_loss: record.f64_or("short_term_loss", 0.0),
            data_coverage_pct: record.f64_or("data_coverage_pct", 100.0),
            wash_sale_ticker_count: record.count("wash_sale_ticker_count"),
            wash_sale_tickers: record
                .list("wash_sale_tickers")
                .iter()
                .filter_map(|entry| entry_name(entry, &["ticker", "symbol"]))
                .map(str::to_string)
                .collect(),
            positions_analyzed: record.count("positions_analyzed"),
            positions_with_lots: record.count("positions_with_lots"),
        }
    }

    fn positions_missing_lots(&self) -> i64 {
        (self.positions_analyzed - self.positions_with_lots).max(0)
    }

    fn coverage_detail(&self) -> String {
        format!(
            "Lot data covers {} of positions; {} lack cost basis",
            format::pct(self.data_coverage_pct),
            format::counted(self.positions_missing_lots(), "position")
        )
    }
}

const COVERAGE_BRANCHES: [Branch<TaxHarvestSnapshot>; 2] = [
    Branch {
        when: |s| s.data_coverage_pct < LOW_COVERAGE_PCT,
        then: |s| Flag::warning("low_data_coverage", s.coverage_detail()),
    },
    Branch {
        when: |s| s.data_coverage_pct < PARTIAL_COVERAGE_PCT,
        then: |s| Flag::info("partial_data_coverage", s.coverage_detail()),
    },
];

/// Generate tax-loss harvesting flags.
#[must_use]
pub fn generate_tax_harvest_flags(snapshot: &Value) -> Vec<Flag> {
    let record = Record::from_value_or_empty(snapshot);
    if let Some(failure) = status_failure(
        &record,
        "harvest_analysis_failed",
        "Tax-loss harvest analysis failed",
    ) {
        return vec![failure];
    }
    let harvest = TaxHarvestSnapshot::from_record(&record);

    if harvest.candidate_count == 0 {
        return vec![Flag::success(
            "no_harvest_candidates",
            "No tax-loss harvesting candidates found",
        )];
    }

    let mut flags = Vec::new();
    let total_loss = harvest.total_harvestable_loss.abs();

    if total_loss >= ANNUAL_DEDUCTION_LIMIT {
        flags.push(
            Flag::info(
                "significant_harvest",
                format!(
                    "{} in harvestable losses reaches the {} annual deduction limit; the excess carries forward",
                    format::currency(total_loss),
                    format::currency(ANNUAL_DEDUCTION_LIMIT)
                ),
            )
            .with_metric("total_harvestable_loss", harvest.total_harvestable_loss),
        );
    }

    if total_loss > 0.0 {
        let short_share = harvest.short_term_loss.abs() / total_loss;
        if short_share >= SHORT_TERM_SHARE {
            flags.push(
                Flag::info(
                    "mostly_short_term",
                    format!(
                        "{} of harvestable losses are short-term and offset gains taxed at ordinary rates",
                        format::ratio_pct(short_share)
                    ),
                )
                .with_metric("short_term_share", short_share),
            );
        }
    }

    if harvest.wash_sale_ticker_count > 0 {
        let total = harvest.wash_sale_ticker_count as usize;
        let mut message = format!(
            "Wash-sale risk on {}",
            format::counted(harvest.wash_sale_ticker_count, "ticker")
        );
        if !harvest.wash_sale_tickers.is_empty() {
            message.push_str(": ");
            message.push_str(&format::names_with_overflow(
                &harvest.wash_sale_tickers,
                WASH_SALE_TICKERS_SHOWN,
                total,
            ));
        }
        flags.push(Flag::warning("wash_sale_risk", message));
    }

    if let Some(flag) = first_match(&harvest, &COVERAGE_BRANCHES) {
        flags.push(flag.with_metric("data_coverage_pct", harvest.data_coverage_pct));
    }

    if flags.is_empty() {
        flags.push(Flag::info(
            "harvest_summary",
            format!(
                "{} totaling {} in harvestable losses",
                format::counted(harvest.candidate_count, "harvest candidate"),
                format::currency(total_loss)
            ),
        ));
    }

    sort_flags(flags)
}
