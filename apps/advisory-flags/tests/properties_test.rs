//! Property tests over arbitrary snapshots for every rule set.

#![allow(clippy::unwrap_used)]

use advisory_flags::{Flag, FlagDomain, Severity, SeverityOrder, generate_flags, sort_flags};
use proptest::prelude::*;
use serde_json::{Map, Value};

const KEYS: &[&str] = &[
    "status",
    "error",
    "message",
    "overall_score",
    "is_compliant",
    "violation_count",
    "component_scores",
    "candidate_count",
    "total_harvestable_loss",
    "short_term_loss",
    "data_coverage_pct",
    "wash_sale_ticker_count",
    "wash_sale_tickers",
    "headroom",
    "headroom_pct",
    "binding_constraint",
    "breached_constraints",
    "invariant_failures",
    "warning_count",
    "curve_shape",
    "total_spread_pct",
    "nearest_annualized_basis_pct",
    "days_to_front_expiry",
    "months",
    "volume",
    "total_value",
    "portfolio_greeks",
    "total_theta",
    "total_delta",
    "total_vega",
    "failed_count",
    "annual_income",
    "portfolio_yield_on_value",
    "holding_count",
    "income_holding_count",
    "mode",
    "recommendation_count",
    "driver_count",
    "top_recommendations",
    "correlation",
    "overall_assessment",
    "trade_eligible",
    "sell_quantity",
    "shares",
    "rules",
    "trade_count",
    "trades",
    "residual_cash",
    "turnover_pct",
    "skipped_count",
    "unmanaged_positions",
];

const WORDS: &[&str] = &[
    "success",
    "error",
    "failed",
    "contango",
    "backwardation",
    "STRONG EXIT",
    "EXIT now",
    "MONITOR",
    "HOLD",
    "portfolio",
    "single",
    "gross",
    "12.5",
    "",
];

fn key() -> impl Strategy<Value = String> {
    prop::sample::select(KEYS).prop_map(str::to_string)
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        (-10_000i64..10_000).prop_map(Value::from),
        (-1.0e5f64..1.0e5).prop_map(Value::from),
        prop::sample::select(WORDS).prop_map(|w| Value::String(w.to_string())),
    ]
}

fn field_value() -> impl Strategy<Value = Value> {
    scalar().prop_recursive(2, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(Value::Array),
            prop::collection::btree_map(key(), inner, 0..4)
                .prop_map(|fields| Value::Object(fields.into_iter().collect::<Map<_, _>>())),
        ]
    })
}

fn snapshot() -> impl Strategy<Value = Value> {
    prop_oneof![
        9 => prop::collection::btree_map(key(), field_value(), 0..12)
            .prop_map(|fields| Value::Object(fields.into_iter().collect::<Map<_, _>>())),
        1 => scalar(),
    ]
}

fn domain() -> impl Strategy<Value = FlagDomain> {
    prop::sample::select(FlagDomain::ALL.to_vec())
}

fn severity() -> impl Strategy<Value = Severity> {
    prop::sample::select(Severity::ALL.to_vec())
}

fn order_for(domain: FlagDomain) -> SeverityOrder {
    if domain == FlagDomain::Greeks {
        SeverityOrder::Advisory
    } else {
        SeverityOrder::Standard
    }
}

proptest! {
    #[test]
    fn flags_are_in_rank_order(domain in domain(), snapshot in snapshot()) {
        let order = order_for(domain);
        let flags = generate_flags(domain, &snapshot);
        let ranks: Vec<u8> = flags
            .iter()
            .map(|f| order.rank(Some(f.severity.as_str())))
            .collect();
        prop_assert!(ranks.windows(2).all(|w| w[0] <= w[1]), "{ranks:?}");
    }

    #[test]
    fn rule_sets_are_idempotent(domain in domain(), snapshot in snapshot()) {
        prop_assert_eq!(generate_flags(domain, &snapshot), generate_flags(domain, &snapshot));
    }

    #[test]
    fn rule_sets_never_come_back_empty(domain in domain(), snapshot in snapshot()) {
        prop_assume!(domain != FlagDomain::Greeks);
        prop_assert!(!generate_flags(domain, &snapshot).is_empty());
    }

    #[test]
    fn error_status_always_short_circuits(domain in domain(), snapshot in snapshot()) {
        let mut fields = match snapshot {
            Value::Object(fields) => fields,
            _ => Map::new(),
        };
        fields.insert("status".into(), Value::String("error".into()));
        let flags = generate_flags(domain, &Value::Object(fields));
        prop_assert_eq!(flags.len(), 1);
        prop_assert_eq!(flags[0].severity, Severity::Error);
    }

    #[test]
    fn metrics_are_always_finite(domain in domain(), snapshot in snapshot()) {
        for flag in generate_flags(domain, &snapshot) {
            prop_assert!(flag.metrics.values().all(|v| v.is_finite()));
            prop_assert!(serde_json::to_string(&flag).is_ok());
        }
    }

    #[test]
    fn sort_is_a_stable_permutation(severities in prop::collection::vec(severity(), 0..24)) {
        let flags: Vec<Flag> = severities
            .iter()
            .enumerate()
            .map(|(i, s)| Flag::new(i.to_string(), *s, "m"))
            .collect();
        let sorted = sort_flags(flags.clone());

        prop_assert_eq!(sorted.len(), flags.len());
        let mut original: Vec<usize> = sorted.iter().map(|f| f.kind.parse().unwrap()).collect();
        original.sort_unstable();
        prop_assert_eq!(original, (0..flags.len()).collect::<Vec<_>>());

        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.severity.rank() <= b.severity.rank());
            if a.severity == b.severity {
                let (ia, ib): (usize, usize) = (a.kind.parse().unwrap(), b.kind.parse().unwrap());
                prop_assert!(ia < ib);
            }
        }
    }
}
