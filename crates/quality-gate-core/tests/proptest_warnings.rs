// crates/quality-gate-core/tests/proptest_warnings.rs
// ============================================================================
// Module: Warning Resolver Property-Based Tests
// Description: Property tests across the quality-gate configuration space.
// Purpose: Check determinism, single Priority entries, and output ordering.
// ============================================================================

//! Property-based tests for the warning resolver.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only assertions and helpers are permitted."
)]

use proptest::prelude::*;
use quality_gate_core::FeatureToggle;
use quality_gate_core::MetricKind;
use quality_gate_core::Percentile;
use quality_gate_core::QualityGateConfig;
use quality_gate_core::ResultRow;
use quality_gate_core::SectionConfig;
use quality_gate_core::SectionSettings;
use quality_gate_core::ThresholdRecord;
use quality_gate_core::WarningClass;
use quality_gate_core::WarningEntry;
use quality_gate_core::normalize;
use quality_gate_core::resolve_warnings;
use quality_gate_core::runtime::warnings::WarningInputs;

fn section_strategy() -> impl Strategy<Value = SectionConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>(), prop_oneof![Just(0.0), Just(250.0)]).prop_map(
        |(check_response_time, check_error_rate, check_throughput, response_time_deviation)| {
            SectionConfig {
                check_response_time,
                check_error_rate,
                check_throughput,
                response_time_deviation,
                ..SectionConfig::default()
            }
        },
    )
}

fn config_strategy() -> impl Strategy<Value = QualityGateConfig> {
    (any::<bool>(), any::<bool>(), section_strategy(), section_strategy()).prop_map(
        |(sla, baseline, summary, per_request)| QualityGateConfig {
            sla: FeatureToggle { checked: sla },
            baseline: FeatureToggle { checked: baseline },
            settings: SectionSettings {
                summary_results: summary,
                per_request_results: per_request,
            },
        },
    )
}

fn threshold_strategy() -> impl Strategy<Value = ThresholdRecord> {
    let scope = prop_oneof![Just("all"), Just("every"), Just("All"), Just("login"), Just("search")];
    let percentile = prop_oneof![
        Just(Percentile::Pct50),
        Just(Percentile::Pct90),
        Just(Percentile::Pct95),
        Just(Percentile::Pct99),
    ];
    let kind = prop_oneof![
        Just(MetricKind::ResponseTime),
        Just(MetricKind::ErrorRate),
        Just(MetricKind::Throughput),
    ];
    (scope, percentile, kind).prop_map(|(scope, percentile, kind)| {
        let record = ThresholdRecord::new(scope, kind, 1000.0);
        if kind == MetricKind::ResponseTime { record.with_aggregation(percentile) } else { record }
    })
}

fn assert_well_formed(entries: &[WarningEntry]) -> Result<(), TestCaseError> {
    let priorities = entries.iter().filter(|entry| entry.class == WarningClass::Priority).count();
    prop_assert!(priorities <= 1);
    prop_assert!(entries.windows(2).all(|pair| pair[0].class <= pair[1].class));
    Ok(())
}

proptest! {
    #[test]
    fn resolver_is_deterministic_with_one_priority(
        raw in config_strategy(),
        thresholds in prop::collection::vec(threshold_strategy(), 0 .. 6),
        has_baseline in any::<bool>(),
        explicit in prop::option::of(Just(Percentile::Pct90)),
    ) {
        let current = vec![ResultRow::new("All"), ResultRow::new("login"), ResultRow::new("search")];
        let baseline = if has_baseline { current.clone() } else { Vec::new() };
        let config = normalize(&raw, explicit, &thresholds, &baseline);
        let inputs = WarningInputs::new(&config, &thresholds, &current);
        let first = resolve_warnings(&inputs);
        let second = resolve_warnings(&inputs);
        prop_assert_eq!(&first, &second);
        assert_well_formed(&first.sla)?;
        assert_well_formed(&first.baseline)?;
        if !raw.sla.checked {
            prop_assert!(first.sla.len() <= 1);
        }
    }
}
