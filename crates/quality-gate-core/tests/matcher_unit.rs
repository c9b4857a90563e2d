// crates/quality-gate-core/tests/matcher_unit.rs
// ============================================================================
// Module: Matcher Unit Tests
// Description: Scope resolution for SLA thresholds and baseline rows.
// Purpose: Verify aggregate isolation, per-request fallback, and section gating.
// ============================================================================

//! Threshold and baseline matcher tests.

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

use quality_gate_core::BaselineRecord;
use quality_gate_core::Feature;
use quality_gate_core::FeatureToggle;
use quality_gate_core::MetricKind;
use quality_gate_core::NormalizedConfig;
use quality_gate_core::Percentile;
use quality_gate_core::QualityGateConfig;
use quality_gate_core::ResultRow;
use quality_gate_core::SectionConfig;
use quality_gate_core::SectionSettings;
use quality_gate_core::ThresholdRecord;
use quality_gate_core::normalize;
use quality_gate_core::runtime::MatchTarget;
use quality_gate_core::runtime::Resolution;
use quality_gate_core::runtime::match_baseline;
use quality_gate_core::runtime::match_threshold;

fn normalized(summary: SectionConfig, per_request: SectionConfig, thresholds: &[ThresholdRecord]) -> NormalizedConfig {
    let raw = QualityGateConfig {
        sla: FeatureToggle { checked: true },
        baseline: FeatureToggle { checked: true },
        settings: SectionSettings {
            summary_results: summary,
            per_request_results: per_request,
        },
    };
    normalize(&raw, None, thresholds, &[])
}

fn thresholds() -> Vec<ThresholdRecord> {
    vec![
        ThresholdRecord::new("all", MetricKind::ResponseTime, 2000.0).with_aggregation(Percentile::Pct95),
        ThresholdRecord::new("Every", MetricKind::ResponseTime, 1500.0).with_aggregation(Percentile::Pct95),
        ThresholdRecord::new("login", MetricKind::ResponseTime, 800.0).with_aggregation(Percentile::Pct95),
        ThresholdRecord::new("All", MetricKind::ErrorRate, 1.0),
        ThresholdRecord::new("all", MetricKind::Throughput, 20.0),
    ]
}

fn value(resolution: &Resolution<&ThresholdRecord>) -> Option<f64> {
    resolution.found().map(|threshold| threshold.value)
}

#[test]
fn aggregate_cells_only_accept_lowercase_all() {
    let records = thresholds();
    let config = normalized(SectionConfig::FULL, SectionConfig::FULL, &records);
    let rt = match_threshold(&records, MatchTarget::Aggregate, MetricKind::ResponseTime, &config);
    assert_eq!(value(&rt), Some(2000.0));
    let error_rate = match_threshold(&records, MatchTarget::Aggregate, MetricKind::ErrorRate, &config);
    assert!(matches!(error_rate, Resolution::NotFound));
    assert_eq!(error_rate.sentinel(Feature::Sla), Some("N/A"));
}

#[test]
fn named_requests_prefer_exact_then_every() {
    let records = thresholds();
    let config = normalized(SectionConfig::FULL, SectionConfig::FULL, &records);
    let login = match_threshold(&records, MatchTarget::Request("login"), MetricKind::ResponseTime, &config);
    assert_eq!(value(&login), Some(800.0));
    let search = match_threshold(&records, MatchTarget::Request("search"), MetricKind::ResponseTime, &config);
    assert_eq!(value(&search), Some(1500.0));
}

#[test]
fn named_requests_never_fall_back_to_all() {
    let records = thresholds();
    let config = normalized(SectionConfig::FULL, SectionConfig::FULL, &records);
    let throughput =
        match_threshold(&records, MatchTarget::Request("search"), MetricKind::Throughput, &config);
    assert!(matches!(throughput, Resolution::Unset));
    assert_eq!(throughput.sentinel(Feature::Sla), Some("Set SLA"));
}

#[test]
fn capitalized_all_is_a_request_name() {
    let records = thresholds();
    let config = normalized(SectionConfig::FULL, SectionConfig::FULL, &records);
    let named = match_threshold(&records, MatchTarget::Request("All"), MetricKind::ErrorRate, &config);
    assert_eq!(value(&named), Some(1.0));
}

#[test]
fn disabled_section_hides_existing_thresholds() {
    let records = thresholds();
    let per_request = SectionConfig {
        check_error_rate: true,
        ..SectionConfig::default()
    };
    let config = normalized(SectionConfig::FULL, per_request, &records);
    let login = match_threshold(&records, MatchTarget::Request("login"), MetricKind::ResponseTime, &config);
    assert!(matches!(login, Resolution::SectionDisabled));
    assert_eq!(login.sentinel(Feature::Sla), Some("SLA disabled"));
    assert_eq!(login.sentinel(Feature::Baseline), Some("Baseline disabled"));
}

#[test]
fn thresholds_at_other_percentiles_are_ignored() {
    let records =
        vec![ThresholdRecord::new("all", MetricKind::ResponseTime, 900.0).with_aggregation(Percentile::Pct50)];
    let config = normalized(SectionConfig::FULL, SectionConfig::FULL, &records);
    assert_eq!(config.comparison_metric, Percentile::Pct50);
    let found = match_threshold(&records, MatchTarget::Aggregate, MetricKind::ResponseTime, &config);
    assert_eq!(value(&found), Some(900.0));

    let mixed = vec![
        ThresholdRecord::new("all", MetricKind::ResponseTime, 900.0).with_aggregation(Percentile::Pct50),
        ThresholdRecord::new("all", MetricKind::ResponseTime, 1200.0).with_aggregation(Percentile::Pct90),
    ];
    let config = normalized(SectionConfig::FULL, SectionConfig::FULL, &mixed);
    assert_eq!(config.comparison_metric, Percentile::Pct95);
    let missing = match_threshold(&mixed, MatchTarget::Aggregate, MetricKind::ResponseTime, &config);
    assert!(matches!(missing, Resolution::NotFound));
}

#[test]
fn baseline_matches_by_row_name() {
    let rows = [
        ResultRow::new("All").with_counts(100, 2).with_percentile(Percentile::Pct95, 1000.0),
        ResultRow::new("login").with_counts(50, 0).with_percentile(Percentile::Pct95, 700.0),
    ];
    let baseline: Vec<BaselineRecord> = rows.iter().map(BaselineRecord::from_row).collect();
    let config = normalized(SectionConfig::FULL, SectionConfig::FULL, &[]);

    let aggregate = match_baseline(&baseline, MatchTarget::Aggregate, MetricKind::ErrorRate, &config);
    assert_eq!(aggregate.found().map(|found| found.value), Some(2.0));
    let login = match_baseline(&baseline, MatchTarget::Request("login"), MetricKind::ResponseTime, &config);
    assert_eq!(login.found().map(|found| found.value), Some(700.0));
    let missing = match_baseline(&baseline, MatchTarget::Request("search"), MetricKind::ResponseTime, &config);
    assert!(matches!(missing, Resolution::NotFound));
}

#[test]
fn aggregate_row_target_comes_from_row_name() {
    let aggregate = ResultRow::new("all");
    let named = ResultRow::new("checkout");
    assert_eq!(MatchTarget::for_row(&aggregate), MatchTarget::Aggregate);
    assert_eq!(MatchTarget::for_row(&named), MatchTarget::Request("checkout"));
}
