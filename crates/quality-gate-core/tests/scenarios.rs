// crates/quality-gate-core/tests/scenarios.rs
// ============================================================================
// Module: Quality Gate Scenario Tests
// Description: End-to-end scenarios over the warning resolver and adjuster.
// Purpose: Pin the documented outcomes of representative configurations.
// ============================================================================

//! Scenario tests covering disabled features, hidden sections, and deviation.

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

use quality_gate_core::ComparisonNote;
use quality_gate_core::CoverageCase;
use quality_gate_core::Feature;
use quality_gate_core::FeatureToggle;
use quality_gate_core::MetricKind;
use quality_gate_core::Percentile;
use quality_gate_core::QualityGateConfig;
use quality_gate_core::ResultRow;
use quality_gate_core::Section;
use quality_gate_core::SectionConfig;
use quality_gate_core::SectionSettings;
use quality_gate_core::ThresholdRecord;
use quality_gate_core::Verdict;
use quality_gate_core::WarningClass;
use quality_gate_core::WarningCode;
use quality_gate_core::WarningEntry;
use quality_gate_core::normalize;
use quality_gate_core::runtime::compare;
use quality_gate_core::runtime::warnings::WarningInputs;
use quality_gate_core::runtime::warnings::resolve_feature_warnings;

fn config(sla: bool, baseline: bool, summary: SectionConfig, per_request: SectionConfig) -> QualityGateConfig {
    QualityGateConfig {
        sla: FeatureToggle { checked: sla },
        baseline: FeatureToggle { checked: baseline },
        settings: SectionSettings {
            summary_results: summary,
            per_request_results: per_request,
        },
    }
}

fn rt_threshold(scope: &str, millis: f64) -> ThresholdRecord {
    ThresholdRecord::new(scope, MetricKind::ResponseTime, millis).with_aggregation(Percentile::Pct95)
}

fn current_rows() -> Vec<ResultRow> {
    vec![
        ResultRow::new("All").with_counts(200, 2).with_percentile(Percentile::Pct95, 900.0),
        ResultRow::new("login").with_counts(100, 1).with_percentile(Percentile::Pct95, 800.0),
        ResultRow::new("search").with_counts(100, 1).with_percentile(Percentile::Pct95, 1000.0),
    ]
}

fn warnings_for(
    feature: Feature,
    raw: &QualityGateConfig,
    thresholds: &[ThresholdRecord],
    baseline: &[ResultRow],
) -> Vec<WarningEntry> {
    let rows = current_rows();
    let normalized = normalize(raw, None, thresholds, baseline);
    let inputs = WarningInputs::new(&normalized, thresholds, &rows);
    resolve_feature_warnings(feature, &inputs)
}

fn codes(entries: &[WarningEntry]) -> Vec<(WarningClass, WarningCode)> {
    entries.iter().map(|entry| (entry.class, entry.code)).collect()
}

#[test]
fn scenario_a_disabled_sla_with_data_yields_only_priority_zero() {
    let raw = config(false, false, SectionConfig::FULL, SectionConfig::FULL);
    let thresholds = vec![rt_threshold("all", 1000.0)];
    let entries = warnings_for(Feature::Sla, &raw, &thresholds, &[]);
    assert_eq!(codes(&entries), vec![(WarningClass::Priority, WarningCode::DisabledWithData)]);
    assert!(entries[0].message.starts_with("SLA data exists"));
}

#[test]
fn scenario_b_all_sections_off_yields_only_settings_disabled() {
    let raw = config(true, false, SectionConfig::default(), SectionConfig::default());
    let thresholds = vec![rt_threshold("all", 1000.0), rt_threshold("every", 900.0)];
    let entries = warnings_for(Feature::Sla, &raw, &thresholds, &[]);
    assert_eq!(codes(&entries), vec![(WarningClass::Priority, WarningCode::SettingsDisabled)]);
}

#[test]
fn scenario_c_per_request_off_with_every_only_reports_both_rules() {
    let raw = config(true, false, SectionConfig::FULL, SectionConfig::default());
    let thresholds = vec![rt_threshold("every", 900.0)];
    let entries = warnings_for(Feature::Sla, &raw, &thresholds, &[]);
    assert_eq!(
        codes(&entries),
        vec![
            (WarningClass::Priority, WarningCode::PerRequestDisabled),
            (WarningClass::Additional, WarningCode::ScopeCoverage(CoverageCase::EveryWithoutAll)),
            (
                WarningClass::Informational,
                WarningCode::ComparisonMetric(ComparisonNote::PerRequestOff)
            ),
        ]
    );
    assert_eq!(entries[0].code.ladder_rank(), Some("3j"));
    assert_eq!(entries[1].code.ladder_rank(), Some("4"));
    assert!(entries[0].message.contains("SLA disabled"));
}

#[test]
fn scenario_d_partial_summary_baseline_lists_disabled_metrics() {
    let summary = SectionConfig {
        check_error_rate: true,
        ..SectionConfig::default()
    };
    let raw = config(false, true, summary, SectionConfig::default());
    let baseline = current_rows();
    let entries = warnings_for(Feature::Baseline, &raw, &[], &baseline);
    assert!(entries.iter().all(|entry| entry.class != WarningClass::Priority));
    let disabled = entries
        .iter()
        .find(|entry| entry.code == WarningCode::DisabledMetrics)
        .expect("disabled metrics entry");
    assert_eq!(disabled.class, WarningClass::Informational);
    assert_eq!(
        disabled.message,
        "Response time comparison is disabled for general metrics (Summary results). Throughput \
         comparison is disabled for general metrics (Summary results)."
    );
    assert!(entries.iter().any(|entry| entry.code == WarningCode::SectionOff(Section::PerRequest)));
}

#[test]
fn scenario_e_deviation_display_and_classification() {
    let comparison = compare(1150.0, 1000.0, 200.0, MetricKind::ResponseTime, None);
    assert_eq!(comparison.limit.to_string(), "1.0 (1.2)");
    assert_eq!(comparison.verdict, Verdict::Pass);
}
