// crates/quality-gate-core/src/runtime/evaluation.rs
// ============================================================================
// Module: Gate Evaluation
// Description: SLA and baseline counting plus the overall gate status.
// Purpose: Turn per-cell comparisons into rates and a pass/fail decision.
// Dependencies: crate::core, crate::runtime::{deviation, filter, matcher}, tracing
// ============================================================================

//! ## Overview
//! Evaluation counts the comparisons the report table shows:
//!
//! - SLA: named requests are checked for response time only; the aggregate
//!   row is checked for every metric against `all` thresholds.
//! - Baseline: runs on failure-filtered rows; named requests compare response
//!   time at the comparison metric, the aggregate row compares every metric.
//!
//! Each check is gated by its section flag and the feature toggle. The gate
//! then compares the run error rate, the degradation rate, and the missed
//! threshold rate with the optional limits.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::BaselineRecord;
use crate::core::GateLimits;
use crate::core::MetricKind;
use crate::core::ResultRow;
use crate::core::ThresholdRecord;
use crate::core::Verdict;
use crate::core::numeric::format_decimal;
use crate::core::numeric::percent_of;
use crate::core::numeric::round2;
use crate::runtime::deviation::Comparison;
use crate::runtime::deviation::compare;
use crate::runtime::filter::exclude_failed;
use crate::runtime::matcher::MatchTarget;
use crate::runtime::matcher::Resolution;
use crate::runtime::matcher::aggregate_thresholds;
use crate::runtime::matcher::match_baseline;
use crate::runtime::matcher::match_threshold;
use crate::runtime::normalizer::NormalizedConfig;

// ============================================================================
// SECTION: Types
// ============================================================================

/// One failed comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Violation {
    /// Request name of the row.
    pub request_name: String,
    /// Compared metric.
    pub metric: MetricKind,
    /// Current value in display units.
    pub current: f64,
    /// Original limit in display units.
    pub limit: f64,
    /// Limit after the tolerance.
    pub adjusted: f64,
}

impl Violation {
    /// Captures a failed comparison of `row`.
    fn new(row: &ResultRow, metric: MetricKind, comparison: &Comparison) -> Self {
        Self {
            request_name: row.request_name().to_string(),
            metric,
            current: comparison.current,
            limit: comparison.limit.original,
            adjusted: comparison.limit.adjusted,
        }
    }
}

/// SLA comparison counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ThresholdSummary {
    /// Comparisons made.
    pub checked: usize,
    /// Comparisons that failed.
    pub violated: usize,
    /// `violated / checked * 100`, two decimals.
    pub missed_threshold_rate: f64,
    /// Failed comparisons in row order.
    pub violations: Vec<Violation>,
}

/// Baseline comparison counts.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaselineSummary {
    /// Comparisons made.
    pub comparisons: usize,
    /// Comparisons that degraded.
    pub violated: usize,
    /// `violated / comparisons * 100`, two decimals.
    pub degradation_rate: f64,
    /// Degraded comparisons in row order.
    pub regressions: Vec<Violation>,
}

/// Outcome of the gate.
///
/// # Invariants
/// - `verdict` is `Fail` exactly when `reasons` is non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GateStatus {
    /// Overall verdict.
    pub verdict: Verdict,
    /// Failure reasons in evaluation order.
    pub reasons: Vec<String>,
}

// ============================================================================
// SECTION: SLA
// ============================================================================

/// Returns the metrics compared for a table target.
fn metrics_for(target: MatchTarget<'_>) -> &'static [MetricKind] {
    match target {
        MatchTarget::Aggregate => &MetricKind::ALL,
        MatchTarget::Request(_) => &[MetricKind::ResponseTime],
    }
}

/// Returns the thresholds a row is checked against for `metric`.
///
/// The aggregate row counts every matching `all` threshold; a named request
/// counts its single resolved threshold.
fn thresholds_to_check<'a>(
    thresholds: &'a [ThresholdRecord],
    target: MatchTarget<'_>,
    metric: MetricKind,
    config: &NormalizedConfig,
) -> Vec<&'a ThresholdRecord> {
    match target {
        MatchTarget::Aggregate => aggregate_thresholds(thresholds, metric, config),
        MatchTarget::Request(_) => match match_threshold(thresholds, target, metric, config) {
            Resolution::Found(threshold) => vec![threshold],
            Resolution::NotFound | Resolution::Unset | Resolution::SectionDisabled => Vec::new(),
        },
    }
}

/// Compares the current run with the SLA thresholds.
#[must_use]
pub fn evaluate_thresholds(
    config: &NormalizedConfig,
    thresholds: &[ThresholdRecord],
    current: &[ResultRow],
) -> ThresholdSummary {
    let mut summary = ThresholdSummary::default();
    if !config.sla.checked {
        return summary;
    }
    let has_aggregate_threshold = thresholds.iter().any(|threshold| threshold.scope().is_aggregate());
    if has_aggregate_threshold && !current.iter().any(ResultRow::is_aggregate_row) {
        tracing::warn!(
            thresholds = thresholds.len(),
            "aggregate thresholds configured but the run has no aggregate row"
        );
    }
    for row in current {
        let target = MatchTarget::for_row(row);
        for metric in metrics_for(target) {
            for threshold in thresholds_to_check(thresholds, target, *metric, config) {
                let percentile = threshold.aggregation.unwrap_or(config.comparison_metric);
                let comparison = compare(
                    row.metric_value(*metric, percentile),
                    threshold.value,
                    config.deviation(&target.scope(), *metric),
                    *metric,
                    threshold.comparison,
                );
                log_comparison("sla", row, *metric, &comparison);
                summary.checked += 1;
                if comparison.verdict.is_fail() {
                    summary.violated += 1;
                    summary.violations.push(Violation::new(row, *metric, &comparison));
                }
            }
        }
    }
    summary.missed_threshold_rate = percent_of(summary.violated, summary.checked);
    summary
}

// ============================================================================
// SECTION: Baseline
// ============================================================================

/// Compares the current run with the baseline run.
///
/// Both row sets are filtered of failed rows first.
#[must_use]
pub fn compare_with_baseline(
    config: &NormalizedConfig,
    baseline_rows: &[ResultRow],
    current: &[ResultRow],
) -> BaselineSummary {
    let mut summary = BaselineSummary::default();
    if !config.baseline.checked {
        return summary;
    }
    let baseline = baseline_records(baseline_rows);
    for row in exclude_failed(current) {
        let target = MatchTarget::for_row(row);
        for metric in metrics_for(target) {
            let Resolution::Found(found) = match_baseline(&baseline, target, *metric, config) else {
                continue;
            };
            let comparison = compare(
                row.metric_value(*metric, config.comparison_metric),
                found.value,
                config.deviation(&target.scope(), *metric),
                *metric,
                None,
            );
            log_comparison("baseline", row, *metric, &comparison);
            summary.comparisons += 1;
            if comparison.verdict.is_fail() {
                summary.violated += 1;
                summary.regressions.push(Violation::new(row, *metric, &comparison));
            }
        }
    }
    summary.degradation_rate = percent_of(summary.violated, summary.comparisons);
    summary
}

/// Captures the failure-filtered baseline rows.
#[must_use]
pub fn baseline_records(rows: &[ResultRow]) -> Vec<BaselineRecord> {
    exclude_failed(rows).into_iter().map(BaselineRecord::from_row).collect()
}

/// Emits one diagnostic event per comparison.
fn log_comparison(feature: &str, row: &ResultRow, metric: MetricKind, comparison: &Comparison) {
    tracing::debug!(
        feature,
        request = row.request_name(),
        metric = metric.as_str(),
        original = comparison.limit.original,
        adjusted = comparison.limit.adjusted,
        current = comparison.current,
        verdict = comparison.verdict.as_str(),
        "compared metric"
    );
}

// ============================================================================
// SECTION: Gate
// ============================================================================

/// Returns `sum(ko) / sum(total) * 100` over named rows, two decimals.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Sample counts stay far below 2^52.")]
pub fn run_error_rate(rows: &[ResultRow]) -> f64 {
    let (total, ko) = rows
        .iter()
        .filter(|row| !row.is_aggregate_row())
        .fold((0_u64, 0_u64), |(total, ko), row| {
            (total.saturating_add(row.total()), ko.saturating_add(row.ko()))
        });
    if total == 0 {
        return 0.0;
    }
    round2(ko as f64 / total as f64 * 100.0)
}

/// Compares the run-level rates with the configured limits.
///
/// A limit fails when the rate is strictly greater; unset limits are skipped.
#[must_use]
pub fn evaluate_gate(
    limits: &GateLimits,
    error_rate: f64,
    degradation_rate: f64,
    missed_threshold_rate: f64,
) -> GateStatus {
    let mut reasons = Vec::new();
    if limits.error_rate.is_some_and(|limit| error_rate > limit) {
        reasons.push(format!("error rate - {} %", format_decimal(error_rate)));
    }
    if limits.performance_degradation_rate.is_some_and(|limit| degradation_rate > limit) {
        reasons.push("Failed by baseline comparison to quality gate".to_string());
    }
    if limits.missed_thresholds.is_some_and(|limit| missed_threshold_rate > limit) {
        reasons.push("Failed by thresholds comparison to quality gate".to_string());
    }
    GateStatus {
        verdict: Verdict::from(reasons.is_empty()),
        reasons,
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::evaluate_gate;
    use super::run_error_rate;
    use crate::core::GateLimits;
    use crate::core::ResultRow;
    use crate::core::Verdict;

    #[test]
    fn unset_limits_pass() {
        let status = evaluate_gate(&GateLimits::default(), 50.0, 50.0, 50.0);
        assert_eq!(status.verdict, Verdict::Pass);
        assert!(status.reasons.is_empty());
    }

    #[test]
    fn limits_fail_only_when_exceeded() {
        let limits = GateLimits {
            error_rate: Some(5.0),
            performance_degradation_rate: Some(10.0),
            missed_thresholds: Some(20.0),
        };
        let at_limit = evaluate_gate(&limits, 5.0, 10.0, 20.0);
        assert_eq!(at_limit.verdict, Verdict::Pass);
        let over = evaluate_gate(&limits, 6.5, 10.5, 20.5);
        assert_eq!(over.verdict, Verdict::Fail);
        assert_eq!(
            over.reasons,
            vec![
                "error rate - 6.5 %".to_string(),
                "Failed by baseline comparison to quality gate".to_string(),
                "Failed by thresholds comparison to quality gate".to_string(),
            ]
        );
    }

    #[test]
    fn run_error_rate_skips_aggregate_row() {
        let rows = vec![
            ResultRow::new("All").with_counts(1000, 1000),
            ResultRow::new("login").with_counts(100, 5),
            ResultRow::new("search").with_counts(300, 15),
        ];
        assert!((run_error_rate(&rows) - 5.0).abs() < f64::EPSILON);
        assert!(run_error_rate(&[]).abs() < f64::EPSILON);
    }
}
