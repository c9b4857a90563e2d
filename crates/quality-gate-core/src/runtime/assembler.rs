// crates/quality-gate-core/src/runtime/assembler.rs
// ============================================================================
// Module: Report Assembler
// Description: Combines normalization, matching, deviation, and warnings.
// Purpose: Produce the per-row display cells and summaries of one report.
// Dependencies: crate::core, crate::runtime::*
// ============================================================================

//! ## Overview
//! The assembler is the only entry point that touches every stage. For each
//! current row it resolves an SLA and a baseline cell per metric, renders the
//! `"<original> (<adjusted>)"` display, and attaches the verdict. Unresolved
//! cells carry their sentinel text and an unknown verdict. It then adds the
//! warning lists, the SLA and baseline counts, the gate status, the headline
//! summary, and the build trends.
//!
//! Rows are ordered aggregate first, then named requests by their current
//! comparison-metric value, descending. Ties keep input order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::cmp::Ordering;

use serde::Serialize;

use crate::core::BaselineRecord;
use crate::core::Feature;
use crate::core::GateLimits;
use crate::core::MetricKind;
use crate::core::Percentile;
use crate::core::QualityGateConfig;
use crate::core::ReportInputs;
use crate::core::ResultRow;
use crate::core::RowStatus;
use crate::core::ThresholdRecord;
use crate::core::Verdict;
use crate::runtime::aggregation::BuildDiff;
use crate::runtime::aggregation::HeadlineSummary;
use crate::runtime::aggregation::TrendPoint;
use crate::runtime::aggregation::compare_builds;
use crate::runtime::aggregation::headline_summary;
use crate::runtime::aggregation::trend_points;
use crate::runtime::deviation::compare;
use crate::runtime::deviation::to_display_units;
use crate::runtime::evaluation::BaselineSummary;
use crate::runtime::evaluation::GateStatus;
use crate::runtime::evaluation::ThresholdSummary;
use crate::runtime::evaluation::baseline_records;
use crate::runtime::evaluation::compare_with_baseline;
use crate::runtime::evaluation::evaluate_gate;
use crate::runtime::evaluation::evaluate_thresholds;
use crate::runtime::evaluation::run_error_rate;
use crate::runtime::format::DEFAULT_MAX_NAME_CHARS;
use crate::runtime::format::truncate_name;
use crate::runtime::matcher::MatchTarget;
use crate::runtime::matcher::NOT_FOUND_TEXT;
use crate::runtime::matcher::Resolution;
use crate::runtime::matcher::match_baseline;
use crate::runtime::matcher::match_threshold;
use crate::runtime::normalizer::MetricSource;
use crate::runtime::normalizer::NormalizedConfig;
use crate::runtime::normalizer::normalize_inputs;
use crate::runtime::warnings::FeatureWarnings;
use crate::runtime::warnings::WarningInputs;
use crate::runtime::warnings::resolve_warnings;

// ============================================================================
// SECTION: Cells
// ============================================================================

/// One SLA or baseline cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparisonCell {
    /// Rendered value or sentinel text.
    pub display: String,
    /// Outcome; unknown for sentinel cells.
    pub verdict: Verdict,
    /// Whether a nonzero tolerance is folded into the value.
    pub deviation_shown: bool,
}

impl ComparisonCell {
    /// Builds a sentinel cell.
    fn sentinel(text: &str) -> Self {
        Self {
            display: text.to_string(),
            verdict: Verdict::Unknown,
            deviation_shown: false,
        }
    }

    /// Builds the cell of an unresolved lookup.
    fn unresolved<T>(resolution: &Resolution<T>, feature: Feature) -> Self {
        Self::sentinel(resolution.sentinel(feature).unwrap_or(NOT_FOUND_TEXT))
    }
}

/// Cells of one feature for every metric.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MetricCells {
    /// Response-time cell.
    pub response_time: ComparisonCell,
    /// Error-rate cell.
    pub error_rate: ComparisonCell,
    /// Throughput cell.
    pub throughput: ComparisonCell,
}

impl MetricCells {
    /// Builds the cells from a per-metric constructor.
    fn build(mut cell: impl FnMut(MetricKind) -> ComparisonCell) -> Self {
        Self {
            response_time: cell(MetricKind::ResponseTime),
            error_rate: cell(MetricKind::ErrorRate),
            throughput: cell(MetricKind::Throughput),
        }
    }

    /// Returns the cell of `kind`.
    #[must_use]
    pub const fn get(&self, kind: MetricKind) -> &ComparisonCell {
        match kind {
            MetricKind::ResponseTime => &self.response_time,
            MetricKind::ErrorRate => &self.error_rate,
            MetricKind::Throughput => &self.throughput,
        }
    }
}

// ============================================================================
// SECTION: Rows
// ============================================================================

/// One request-table row.
///
/// # Invariants
/// - `status` is copied verbatim from the input row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportRow {
    /// Request name, truncated for display.
    pub request_name: String,
    /// HTTP method or step type.
    pub method: Option<String>,
    /// True for the backend aggregate row.
    pub is_aggregate: bool,
    /// Upstream status label.
    pub status: Option<String>,
    /// Classified status.
    pub status_class: RowStatus,
    /// Total requests.
    pub total: u64,
    /// Failed requests.
    pub ko: u64,
    /// Current response time at the comparison metric, seconds.
    pub response_time: f64,
    /// Current error rate, percent.
    pub error_rate: f64,
    /// Current throughput, requests per second.
    pub throughput: f64,
    /// SLA cells.
    pub sla: MetricCells,
    /// Baseline cells.
    pub baseline: MetricCells,
}

/// Display options for the assembler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportOptions {
    /// Maximum request-name length before truncation.
    pub max_request_name_chars: usize,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            max_request_name_chars: DEFAULT_MAX_NAME_CHARS,
        }
    }
}

/// Full report produced for the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QualityGateReport {
    /// Percentile response-time comparisons use.
    pub comparison_metric: Percentile,
    /// How the percentile was chosen.
    pub metric_source: MetricSource,
    /// Request table, aggregate first.
    pub rows: Vec<ReportRow>,
    /// Ordered SLA and baseline warnings.
    pub warnings: FeatureWarnings,
    /// SLA comparison counts.
    pub thresholds: ThresholdSummary,
    /// Baseline comparison counts.
    pub baseline: BaselineSummary,
    /// Run error rate over named requests.
    pub run_error_rate: f64,
    /// Gate outcome.
    pub gate: GateStatus,
    /// Headline response-time summary.
    pub headline: Option<HeadlineSummary>,
    /// Current run followed by previous builds, one datapoint each.
    pub trends: Vec<TrendPoint>,
    /// Current run against the most recent previous build.
    pub build_diff: Option<BuildDiff>,
}

// ============================================================================
// SECTION: Assembly
// ============================================================================

/// Resolves the SLA cell of `row` for `metric`.
fn sla_cell(
    config: &NormalizedConfig,
    thresholds: &[ThresholdRecord],
    row: &ResultRow,
    metric: MetricKind,
) -> ComparisonCell {
    if !config.sla.checked {
        return ComparisonCell::sentinel(NOT_FOUND_TEXT);
    }
    let target = MatchTarget::for_row(row);
    let resolution = match_threshold(thresholds, target, metric, config);
    let Resolution::Found(threshold) = resolution else {
        return ComparisonCell::unresolved(&resolution, Feature::Sla);
    };
    let deviation = config.deviation(&target.scope(), metric);
    let percentile = threshold.aggregation.unwrap_or(config.comparison_metric);
    let comparison = compare(
        row.metric_value(metric, percentile),
        threshold.value,
        deviation,
        metric,
        threshold.comparison,
    );
    ComparisonCell {
        display: comparison.limit.to_string(),
        verdict: comparison.verdict,
        deviation_shown: deviation.abs() > 0.0,
    }
}

/// Resolves the baseline cell of `row` for `metric`.
fn baseline_cell(
    config: &NormalizedConfig,
    baseline: &[BaselineRecord],
    row: &ResultRow,
    metric: MetricKind,
) -> ComparisonCell {
    if !config.baseline.checked {
        return ComparisonCell::sentinel(NOT_FOUND_TEXT);
    }
    let target = MatchTarget::for_row(row);
    let resolution = match_baseline(baseline, target, metric, config);
    let Resolution::Found(found) = resolution else {
        return ComparisonCell::unresolved(&resolution, Feature::Baseline);
    };
    let deviation = config.deviation(&target.scope(), metric);
    let comparison = compare(
        row.metric_value(metric, config.comparison_metric),
        found.value,
        deviation,
        metric,
        None,
    );
    ComparisonCell {
        display: comparison.limit.to_string(),
        verdict: comparison.verdict,
        deviation_shown: deviation.abs() > 0.0,
    }
}

/// Builds the display row of `row`.
fn report_row(
    config: &NormalizedConfig,
    inputs: &ReportInputs,
    baseline: &[BaselineRecord],
    options: &ReportOptions,
    row: &ResultRow,
) -> ReportRow {
    ReportRow {
        request_name: truncate_name(row.request_name(), options.max_request_name_chars),
        method: row.method().map(str::to_string),
        is_aggregate: row.is_aggregate_row(),
        status: row.status().map(str::to_string),
        status_class: row.status_class(),
        total: row.total(),
        ko: row.ko(),
        response_time: to_display_units(
            row.percentile(config.comparison_metric),
            MetricKind::ResponseTime,
        ),
        error_rate: row.error_rate(),
        throughput: to_display_units(row.throughput(), MetricKind::Throughput),
        sla: MetricCells::build(|metric| sla_cell(config, &inputs.thresholds, row, metric)),
        baseline: MetricCells::build(|metric| baseline_cell(config, baseline, row, metric)),
    }
}

/// Orders rows aggregate first, then by response time descending.
fn order_rows(left: &ReportRow, right: &ReportRow) -> Ordering {
    right
        .is_aggregate
        .cmp(&left.is_aggregate)
        .then_with(|| right.response_time.total_cmp(&left.response_time))
}

/// Assembles the full report for one run.
#[must_use]
pub fn assemble_report(
    raw: &QualityGateConfig,
    limits: &GateLimits,
    options: &ReportOptions,
    inputs: &ReportInputs,
) -> QualityGateReport {
    let config = normalize_inputs(raw, inputs);
    let baseline = baseline_records(&inputs.baseline);
    let mut rows: Vec<ReportRow> = inputs
        .current
        .iter()
        .map(|row| report_row(&config, inputs, &baseline, options, row))
        .collect();
    rows.sort_by(order_rows);

    let warnings = resolve_warnings(&WarningInputs::new(&config, &inputs.thresholds, &inputs.current));
    let thresholds = evaluate_thresholds(&config, &inputs.thresholds, &inputs.current);
    let baseline_summary = compare_with_baseline(&config, &inputs.baseline, &inputs.current);
    let error_rate = run_error_rate(&inputs.current);
    let gate = evaluate_gate(
        limits,
        error_rate,
        baseline_summary.degradation_rate,
        thresholds.missed_threshold_rate,
    );

    let mut builds = Vec::with_capacity(inputs.builds.len() + 1);
    builds.push(inputs.current.clone());
    builds.extend(inputs.builds.iter().cloned());
    let trends = trend_points(&builds);
    let build_diff = match trends.as_slice() {
        [current, previous, ..] if current.build == 0 => Some(compare_builds(current, previous)),
        _ => None,
    };

    tracing::debug!(
        rows = rows.len(),
        sla_warnings = warnings.sla.len(),
        baseline_warnings = warnings.baseline.len(),
        gate = gate.verdict.as_str(),
        "assembled quality gate report"
    );

    QualityGateReport {
        comparison_metric: config.comparison_metric,
        metric_source: config.metric_source,
        rows,
        warnings,
        thresholds,
        baseline: baseline_summary,
        run_error_rate: error_rate,
        gate,
        headline: headline_summary(&inputs.current, config.comparison_metric),
        trends,
        build_diff,
    }
}
