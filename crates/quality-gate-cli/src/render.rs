// crates/quality-gate-cli/src/render.rs
// ============================================================================
// Module: CLI Text Rendering
// Description: Plain-text rendering of quality-gate reports and warnings.
// Purpose: Turn an assembled report into localized terminal lines.
// Dependencies: quality-gate-core
// ============================================================================

//! ## Overview
//! Renders a [`QualityGateReport`] as a list of lines for `--format text`.
//! Rendering is pure: callers decide where the lines go. Counts use the
//! `K`/`M` compaction of the engine's display helpers, and cells show the
//! engine's rendered text verbatim so sentinels stay recognizable.

// ============================================================================
// SECTION: Imports
// ============================================================================

use quality_gate_core::Feature;
use quality_gate_core::FeatureWarnings;
use quality_gate_core::QualityGateReport;
use quality_gate_core::WarningClass;
use quality_gate_core::WarningEntry;
use quality_gate_core::core::numeric::format_decimal;
use quality_gate_core::runtime::MetricCells;
use quality_gate_core::runtime::ReportRow;
use quality_gate_core::runtime::format::stringify_number;

use crate::t;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Status label for rows without an upstream status.
const MISSING_STATUS: &str = "-";
/// Counts below this render as plain integers.
const COMPACT_COUNT_FROM: u64 = 1000;

// ============================================================================
// SECTION: Warnings
// ============================================================================

/// Returns the label of a warning class.
#[must_use]
pub const fn class_label(class: WarningClass) -> &'static str {
    match class {
        WarningClass::Priority => "priority",
        WarningClass::Additional => "additional",
        WarningClass::Informational => "info",
        WarningClass::Deviation => "deviation",
    }
}

/// Renders one feature's warning list.
fn feature_warning_lines(feature: Feature, entries: &[WarningEntry], lines: &mut Vec<String>) {
    lines.push(t!("warnings.heading", feature = feature.label()));
    if entries.is_empty() {
        lines.push(t!("warnings.none"));
        return;
    }
    for entry in entries {
        lines.push(t!("warnings.entry", class = class_label(entry.class), message = entry.message));
    }
}

/// Renders both warning lists, SLA first.
#[must_use]
pub fn warning_lines(warnings: &FeatureWarnings) -> Vec<String> {
    let mut lines = Vec::new();
    feature_warning_lines(Feature::Sla, &warnings.sla, &mut lines);
    feature_warning_lines(Feature::Baseline, &warnings.baseline, &mut lines);
    lines
}

// ============================================================================
// SECTION: Report
// ============================================================================

/// Renders a request count, compacting large values.
fn count_label(count: u64) -> String {
    if count < COMPACT_COUNT_FROM {
        return count.to_string();
    }
    #[allow(clippy::cast_precision_loss, reason = "Compacted counts keep two decimals.")]
    let value = count as f64;
    stringify_number(value)
}

/// Renders the cells of one feature.
fn cell_line(feature: Feature, cells: &MetricCells) -> String {
    t!(
        "report.cells",
        feature = feature.label(),
        response_time = cells.response_time.display,
        error_rate = cells.error_rate.display,
        throughput = cells.throughput.display
    )
}

/// Renders one request-table row and its cells.
fn row_lines(row: &ReportRow, lines: &mut Vec<String>) {
    lines.push(t!(
        "report.row",
        name = row.request_name,
        status = row.status.as_deref().unwrap_or(MISSING_STATUS),
        total = count_label(row.total),
        ko = count_label(row.ko),
        response_time = format_decimal(row.response_time),
        error_rate = format_decimal(row.error_rate),
        throughput = format_decimal(row.throughput)
    ));
    lines.push(cell_line(Feature::Sla, &row.sla));
    lines.push(cell_line(Feature::Baseline, &row.baseline));
}

/// Renders a full report.
#[must_use]
pub fn report_lines(report: &QualityGateReport) -> Vec<String> {
    let mut lines = vec![t!(
        "report.header",
        metric = report.comparison_metric.as_str(),
        source = report.metric_source.as_str()
    )];
    for row in &report.rows {
        row_lines(row, &mut lines);
    }
    lines.extend(warning_lines(&report.warnings));
    lines.push(t!(
        "report.sla_summary",
        violated = report.thresholds.violated,
        checked = report.thresholds.checked,
        rate = format_decimal(report.thresholds.missed_threshold_rate)
    ));
    lines.push(t!(
        "report.baseline_summary",
        violated = report.baseline.violated,
        checked = report.baseline.comparisons,
        rate = format_decimal(report.baseline.degradation_rate)
    ));
    lines.push(t!("report.run_error_rate", rate = format_decimal(report.run_error_rate)));
    if let Some(headline) = &report.headline {
        lines.push(t!(
            "report.headline",
            metric = headline.metric.as_str(),
            requests = headline.requests,
            min = format_decimal(headline.min),
            mean = format_decimal(headline.mean),
            pct95 = format_decimal(headline.pct95),
            max = format_decimal(headline.max)
        ));
    }
    for point in &report.trends {
        lines.push(t!(
            "report.trend",
            build = point.build,
            total = count_label(point.total),
            throughput = format_decimal(point.throughput),
            pct95 = format_decimal(point.pct95),
            error_rate = format_decimal(point.error_rate)
        ));
    }
    if let Some(diff) = &report.build_diff {
        for metric in &diff.diffs {
            lines.push(t!(
                "report.diff",
                build = diff.build,
                reference = diff.reference,
                metric = metric.metric.as_str(),
                diff = metric.display,
                trend = metric.trend.as_str()
            ));
        }
    }
    if report.gate.verdict.is_fail() {
        lines.push(t!("gate.fail"));
        for reason in &report.gate.reasons {
            lines.push(t!("gate.reason", reason = reason));
        }
    } else {
        lines.push(t!("gate.pass"));
    }
    lines
}
