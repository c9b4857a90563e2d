// crates/quality-gate-core/src/runtime/aggregation.rs
// ============================================================================
// Module: Aggregation
// Description: Percentile summaries, trend datapoints, and build diffs.
// Purpose: Compute aggregates from failure-filtered row collections.
// Dependencies: crate::core, crate::runtime::{deviation, filter, format}
// ============================================================================

//! ## Overview
//! Every aggregate here is computed after [`exclude_failed`]: headline
//! percentiles over named requests, one trend datapoint per build from its
//! aggregate row, and signed diffs between two datapoints.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::MetricKind;
use crate::core::Percentile;
use crate::core::ResultRow;
use crate::core::numeric::round2;
use crate::runtime::deviation::to_display_units;
use crate::runtime::filter::exclude_failed;
use crate::runtime::format::signed;

// ============================================================================
// SECTION: Percentiles
// ============================================================================

/// Returns the linearly interpolated `pct` percentile of `values`.
///
/// `pct` is clamped to `0..=100`. Returns `None` for an empty input.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "Rank is non-negative and bounded by the sample count."
)]
pub fn percentile_linear(values: &[f64], pct: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    let rank = pct.clamp(0.0, 100.0) / 100.0 * (sorted.len() - 1) as f64;
    let lower = rank.floor() as usize;
    let upper = rank.ceil() as usize;
    let low = sorted.get(lower).copied()?;
    let high = sorted.get(upper).copied()?;
    Some((high - low).mul_add(rank - rank.floor(), low))
}

/// Headline response-time summary, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeadlineSummary {
    /// Metric the per-request values were read at.
    pub metric: Percentile,
    /// Requests summarized.
    pub requests: usize,
    /// Smallest value.
    pub min: f64,
    /// Arithmetic mean.
    pub mean: f64,
    /// 50th percentile.
    pub pct50: f64,
    /// 75th percentile.
    pub pct75: f64,
    /// 90th percentile.
    pub pct90: f64,
    /// 95th percentile.
    pub pct95: f64,
    /// 99th percentile.
    pub pct99: f64,
    /// Largest value.
    pub max: f64,
}

/// Summarizes per-request response times read at `metric`.
///
/// Failed rows and the aggregate row are skipped. Returns `None` when no
/// named request remains.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Request counts stay far below 2^52.")]
pub fn headline_summary(rows: &[ResultRow], metric: Percentile) -> Option<HeadlineSummary> {
    let values: Vec<f64> = exclude_failed(rows)
        .into_iter()
        .filter(|row| !row.is_aggregate_row())
        .map(|row| to_display_units(row.percentile(metric), MetricKind::ResponseTime))
        .collect();
    let at = |pct: f64| percentile_linear(&values, pct).map(round2);
    Some(HeadlineSummary {
        metric,
        requests: values.len(),
        min: at(0.0)?,
        mean: round2(values.iter().sum::<f64>() / values.len() as f64),
        pct50: at(50.0)?,
        pct75: at(75.0)?,
        pct90: at(90.0)?,
        pct95: at(95.0)?,
        pct99: at(99.0)?,
        max: at(100.0)?,
    })
}

// ============================================================================
// SECTION: Trends
// ============================================================================

/// One build's aggregate datapoint.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TrendPoint {
    /// Position of the build in the input.
    pub build: usize,
    /// Total requests.
    pub total: u64,
    /// Throughput in requests per second.
    pub throughput: f64,
    /// 95th percentile response time in seconds.
    pub pct95: f64,
    /// Error rate in percent.
    pub error_rate: f64,
}

impl TrendPoint {
    /// Captures the datapoint of the build's aggregate row after filtering.
    #[must_use]
    pub fn from_rows(build: usize, rows: &[ResultRow]) -> Option<Self> {
        let aggregate = exclude_failed(rows).into_iter().find(|row| row.is_aggregate_row())?;
        Some(Self {
            build,
            total: aggregate.total(),
            throughput: round2(aggregate.throughput()),
            pct95: to_display_units(aggregate.percentile(Percentile::Pct95), MetricKind::ResponseTime),
            error_rate: aggregate.error_rate(),
        })
    }
}

/// Returns one datapoint per build; builds without an aggregate row are skipped.
#[must_use]
pub fn trend_points(builds: &[Vec<ResultRow>]) -> Vec<TrendPoint> {
    builds.iter().enumerate().filter_map(|(index, rows)| TrendPoint::from_rows(index, rows)).collect()
}

// ============================================================================
// SECTION: Build Comparison
// ============================================================================

/// Metric compared between two builds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendMetric {
    /// Error rate in percent.
    ErrorRate,
    /// Throughput in requests per second.
    Throughput,
    /// Total requests.
    Total,
    /// 95th percentile response time in seconds.
    Pct95,
}

impl TrendMetric {
    /// Returns true when an increase is a regression.
    #[must_use]
    pub const fn increase_regresses(self) -> bool {
        matches!(self, Self::ErrorRate | Self::Pct95)
    }

    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ErrorRate => "error_rate",
            Self::Throughput => "throughput",
            Self::Total => "total",
            Self::Pct95 => "pct95",
        }
    }
}

/// Direction of a build-to-build change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// The change is worse for the metric.
    Regressed,
    /// The change is neutral or better.
    Improved,
}

impl Trend {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Regressed => "regressed",
            Self::Improved => "improved",
        }
    }
}

/// Signed difference of one metric.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricDiff {
    /// Compared metric.
    pub metric: TrendMetric,
    /// `build - reference`, two decimals.
    pub diff: f64,
    /// Rendered diff with a `+` on positive values.
    pub display: String,
    /// Classification of the change.
    pub trend: Trend,
}

impl MetricDiff {
    /// Classifies `diff` for `metric`.
    fn new(metric: TrendMetric, diff: f64) -> Self {
        let diff = round2(diff);
        let regressed = if metric.increase_regresses() { diff > 0.0 } else { diff < 0.0 };
        Self {
            metric,
            diff,
            display: signed(diff),
            trend: if regressed { Trend::Regressed } else { Trend::Improved },
        }
    }
}

/// Diffs between two builds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildDiff {
    /// Build being compared.
    pub build: usize,
    /// Reference build.
    pub reference: usize,
    /// Per-metric differences.
    pub diffs: Vec<MetricDiff>,
}

/// Compares `build` with `reference`.
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Request totals stay far below 2^52.")]
pub fn compare_builds(build: &TrendPoint, reference: &TrendPoint) -> BuildDiff {
    BuildDiff {
        build: build.build,
        reference: reference.build,
        diffs: vec![
            MetricDiff::new(TrendMetric::ErrorRate, build.error_rate - reference.error_rate),
            MetricDiff::new(TrendMetric::Throughput, build.throughput - reference.throughput),
            MetricDiff::new(TrendMetric::Total, build.total as f64 - reference.total as f64),
            MetricDiff::new(TrendMetric::Pct95, build.pct95 - reference.pct95),
        ],
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================
