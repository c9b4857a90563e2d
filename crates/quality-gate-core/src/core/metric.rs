// crates/quality-gate-core/src/core/metric.rs
// ============================================================================
// Module: Metric Vocabulary
// Description: Metric kinds, directions, percentiles, and comparison operators.
// Purpose: Give every comparison a typed metric and a fixed direction.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A quality-gate comparison always concerns one of three metric kinds. The
//! kind fixes the direction ("lower is better" or "higher is better"), and the
//! direction fixes both the deviation sign and the pass/fail operator.
//! Response-time values are further qualified by a [`Percentile`].

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Metric Kind
// ============================================================================

/// Metric compared by a quality-gate check.
///
/// # Invariants
/// - `ResponseTime` and `ErrorRate` are lower-is-better; `Throughput` is
///   higher-is-better.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricKind {
    /// Response time in milliseconds upstream, seconds on display.
    ResponseTime,
    /// Error rate in percent.
    ErrorRate,
    /// Throughput in requests per second.
    Throughput,
}

impl MetricKind {
    /// All metric kinds in display order.
    pub const ALL: [Self; 3] = [Self::ResponseTime, Self::ErrorRate, Self::Throughput];

    /// Returns the comparison direction for the metric.
    #[must_use]
    pub const fn direction(self) -> Direction {
        match self {
            Self::ResponseTime | Self::ErrorRate => Direction::LowerIsBetter,
            Self::Throughput => Direction::HigherIsBetter,
        }
    }

    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ResponseTime => "response_time",
            Self::ErrorRate => "error_rate",
            Self::Throughput => "throughput",
        }
    }

    /// Returns the human-readable label used in warning text.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ResponseTime => "Response time",
            Self::ErrorRate => "Error rate",
            Self::Throughput => "Throughput",
        }
    }

    /// Returns the display unit suffix for deviation amounts.
    #[must_use]
    pub const fn deviation_unit(self) -> &'static str {
        match self {
            Self::ResponseTime => "ms",
            Self::ErrorRate => "%",
            Self::Throughput => " req/s",
        }
    }
}

impl fmt::Display for MetricKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Comparison direction of a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Smaller current values are better.
    LowerIsBetter,
    /// Larger current values are better.
    HigherIsBetter,
}

// ============================================================================
// SECTION: Percentile
// ============================================================================

/// Response-time aggregation selected for comparisons.
///
/// # Invariants
/// - `avg` deserialises to [`Percentile::Mean`].
/// - Only the five ranked variants take part in automatic selection.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Percentile {
    /// Minimum observed value.
    Min,
    /// Arithmetic mean.
    #[serde(alias = "avg")]
    Mean,
    /// 50th percentile.
    Pct50,
    /// 75th percentile.
    Pct75,
    /// 90th percentile.
    Pct90,
    /// 95th percentile.
    #[default]
    Pct95,
    /// 99th percentile.
    Pct99,
    /// Maximum observed value.
    Max,
}

impl Percentile {
    /// Default comparison percentile.
    pub const DEFAULT: Self = Self::Pct95;

    /// Ranked percentiles, best first, used when several are configured.
    pub const RANKED: [Self; 5] = [Self::Pct99, Self::Pct95, Self::Pct90, Self::Pct50, Self::Mean];

    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Min => "min",
            Self::Mean => "mean",
            Self::Pct50 => "pct50",
            Self::Pct75 => "pct75",
            Self::Pct90 => "pct90",
            Self::Pct95 => "pct95",
            Self::Pct99 => "pct99",
            Self::Max => "max",
        }
    }

    /// Returns the selection rank (0 is best) for ranked percentiles.
    #[must_use]
    pub fn rank(self) -> Option<usize> {
        Self::RANKED.iter().position(|candidate| *candidate == self)
    }

    /// Parses a wire label (`avg` is accepted for `mean`).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "min" => Some(Self::Min),
            "mean" | "avg" => Some(Self::Mean),
            "pct50" => Some(Self::Pct50),
            "pct75" => Some(Self::Pct75),
            "pct90" => Some(Self::Pct90),
            "pct95" => Some(Self::Pct95),
            "pct99" => Some(Self::Pct99),
            "max" => Some(Self::Max),
            _ => None,
        }
    }
}

impl fmt::Display for Percentile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// SECTION: Comparison Operator
// ============================================================================

/// Violation operator attached to an SLA threshold.
///
/// A threshold is violated when `current OP adjusted` holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonOp {
    /// Violated when current is greater than the threshold.
    Gt,
    /// Violated when current is greater than or equal to the threshold.
    Gte,
    /// Violated when current is less than the threshold.
    Lt,
    /// Violated when current is less than or equal to the threshold.
    Lte,
    /// Violated when current equals the threshold.
    Eq,
}

impl ComparisonOp {
    /// Returns the operator implied by a metric's direction.
    #[must_use]
    pub const fn default_for(kind: MetricKind) -> Self {
        match kind.direction() {
            Direction::LowerIsBetter => Self::Gt,
            Direction::HigherIsBetter => Self::Lt,
        }
    }

    /// Folds a deviation into the threshold according to the operator.
    #[must_use]
    pub fn adjust(self, threshold: f64, deviation: f64) -> f64 {
        match self {
            Self::Gt | Self::Gte => threshold + deviation,
            Self::Lt | Self::Lte => threshold - deviation,
            Self::Eq => threshold,
        }
    }

    /// Returns the sign [`ComparisonOp::adjust`] applies to a deviation.
    ///
    /// `eq` ignores the deviation and has no sign.
    #[must_use]
    pub const fn deviation_sign(self) -> Option<&'static str> {
        match self {
            Self::Gt | Self::Gte => Some("+"),
            Self::Lt | Self::Lte => Some("-"),
            Self::Eq => None,
        }
    }

    /// Returns true when `current` violates `threshold`.
    #[must_use]
    #[allow(clippy::float_cmp, reason = "Equality operator compares rounded display values.")]
    pub fn is_violated(self, current: f64, threshold: f64) -> bool {
        match self {
            Self::Gt => current > threshold,
            Self::Gte => current >= threshold,
            Self::Lt => current < threshold,
            Self::Lte => current <= threshold,
            Self::Eq => current == threshold,
        }
    }

    /// Returns the stable wire label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Gt => "gt",
            Self::Gte => "gte",
            Self::Lt => "lt",
            Self::Lte => "lte",
            Self::Eq => "eq",
        }
    }
}
