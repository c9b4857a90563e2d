// crates/quality-gate-core/src/runtime/deviation.rs
// ============================================================================
// Module: Deviation Adjuster
// Description: Folds configured tolerance into thresholds and baselines.
// Purpose: Produce lenient comparison values and classify current values.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! For lower-is-better metrics the tolerance is added to the original value;
//! for throughput it is subtracted. Response-time values and deviations are
//! converted from milliseconds to seconds before the tolerance is applied,
//! and every value is rounded to two decimals, so classification and display
//! use the same numbers. Displays always show both values:
//! `"<original> (<adjusted>)"`.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

use crate::core::ComparisonOp;
use crate::core::Direction;
use crate::core::MetricKind;
use crate::core::Verdict;
use crate::core::numeric::MILLIS_PER_SECOND;
use crate::core::numeric::format_decimal;
use crate::core::numeric::round2;

// ============================================================================
// SECTION: Adjustment
// ============================================================================

/// Applies `deviation` to `original` in the metric's lenient direction.
#[must_use]
pub fn apply_deviation(original: f64, deviation: f64, kind: MetricKind) -> f64 {
    match kind.direction() {
        Direction::LowerIsBetter => original + deviation,
        Direction::HigherIsBetter => original - deviation,
    }
}

/// Classifies `current` against an adjusted limit.
#[must_use]
pub fn classify(current: f64, adjusted: f64, kind: MetricKind) -> Verdict {
    match kind.direction() {
        Direction::LowerIsBetter => Verdict::from(current <= adjusted),
        Direction::HigherIsBetter => Verdict::from(current >= adjusted),
    }
}

/// Converts an upstream value to display units, rounded to two decimals.
///
/// Response time goes from milliseconds to seconds.
#[must_use]
pub fn to_display_units(value: f64, kind: MetricKind) -> f64 {
    match kind {
        MetricKind::ResponseTime => round2(value / MILLIS_PER_SECOND),
        MetricKind::ErrorRate | MetricKind::Throughput => round2(value),
    }
}

/// Converts a deviation amount to display units without rounding.
fn deviation_in_display_units(deviation: f64, kind: MetricKind) -> f64 {
    match kind {
        MetricKind::ResponseTime => deviation / MILLIS_PER_SECOND,
        MetricKind::ErrorRate | MetricKind::Throughput => deviation,
    }
}

// ============================================================================
// SECTION: Adjusted Value
// ============================================================================

/// Original and deviation-adjusted limit, both in display units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct AdjustedValue {
    /// Original limit.
    pub original: f64,
    /// Limit after the tolerance.
    pub adjusted: f64,
}

impl fmt::Display for AdjustedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", format_decimal(self.original), format_decimal(self.adjusted))
    }
}

/// Result of comparing a current value with an adjusted limit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Comparison {
    /// Limit in display units.
    pub limit: AdjustedValue,
    /// Current value in display units.
    pub current: f64,
    /// Outcome.
    pub verdict: Verdict,
}

/// Adjusts `original` by `deviation` and classifies `current`.
///
/// All inputs are upstream units. With `operator` unset the metric direction
/// decides both the deviation sign and the comparison; an explicit operator
/// decides them instead.
#[must_use]
pub fn compare(
    current: f64,
    original: f64,
    deviation: f64,
    kind: MetricKind,
    operator: Option<ComparisonOp>,
) -> Comparison {
    let current = to_display_units(current, kind);
    let limit_raw = match kind {
        MetricKind::ResponseTime => original / MILLIS_PER_SECOND,
        MetricKind::ErrorRate | MetricKind::Throughput => original,
    };
    let deviation = deviation_in_display_units(deviation, kind);
    let (adjusted, verdict) = match operator {
        None => {
            let adjusted = round2(apply_deviation(limit_raw, deviation, kind));
            (adjusted, classify(current, adjusted, kind))
        }
        Some(op) => {
            let adjusted = round2(op.adjust(limit_raw, deviation));
            (adjusted, Verdict::from(!op.is_violated(current, adjusted)))
        }
    };
    Comparison {
        limit: AdjustedValue {
            original: round2(limit_raw),
            adjusted,
        },
        current,
        verdict,
    }
}
