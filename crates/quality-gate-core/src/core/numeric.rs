// crates/quality-gate-core/src/core/numeric.rs
// ============================================================================
// Module: Numeric Helpers
// Description: Two-decimal rounding and decimal rendering.
// Purpose: Keep every comparison and display on the same rounded values.
// Dependencies: None
// ============================================================================

//! ## Overview
//! Comparisons are made on values rounded to two decimals, and displayed
//! values always carry at least one fractional digit (`1.0`, `1.25`).

/// Milliseconds per second for response-time conversion.
pub const MILLIS_PER_SECOND: f64 = 1000.0;

/// Rounds to two decimal places, half away from zero.
#[must_use]
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Returns `part / whole * 100` rounded to two decimals (0 when `whole` is 0).
#[must_use]
#[allow(clippy::cast_precision_loss, reason = "Counts stay far below 2^52.")]
pub fn percent_of(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    round2(part as f64 / whole as f64 * 100.0)
}

/// Renders a decimal with its shortest form, keeping at least one fractional digit.
#[must_use]
pub fn format_decimal(value: f64) -> String {
    let rendered = value.to_string();
    if !value.is_finite() || rendered.contains('.') || rendered.contains('e') {
        return rendered;
    }
    format!("{rendered}.0")
}
