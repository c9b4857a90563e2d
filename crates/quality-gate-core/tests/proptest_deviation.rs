// crates/quality-gate-core/tests/proptest_deviation.rs
// ============================================================================
// Module: Deviation Property-Based Tests
// Description: Property tests for deviation monotonicity and display.
// Purpose: Ensure tolerance only ever relaxes limits in the metric direction.
// ============================================================================

//! Property-based tests for the deviation adjuster.

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
use quality_gate_core::MetricKind;
use quality_gate_core::Verdict;
use quality_gate_core::runtime::apply_deviation;
use quality_gate_core::runtime::compare;

fn kind_strategy() -> impl Strategy<Value = MetricKind> {
    prop_oneof![
        Just(MetricKind::ResponseTime),
        Just(MetricKind::ErrorRate),
        Just(MetricKind::Throughput),
    ]
}

proptest! {
    #[test]
    fn apply_deviation_is_monotonic(
        kind in kind_strategy(),
        original in 0.0_f64 .. 1.0e6,
        low in 0.0_f64 .. 1.0e4,
        extra in 0.0_f64 .. 1.0e4,
    ) {
        let small = apply_deviation(original, low, kind);
        let large = apply_deviation(original, low + extra, kind);
        match kind {
            MetricKind::Throughput => prop_assert!(large <= small),
            MetricKind::ResponseTime | MetricKind::ErrorRate => prop_assert!(large >= small),
        }
    }

    #[test]
    fn zero_deviation_displays_equal_values(kind in kind_strategy(), original in 0.0_f64 .. 1.0e6) {
        let comparison = compare(original, original, 0.0, kind, None);
        let display = comparison.limit.to_string();
        let (left, right) = display.split_once(" (").expect("display shape");
        prop_assert_eq!(format!("{left})"), right.to_string());
    }

    #[test]
    fn larger_deviation_never_turns_pass_into_fail(
        kind in kind_strategy(),
        current in 0.0_f64 .. 1.0e5,
        original in 0.0_f64 .. 1.0e5,
        low in 0.0_f64 .. 1.0e3,
        extra in 0.0_f64 .. 1.0e3,
    ) {
        let strict = compare(current, original, low, kind, None);
        let lenient = compare(current, original, low + extra, kind, None);
        if strict.verdict == Verdict::Pass {
            prop_assert_eq!(lenient.verdict, Verdict::Pass);
        }
    }
}
