// crates/quality-gate-core/tests/proptest_filter.rs
// ============================================================================
// Module: Status Filter Property-Based Tests
// Description: Property tests for failed-row exclusion.
// Purpose: Confirm only exact FAILED rows are removed and inputs stay intact.
// ============================================================================

//! Property-based tests for the status filter.

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
use quality_gate_core::ResultRow;
use quality_gate_core::exclude_failed;

fn status_strategy() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("FAILED".to_string())),
        Just(Some("failed".to_string())),
        Just(Some("SUCCESS".to_string())),
        "[A-Za-z]{0,8}".prop_map(Some),
    ]
}

fn rows_strategy() -> impl Strategy<Value = Vec<ResultRow>> {
    prop::collection::vec(("[a-z]{1,6}", status_strategy()), 0 .. 24).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(name, status)| {
                let row = ResultRow::new(name);
                match status {
                    Some(status) => row.with_status(status),
                    None => row,
                }
            })
            .collect()
    })
}

proptest! {
    #[test]
    fn filter_removes_exactly_failed_rows(rows in rows_strategy()) {
        let snapshot = rows.clone();
        let kept = exclude_failed(&rows);
        prop_assert!(kept.len() <= rows.len());
        prop_assert!(kept.iter().all(|row| row.status() != Some("FAILED")));
        let lowercase = rows.iter().filter(|row| row.status() == Some("failed")).count();
        let kept_lowercase = kept.iter().filter(|row| row.status() == Some("failed")).count();
        prop_assert_eq!(lowercase, kept_lowercase);
        let failed = rows.iter().filter(|row| row.status() == Some("FAILED")).count();
        prop_assert_eq!(kept.len() + failed, rows.len());
        prop_assert_eq!(rows, snapshot);
    }
}
