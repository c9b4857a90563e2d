// crates/quality-gate-core/src/runtime/filter.rs
// ============================================================================
// Module: Status Filter
// Description: Removes failed rows before aggregation.
// Purpose: Keep failed steps out of trends, baseline diffs, and summaries.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Only the exact status `FAILED` excludes a row. Lowercase `failed`, a
//! missing status, and any other label are kept and count as unknown. The
//! filter borrows its input and returns references, so rows are never
//! mutated, and the full listing rendered elsewhere is untouched.

use crate::core::ResultRow;
use crate::core::RowStatus;

/// Returns the rows whose status is not exactly `FAILED`, in input order.
#[must_use]
pub fn exclude_failed(rows: &[ResultRow]) -> Vec<&ResultRow> {
    rows.iter().filter(|row| row.status_class() != RowStatus::Failed).collect()
}

