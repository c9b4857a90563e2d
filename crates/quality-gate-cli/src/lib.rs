// crates/quality-gate-cli/src/lib.rs
// ============================================================================
// Module: Quality Gate CLI Library
// Description: Shared helpers for the quality-gate command-line interface.
// Purpose: Provide reusable components (i18n, text rendering) for the binary and tests.
// Dependencies: quality-gate-core
// ============================================================================

//! ## Overview
//! This library houses shared CLI utilities: the internationalized message
//! catalog and the plain-text report renderer. The binary entry point
//! (`src/main.rs`) imports these helpers to keep all user-facing output
//! consistent.

// ============================================================================
// SECTION: Modules
// ============================================================================

/// Internationalization helpers and message catalog.
pub mod i18n;
/// Plain-text rendering of reports and warnings.
pub mod render;

#[cfg(test)]
mod tests;
