// crates/quality-gate-core/src/lib.rs
// ============================================================================
// Module: Quality Gate Core Library
// Description: Public API surface for the quality-gate comparison engine.
// Purpose: Expose core types and runtime helpers.
// Dependencies: crate::{core, runtime}
// ============================================================================

//! ## Overview
//! Quality gate core decides, for one performance test run, which metrics are
//! compared against SLA thresholds and a baseline run, how tolerances fold
//! into those comparisons, and which configuration warnings to show. It is
//! deterministic and performs no I/O; loading data and rendering reports
//! belong to callers.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod core;
pub mod runtime;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use core::*;

pub use runtime::FeatureWarnings;
pub use runtime::NormalizedConfig;
pub use runtime::QualityGateReport;
pub use runtime::ReportOptions;
pub use runtime::assemble_report;
pub use runtime::exclude_failed;
pub use runtime::normalize;
pub use runtime::resolve_warnings;
