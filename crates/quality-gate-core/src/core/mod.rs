// crates/quality-gate-core/src/core/mod.rs
// ============================================================================
// Module: Quality Gate Core Types
// Description: Data model for quality-gate comparisons.
// Purpose: Provide stable, serializable types for settings, records, and warnings.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Core types describe the quality-gate settings, the upstream records the
//! engine reads (thresholds, result rows, baseline rows), and the outputs it
//! produces (verdicts and warning entries).

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod config;
pub mod metric;
pub mod numeric;
pub mod records;
pub mod scope;
pub mod verdict;
pub mod warning;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::Feature;
pub use config::FeatureToggle;
pub use config::GateLimits;
pub use config::QualityGateConfig;
pub use config::Section;
pub use config::SectionConfig;
pub use config::SectionSettings;
pub use metric::ComparisonOp;
pub use metric::Direction;
pub use metric::MetricKind;
pub use metric::Percentile;
pub use records::BaselineRecord;
pub use records::InputError;
pub use records::ReportInputs;
pub use records::ResultRow;
pub use records::RowStatus;
pub use records::ThresholdRecord;
pub use scope::Scope;
pub use verdict::Verdict;
pub use warning::ComparisonNote;
pub use warning::CoverageCase;
pub use warning::WarningClass;
pub use warning::WarningCode;
pub use warning::WarningEntry;
