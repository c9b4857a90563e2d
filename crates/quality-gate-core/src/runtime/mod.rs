// crates/quality-gate-core/src/runtime/mod.rs
// ============================================================================
// Module: Quality Gate Runtime
// Description: Comparison engine, warning resolver, and report assembly.
// Purpose: Evaluate a performance run against SLA thresholds and a baseline.
// Dependencies: crate::core, tracing
// ============================================================================

//! ## Overview
//! Runtime modules are pure functions over immutable inputs. The normalizer
//! feeds the matcher, the deviation adjuster, and the warning resolver; the
//! assembler combines them into one report. The status filter runs wherever
//! aggregates are computed from row collections.

// ============================================================================
// SECTION: Submodules
// ============================================================================

pub mod aggregation;
pub mod assembler;
pub mod catalog;
pub mod deviation;
pub mod evaluation;
pub mod filter;
pub mod format;
pub mod matcher;
pub mod normalizer;
pub mod warnings;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use aggregation::BuildDiff;
pub use aggregation::HeadlineSummary;
pub use aggregation::MetricDiff;
pub use aggregation::Trend;
pub use aggregation::TrendMetric;
pub use aggregation::TrendPoint;
pub use aggregation::compare_builds;
pub use aggregation::headline_summary;
pub use aggregation::percentile_linear;
pub use aggregation::trend_points;
pub use assembler::ComparisonCell;
pub use assembler::MetricCells;
pub use assembler::QualityGateReport;
pub use assembler::ReportOptions;
pub use assembler::ReportRow;
pub use assembler::assemble_report;
pub use deviation::AdjustedValue;
pub use deviation::Comparison;
pub use deviation::apply_deviation;
pub use deviation::classify;
pub use deviation::compare;
pub use evaluation::BaselineSummary;
pub use evaluation::GateStatus;
pub use evaluation::ThresholdSummary;
pub use evaluation::Violation;
pub use evaluation::compare_with_baseline;
pub use evaluation::evaluate_gate;
pub use evaluation::evaluate_thresholds;
pub use evaluation::run_error_rate;
pub use filter::exclude_failed;
pub use matcher::BaselineMatch;
pub use matcher::MatchTarget;
pub use matcher::Resolution;
pub use matcher::aggregate_thresholds;
pub use matcher::match_baseline;
pub use matcher::match_threshold;
pub use normalizer::FeatureState;
pub use normalizer::MetricSource;
pub use normalizer::NormalizedConfig;
pub use normalizer::normalize;
pub use normalizer::normalize_inputs;
pub use warnings::FeatureWarnings;
pub use warnings::WarningInputs;
pub use warnings::resolve_feature_warnings;
pub use warnings::resolve_warnings;
