// crates/quality-gate-core/src/core/warning.rs
// ============================================================================
// Module: Warning Entries
// Description: Warning codes, classes, and entries produced per feature.
// Purpose: Give every configuration warning a stable identity and class.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! Each warning carries a [`WarningCode`] identifying the rule that produced
//! it, a [`WarningClass`] that fixes its position in the output, and the
//! rendered message. Codes are stable identifiers so callers and tests can
//! assert on rules rather than on message wording.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::config::Feature;
use crate::core::config::Section;

// ============================================================================
// SECTION: Warning Class
// ============================================================================

/// Output class of a warning.
///
/// # Invariants
/// - Declaration order is output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningClass {
    /// The single highest-precedence configuration-state warning.
    Priority,
    /// Supplementary warnings about hidden sections and scope coverage.
    Additional,
    /// Descriptive notes about disabled metrics and the comparison metric.
    Informational,
    /// Notice that a tolerance is folded into comparisons.
    Deviation,
}

// ============================================================================
// SECTION: Warning Code
// ============================================================================

/// Scope-coverage case for SLA response-time thresholds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CoverageCase {
    /// `every` present, `all` missing, named requests not fully covered.
    EveryWithoutAll,
    /// `every` present, `all` missing, every request also has its own threshold.
    EveryAndNamedWithoutAll,
    /// Only named thresholds, covering every request; `all` missing.
    NamedCompleteWithoutAll,
    /// Only named thresholds, some requests uncovered; `all` missing.
    NamedPartialWithoutAll,
    /// `all` present, some requests without any per-request threshold.
    AllWithUncoveredRequests,
}

impl CoverageCase {
    /// Returns the catalog key of the case message.
    #[must_use]
    pub const fn message_key(self) -> &'static str {
        match self {
            Self::EveryWithoutAll => "sla.scope.every_without_all",
            Self::EveryAndNamedWithoutAll => "sla.scope.every_and_named_without_all",
            Self::NamedCompleteWithoutAll => "sla.scope.named_complete_without_all",
            Self::NamedPartialWithoutAll => "sla.scope.named_partial_without_all",
            Self::AllWithUncoveredRequests => "sla.scope.all_with_uncovered_requests",
        }
    }
}

/// Comparison-metric note variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComparisonNote {
    /// Per-request results are off, so the resolved percentile is used as is.
    PerRequestOff,
    /// Thresholds exist for the selected percentile.
    Configured,
    /// No threshold for the selected percentile, but others exist.
    OtherPercentilesOnly,
    /// No response-time SLA exists at all.
    NoResponseTimeSla,
}

/// Identity of the rule that produced a warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "rule", content = "detail", rename_all = "snake_case")]
pub enum WarningCode {
    /// Feature unchecked while data exists.
    DisabledWithData,
    /// Baseline checked without a baseline run.
    NoBaselineRun,
    /// Feature checked with both sections fully off.
    SettingsDisabled,
    /// SLA checked without any threshold.
    NoThresholds,
    /// Summary fully on, Per-request fully off.
    PerRequestDisabled,
    /// Summary fully off, Per-request fully on.
    SummaryDisabled,
    /// SLA response-time scope coverage is incomplete.
    ScopeCoverage(CoverageCase),
    /// Several SLA response-time percentiles with Per-request response time off.
    MultiplePercentiles,
    /// A section is fully off and its cells show the disabled placeholder.
    SectionOff(Section),
    /// Individually disabled metrics in enabled sections.
    DisabledMetrics,
    /// Which percentile response-time comparisons use.
    ComparisonMetric(ComparisonNote),
    /// Nonzero deviation configured.
    DeviationApplied,
}

impl WarningCode {
    /// Returns the ladder rank of Priority-ladder rules (`None` otherwise).
    #[must_use]
    pub const fn ladder_rank(self) -> Option<&'static str> {
        match self {
            Self::DisabledWithData => Some("0"),
            Self::NoBaselineRun => Some("0b"),
            Self::SettingsDisabled => Some("1"),
            Self::NoThresholds => Some("2"),
            Self::PerRequestDisabled => Some("3j"),
            Self::SummaryDisabled => Some("3"),
            Self::ScopeCoverage(_) => Some("4"),
            Self::MultiplePercentiles => Some("5"),
            Self::SectionOff(_)
            | Self::DisabledMetrics
            | Self::ComparisonMetric(_)
            | Self::DeviationApplied => None,
        }
    }
}

// ============================================================================
// SECTION: Warning Entry
// ============================================================================

/// One rendered warning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WarningEntry {
    /// Feature the warning belongs to.
    pub feature: Feature,
    /// Output class.
    pub class: WarningClass,
    /// Producing rule.
    pub code: WarningCode,
    /// Rendered message text.
    pub message: String,
}
