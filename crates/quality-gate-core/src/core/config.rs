// crates/quality-gate-core/src/core/config.rs
// ============================================================================
// Module: Quality Gate Settings
// Description: Raw quality-gate settings as supplied by the test owner.
// Purpose: Model features, sections, per-metric flags, and deviations.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! The raw settings mirror the quality-gate object attached to a test: two
//! feature toggles (SLA and Baseline) and two sections (Summary and
//! Per-request), each section holding three metric flags and three deviation
//! amounts. Every field defaults to "off" or zero so an absent configuration
//! degrades to the all-disabled state instead of failing.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use crate::core::metric::MetricKind;

// ============================================================================
// SECTION: Feature and Section Identifiers
// ============================================================================

/// Comparison feature evaluated by the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    /// Static SLA thresholds.
    Sla,
    /// Prior-run baseline.
    Baseline,
}

impl Feature {
    /// Both features in report order.
    pub const ALL: [Self; 2] = [Self::Sla, Self::Baseline];

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Sla => "SLA",
            Self::Baseline => "Baseline",
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Settings section gating aggregate or per-request comparisons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Section {
    /// Summary results (aggregate "all" scope).
    Summary,
    /// Per-request results (named requests and "every").
    PerRequest,
}

impl Section {
    /// Both sections in report order.
    pub const ALL: [Self; 2] = [Self::Summary, Self::PerRequest];

    /// Returns the display label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Summary => "Summary results",
            Self::PerRequest => "Per request results",
        }
    }

    /// Returns the report area the section governs.
    #[must_use]
    pub const fn area_label(self) -> &'static str {
        match self {
            Self::Summary => "general metrics",
            Self::PerRequest => "individual requests",
        }
    }
}

// ============================================================================
// SECTION: Section Settings
// ============================================================================

/// Per-section metric flags and deviation amounts.
///
/// # Invariants
/// - A section is enabled when at least one flag is set; "enabled" never
///   means "all three flags set".
/// - Response-time deviation is in milliseconds, error-rate deviation in
///   percentage points, throughput deviation in requests per second.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionConfig {
    /// Compare response time.
    pub check_response_time: bool,
    /// Compare error rate.
    pub check_error_rate: bool,
    /// Compare throughput.
    pub check_throughput: bool,
    /// Response-time tolerance in milliseconds.
    pub response_time_deviation: f64,
    /// Error-rate tolerance in percentage points.
    pub error_rate_deviation: f64,
    /// Throughput tolerance in requests per second.
    pub throughput_deviation: f64,
}

impl SectionConfig {
    /// Section with every metric enabled and no deviation.
    pub const FULL: Self = Self {
        check_response_time: true,
        check_error_rate: true,
        check_throughput: true,
        response_time_deviation: 0.0,
        error_rate_deviation: 0.0,
        throughput_deviation: 0.0,
    };

    /// Returns whether `kind` is compared in this section.
    #[must_use]
    pub const fn is_checked(&self, kind: MetricKind) -> bool {
        match kind {
            MetricKind::ResponseTime => self.check_response_time,
            MetricKind::ErrorRate => self.check_error_rate,
            MetricKind::Throughput => self.check_throughput,
        }
    }

    /// Returns the configured deviation for `kind`.
    #[must_use]
    pub const fn deviation(&self, kind: MetricKind) -> f64 {
        match kind {
            MetricKind::ResponseTime => self.response_time_deviation,
            MetricKind::ErrorRate => self.error_rate_deviation,
            MetricKind::Throughput => self.throughput_deviation,
        }
    }

    /// Returns true when at least one metric is enabled.
    #[must_use]
    pub const fn section_enabled(&self) -> bool {
        self.check_response_time || self.check_error_rate || self.check_throughput
    }

    /// Returns true when all three metrics are enabled.
    #[must_use]
    pub const fn fully_enabled(&self) -> bool {
        self.check_response_time && self.check_error_rate && self.check_throughput
    }

    /// Returns the metrics switched off in this section, in display order.
    #[must_use]
    pub fn disabled_metrics(&self) -> Vec<MetricKind> {
        MetricKind::ALL.into_iter().filter(|kind| !self.is_checked(*kind)).collect()
    }

    /// Returns the metrics carrying a nonzero deviation, in display order.
    #[must_use]
    pub fn nonzero_deviations(&self) -> Vec<(MetricKind, f64)> {
        MetricKind::ALL
            .into_iter()
            .map(|kind| (kind, self.deviation(kind)))
            .filter(|(_, amount)| amount.abs() > 0.0)
            .collect()
    }
}

// ============================================================================
// SECTION: Quality Gate Settings
// ============================================================================

/// User toggle for a comparison feature.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureToggle {
    /// Whether the feature is switched on.
    pub checked: bool,
}

/// Section settings shared by both features.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SectionSettings {
    /// Summary (aggregate) section.
    pub summary_results: SectionConfig,
    /// Per-request section.
    pub per_request_results: SectionConfig,
}

/// Raw quality-gate settings.
///
/// # Invariants
/// - `Default` is the all-disabled configuration used when settings are
///   missing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityGateConfig {
    /// SLA feature toggle.
    #[serde(rename = "SLA", alias = "sla")]
    pub sla: FeatureToggle,
    /// Baseline feature toggle.
    pub baseline: FeatureToggle,
    /// Section settings.
    pub settings: SectionSettings,
}

impl QualityGateConfig {
    /// Returns the toggle for `feature`.
    #[must_use]
    pub const fn feature(&self, feature: Feature) -> FeatureToggle {
        match feature {
            Feature::Sla => self.sla,
            Feature::Baseline => self.baseline,
        }
    }

    /// Returns the settings for `section`.
    #[must_use]
    pub const fn section(&self, section: Section) -> &SectionConfig {
        match section {
            Section::Summary => &self.settings.summary_results,
            Section::PerRequest => &self.settings.per_request_results,
        }
    }
}

// ============================================================================
// SECTION: Gate Limits
// ============================================================================

/// Optional run-level limits, all in percent.
///
/// # Invariants
/// - `None` skips the corresponding check.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateLimits {
    /// Maximum run error rate.
    pub error_rate: Option<f64>,
    /// Maximum share of baseline comparisons that may degrade.
    pub performance_degradation_rate: Option<f64>,
    /// Maximum share of SLA checks that may be missed.
    pub missed_thresholds: Option<f64>,
}
