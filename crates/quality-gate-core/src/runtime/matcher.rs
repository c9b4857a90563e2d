// crates/quality-gate-core/src/runtime/matcher.rs
// ============================================================================
// Module: Threshold and Baseline Matcher
// Description: Resolves the SLA threshold or baseline value for a table cell.
// Purpose: Apply scope-specific lookup and fallback rules.
// Dependencies: crate::core, crate::runtime::normalizer
// ============================================================================

//! ## Overview
//! Aggregate cells (general metrics and the request table's aggregate row)
//! only accept thresholds whose scope is exactly `all`. Named-request cells
//! try the request's own threshold, then the `every` default, and never fall
//! back to `all`. Before any lookup the governing section flag for the metric
//! is checked; a disabled flag yields [`Resolution::SectionDisabled`] even when
//! a threshold exists.
//!
//! Baseline lookup ignores scopes: the aggregate cell reads the baseline's
//! aggregate row, a named cell reads the baseline row with the same name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::core::BaselineRecord;
use crate::core::Feature;
use crate::core::MetricKind;
use crate::core::ResultRow;
use crate::core::Scope;
use crate::core::Section;
use crate::core::ThresholdRecord;
use crate::runtime::normalizer::NormalizedConfig;

// ============================================================================
// SECTION: Sentinels
// ============================================================================

/// Placeholder for a cell without matching data.
pub const NOT_FOUND_TEXT: &str = "N/A";
/// Placeholder for a named request without any applicable SLA.
pub const UNSET_TEXT: &str = "Set SLA";
/// Placeholder for an SLA cell whose section flag is off.
pub const SLA_DISABLED_TEXT: &str = "SLA disabled";
/// Placeholder for a baseline cell whose section flag is off.
pub const BASELINE_DISABLED_TEXT: &str = "Baseline disabled";

// ============================================================================
// SECTION: Types
// ============================================================================

/// Table cell being resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchTarget<'a> {
    /// Aggregate cell (general metrics or the aggregate row).
    Aggregate,
    /// Named request cell.
    Request(&'a str),
}

impl<'a> MatchTarget<'a> {
    /// Returns the target for a result row.
    #[must_use]
    pub fn for_row(row: &'a ResultRow) -> Self {
        if row.is_aggregate_row() { Self::Aggregate } else { Self::Request(row.request_name()) }
    }

    /// Returns the section governing the target.
    #[must_use]
    pub const fn section(self) -> Section {
        match self {
            Self::Aggregate => Section::Summary,
            Self::Request(_) => Section::PerRequest,
        }
    }

    /// Returns the scope deviations are read for.
    #[must_use]
    pub fn scope(self) -> Scope {
        match self {
            Self::Aggregate => Scope::Aggregate,
            Self::Request(name) => Scope::Named(name.to_string()),
        }
    }
}

/// Outcome of a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "outcome", content = "value", rename_all = "snake_case")]
pub enum Resolution<T> {
    /// A value was resolved.
    Found(T),
    /// No matching record.
    NotFound,
    /// The governing section flag is off.
    SectionDisabled,
    /// A named request has no applicable SLA.
    Unset,
}

impl<T> Resolution<T> {
    /// Returns the resolved value.
    #[must_use]
    pub const fn found(&self) -> Option<&T> {
        match self {
            Self::Found(value) => Some(value),
            Self::NotFound | Self::SectionDisabled | Self::Unset => None,
        }
    }

    /// Returns the placeholder rendered instead of a value.
    #[must_use]
    pub const fn sentinel(&self, feature: Feature) -> Option<&'static str> {
        match self {
            Self::Found(_) => None,
            Self::NotFound => Some(NOT_FOUND_TEXT),
            Self::Unset => Some(UNSET_TEXT),
            Self::SectionDisabled => Some(match feature {
                Feature::Sla => SLA_DISABLED_TEXT,
                Feature::Baseline => BASELINE_DISABLED_TEXT,
            }),
        }
    }
}

/// Baseline value resolved for a cell.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BaselineMatch<'a> {
    /// Source baseline row.
    pub record: &'a BaselineRecord,
    /// Value in upstream units.
    pub value: f64,
}

// ============================================================================
// SECTION: Threshold Matching
// ============================================================================

/// Resolves the SLA threshold for a cell.
#[must_use]
pub fn match_threshold<'a>(
    thresholds: &'a [ThresholdRecord],
    target: MatchTarget<'_>,
    metric: MetricKind,
    config: &NormalizedConfig,
) -> Resolution<&'a ThresholdRecord> {
    if !config.section(target.section()).is_checked(metric) {
        return Resolution::SectionDisabled;
    }
    let mut candidates = thresholds.iter().filter(|threshold| {
        threshold.target == metric && threshold.applies_to_percentile(config.comparison_metric)
    });
    match target {
        MatchTarget::Aggregate => candidates
            .find(|threshold| threshold.scope().is_aggregate())
            .map_or(Resolution::NotFound, Resolution::Found),
        MatchTarget::Request(name) => {
            let candidates: Vec<&ThresholdRecord> = candidates.collect();
            let exact = candidates
                .iter()
                .find(|threshold| threshold.scope().request_name() == Some(name));
            let fallback = || candidates.iter().find(|threshold| threshold.scope().is_per_request());
            exact.or_else(fallback).map_or(Resolution::Unset, |threshold| Resolution::Found(*threshold))
        }
    }
}

/// Returns every `all` threshold that applies to an aggregate cell.
///
/// Gate counting checks the aggregate row against each of them; the report
/// cell shows the first, as [`match_threshold`] does.
#[must_use]
pub fn aggregate_thresholds<'a>(
    thresholds: &'a [ThresholdRecord],
    metric: MetricKind,
    config: &NormalizedConfig,
) -> Vec<&'a ThresholdRecord> {
    if !config.summary.is_checked(metric) {
        return Vec::new();
    }
    thresholds
        .iter()
        .filter(|threshold| {
            threshold.target == metric
                && threshold.applies_to_percentile(config.comparison_metric)
                && threshold.scope().is_aggregate()
        })
        .collect()
}

// ============================================================================
// SECTION: Baseline Matching
// ============================================================================

/// Resolves the baseline value for a cell.
#[must_use]
pub fn match_baseline<'a>(
    baseline: &'a [BaselineRecord],
    target: MatchTarget<'_>,
    metric: MetricKind,
    config: &NormalizedConfig,
) -> Resolution<BaselineMatch<'a>> {
    if !config.section(target.section()).is_checked(metric) {
        return Resolution::SectionDisabled;
    }
    let record = match target {
        MatchTarget::Aggregate => baseline.iter().find(|record| record.is_aggregate_row()),
        MatchTarget::Request(name) => baseline.iter().find(|record| record.request_name == name),
    };
    record
        .and_then(|record| {
            record.value(metric, config.comparison_metric).map(|value| BaselineMatch {
                record,
                value,
            })
        })
        .map_or(Resolution::NotFound, Resolution::Found)
}
