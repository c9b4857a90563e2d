// crates/quality-gate-core/src/runtime/normalizer.rs
// ============================================================================
// Module: Configuration Normalizer
// Description: Normalized view of quality-gate settings and data presence.
// Purpose: Resolve feature/section enablement and the comparison percentile.
// Dependencies: crate::core, tracing
// ============================================================================

//! ## Overview
//! The normalizer folds raw settings and the presence of thresholds and
//! baseline rows into a [`NormalizedConfig`]. It never fails: missing
//! settings produce the all-disabled view.
//!
//! The comparison percentile is resolved in this order, first match wins:
//! 1. explicit user selection, honoured only when Per-request is enabled;
//! 2. the single configured SLA response-time percentile, when it differs
//!    from the default;
//! 3. with several SLA percentiles and Per-request disabled, the highest
//!    ranked of pct99, pct95, pct90, pct50, mean;
//! 4. pct95.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::Feature;
use crate::core::MetricKind;
use crate::core::Percentile;
use crate::core::QualityGateConfig;
use crate::core::ReportInputs;
use crate::core::ResultRow;
use crate::core::Scope;
use crate::core::Section;
use crate::core::SectionConfig;
use crate::core::ThresholdRecord;

// ============================================================================
// SECTION: Types
// ============================================================================

/// How the comparison percentile was chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricSource {
    /// User selection with Per-request enabled.
    Explicit,
    /// The only configured SLA response-time percentile.
    SingleSlaPercentile,
    /// Highest-ranked of several SLA percentiles.
    HighestRanked,
    /// Default percentile.
    Default,
}

impl MetricSource {
    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Explicit => "explicit",
            Self::SingleSlaPercentile => "single_sla_percentile",
            Self::HighestRanked => "highest_ranked",
            Self::Default => "default",
        }
    }
}

/// Toggle and data presence for one feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FeatureState {
    /// User toggle.
    pub checked: bool,
    /// Whether thresholds (SLA) or baseline rows (Baseline) exist.
    pub data_exists: bool,
}

impl FeatureState {
    /// Returns true when the feature is unchecked but has data.
    #[must_use]
    pub const fn disabled_with_data(self) -> bool {
        !self.checked && self.data_exists
    }
}

/// Normalized quality-gate view consumed by the matcher, adjuster, and resolver.
///
/// # Invariants
/// - `sla_percentiles` is sorted and deduplicated.
/// - `comparison_metric` is always resolved.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedConfig {
    /// SLA feature state.
    pub sla: FeatureState,
    /// Baseline feature state.
    pub baseline: FeatureState,
    /// Summary section settings.
    pub summary: SectionConfig,
    /// Per-request section settings.
    pub per_request: SectionConfig,
    /// Resolved comparison percentile.
    pub comparison_metric: Percentile,
    /// Resolution step that produced `comparison_metric`.
    pub metric_source: MetricSource,
    /// Distinct percentiles of SLA response-time thresholds.
    pub sla_percentiles: Vec<Percentile>,
}

impl NormalizedConfig {
    /// Returns the state of `feature`.
    #[must_use]
    pub const fn feature(&self, feature: Feature) -> FeatureState {
        match feature {
            Feature::Sla => self.sla,
            Feature::Baseline => self.baseline,
        }
    }

    /// Returns the settings of `section`.
    #[must_use]
    pub const fn section(&self, section: Section) -> &SectionConfig {
        match section {
            Section::Summary => &self.summary,
            Section::PerRequest => &self.per_request,
        }
    }

    /// Returns true when any Summary metric is enabled.
    #[must_use]
    pub const fn summary_enabled(&self) -> bool {
        self.summary.section_enabled()
    }

    /// Returns true when any Per-request metric is enabled.
    #[must_use]
    pub const fn per_request_enabled(&self) -> bool {
        self.per_request.section_enabled()
    }

    /// Returns the deviation for `kind` under `scope`.
    ///
    /// Aggregate scope reads Summary; every other scope reads Per-request.
    #[must_use]
    pub const fn deviation(&self, scope: &Scope, kind: MetricKind) -> f64 {
        self.section(section_for_scope(scope)).deviation(kind)
    }
}

/// Returns the section governing a scope.
#[must_use]
pub const fn section_for_scope(scope: &Scope) -> Section {
    if scope.is_aggregate() { Section::Summary } else { Section::PerRequest }
}

// ============================================================================
// SECTION: Normalization
// ============================================================================

/// Normalizes raw settings against the available data.
#[must_use]
pub fn normalize(
    raw: &QualityGateConfig,
    explicit_metric: Option<Percentile>,
    thresholds: &[ThresholdRecord],
    baseline_rows: &[ResultRow],
) -> NormalizedConfig {
    let summary = raw.settings.summary_results;
    let per_request = raw.settings.per_request_results;
    let percentiles = sla_response_time_percentiles(thresholds);
    let (comparison_metric, metric_source) =
        resolve_comparison_metric(explicit_metric, per_request.section_enabled(), &percentiles);
    tracing::debug!(
        metric = comparison_metric.as_str(),
        source = metric_source.as_str(),
        configured = percentiles.len(),
        "resolved comparison metric"
    );
    NormalizedConfig {
        sla: FeatureState {
            checked: raw.sla.checked,
            data_exists: !thresholds.is_empty(),
        },
        baseline: FeatureState {
            checked: raw.baseline.checked,
            data_exists: !baseline_rows.is_empty(),
        },
        summary,
        per_request,
        comparison_metric,
        metric_source,
        sla_percentiles: percentiles.into_iter().collect(),
    }
}

/// Normalizes raw settings against a full input bundle.
#[must_use]
pub fn normalize_inputs(raw: &QualityGateConfig, inputs: &ReportInputs) -> NormalizedConfig {
    normalize(raw, inputs.comparison_metric, &inputs.thresholds, &inputs.baseline)
}

/// Collects the distinct percentiles of response-time thresholds.
fn sla_response_time_percentiles(thresholds: &[ThresholdRecord]) -> BTreeSet<Percentile> {
    thresholds
        .iter()
        .filter(|threshold| threshold.target == MetricKind::ResponseTime)
        .filter_map(|threshold| threshold.aggregation)
        .collect()
}

/// Applies the comparison-metric resolution order.
fn resolve_comparison_metric(
    explicit: Option<Percentile>,
    per_request_enabled: bool,
    configured: &BTreeSet<Percentile>,
) -> (Percentile, MetricSource) {
    if let Some(selected) = explicit
        && per_request_enabled
    {
        return (selected, MetricSource::Explicit);
    }
    if configured.len() == 1
        && let Some(only) = configured.first().copied()
        && only != Percentile::DEFAULT
    {
        return (only, MetricSource::SingleSlaPercentile);
    }
    if configured.len() > 1 && !per_request_enabled {
        let best = configured.iter().copied().filter_map(|p| p.rank().map(|rank| (rank, p))).min();
        if let Some((_, percentile)) = best {
            return (percentile, MetricSource::HighestRanked);
        }
    }
    (Percentile::DEFAULT, MetricSource::Default)
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use super::MetricSource;
    use super::resolve_comparison_metric;
    use crate::core::Percentile;

    fn set(items: &[Percentile]) -> BTreeSet<Percentile> {
        items.iter().copied().collect()
    }

    #[test]
    fn explicit_selection_requires_per_request() {
        let configured = set(&[Percentile::Pct90]);
        assert_eq!(
            resolve_comparison_metric(Some(Percentile::Pct50), true, &configured),
            (Percentile::Pct50, MetricSource::Explicit)
        );
        assert_eq!(
            resolve_comparison_metric(Some(Percentile::Pct50), false, &configured),
            (Percentile::Pct90, MetricSource::SingleSlaPercentile)
        );
    }

    #[test]
    fn single_default_percentile_stays_default() {
        let configured = set(&[Percentile::Pct95]);
        assert_eq!(
            resolve_comparison_metric(None, false, &configured),
            (Percentile::Pct95, MetricSource::Default)
        );
    }

    #[test]
    fn several_percentiles_pick_highest_rank_without_per_request() {
        let configured = set(&[Percentile::Mean, Percentile::Pct90, Percentile::Pct50]);
        assert_eq!(
            resolve_comparison_metric(None, false, &configured),
            (Percentile::Pct90, MetricSource::HighestRanked)
        );
        assert_eq!(
            resolve_comparison_metric(None, true, &configured),
            (Percentile::Pct95, MetricSource::Default)
        );
    }

    #[test]
    fn unranked_percentiles_fall_back_to_default() {
        let configured = set(&[Percentile::Min, Percentile::Max]);
        assert_eq!(
            resolve_comparison_metric(None, false, &configured),
            (Percentile::Pct95, MetricSource::Default)
        );
    }
}
