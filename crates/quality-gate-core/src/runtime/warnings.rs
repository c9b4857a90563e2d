// crates/quality-gate-core/src/runtime/warnings.rs
// ============================================================================
// Module: Warning Resolver
// Description: Data-driven rule table producing per-feature warnings.
// Purpose: Explain incomplete or contradictory quality-gate settings.
// Dependencies: crate::core, crate::runtime::{catalog, format, matcher, normalizer}
// ============================================================================

//! ## Overview
//! Warnings are resolved independently for SLA and Baseline from two tables:
//!
//! - [`PRIORITY_LADDER`] is an ordered list of predicate/message pairs. The
//!   first rule whose predicate holds produces the feature's single
//!   Priority-class entry.
//! - [`INDEPENDENT_RULES`] lists every other rule in output order. Each rule
//!   names the ladder steps that suppress it and may emit zero or more
//!   entries.
//!
//! ## Invariants
//! - At most one Priority-class entry per feature.
//! - Output order is Priority, Additional, Informational, Deviation.
//! - Resolution is pure: identical inputs yield identical lists.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeSet;

use serde::Serialize;

use crate::core::ComparisonNote;
use crate::core::ComparisonOp;
use crate::core::CoverageCase;
use crate::core::Feature;
use crate::core::MetricKind;
use crate::core::Percentile;
use crate::core::ResultRow;
use crate::core::Section;
use crate::core::ThresholdRecord;
use crate::core::WarningClass;
use crate::core::WarningCode;
use crate::core::WarningEntry;
use crate::runtime::catalog::render;
use crate::runtime::format::format_amount;
use crate::runtime::matcher::BASELINE_DISABLED_TEXT;
use crate::runtime::matcher::NOT_FOUND_TEXT;
use crate::runtime::matcher::SLA_DISABLED_TEXT;
use crate::runtime::normalizer::FeatureState;
use crate::runtime::normalizer::NormalizedConfig;

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Data the resolver reads.
///
/// # Invariants
/// - `thresholds` is the unfiltered threshold set.
/// - `request_names` excludes the aggregate row.
#[derive(Debug, Clone)]
pub struct WarningInputs<'a> {
    /// Normalized settings.
    pub config: &'a NormalizedConfig,
    /// All configured SLA thresholds.
    pub thresholds: &'a [ThresholdRecord],
    /// Named requests of the current run, in input order.
    pub request_names: Vec<&'a str>,
}

impl<'a> WarningInputs<'a> {
    /// Builds resolver inputs from the current run rows.
    #[must_use]
    pub fn new(
        config: &'a NormalizedConfig,
        thresholds: &'a [ThresholdRecord],
        current: &'a [ResultRow],
    ) -> Self {
        let request_names = current
            .iter()
            .filter(|row| !row.is_aggregate_row())
            .map(ResultRow::request_name)
            .collect();
        Self {
            config,
            thresholds,
            request_names,
        }
    }
}

/// Ordered warning lists for both features.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FeatureWarnings {
    /// SLA warnings.
    pub sla: Vec<WarningEntry>,
    /// Baseline warnings.
    pub baseline: Vec<WarningEntry>,
}

/// Per-feature view handed to every rule.
struct RuleContext<'a> {
    /// Feature under evaluation.
    feature: Feature,
    /// Toggle and data presence of the feature.
    state: FeatureState,
    /// Shared resolver inputs.
    inputs: &'a WarningInputs<'a>,
}

impl RuleContext<'_> {
    /// Returns the normalized settings.
    const fn config(&self) -> &NormalizedConfig {
        self.inputs.config
    }

    /// Returns true when the feature is SLA.
    fn is_sla(&self) -> bool {
        self.feature == Feature::Sla
    }

    /// Returns the disabled-section placeholder for the feature.
    fn disabled_placeholder(&self) -> String {
        match self.feature {
            Feature::Sla => SLA_DISABLED_TEXT.to_string(),
            Feature::Baseline => BASELINE_DISABLED_TEXT.to_string(),
        }
    }

    /// Returns the feature label argument.
    fn feature_arg(&self) -> (&'static str, String) {
        ("feature", self.feature.label().to_string())
    }

    /// Returns true when at least one section is enabled.
    const fn any_section_enabled(&self) -> bool {
        self.config().summary_enabled() || self.config().per_request_enabled()
    }
}

// ============================================================================
// SECTION: Priority Ladder
// ============================================================================

/// One step of the Priority ladder.
struct LadderRule {
    /// Code emitted when the step fires.
    code: WarningCode,
    /// Predicate selecting the step.
    applies: fn(&RuleContext<'_>) -> bool,
    /// Message builder.
    message: fn(&RuleContext<'_>) -> String,
}

/// Priority ladder, first match wins.
const PRIORITY_LADDER: &[LadderRule] = &[
    LadderRule {
        code: WarningCode::DisabledWithData,
        applies: |ctx| ctx.state.disabled_with_data(),
        message: |ctx| render("warning.disabled_with_data", &[ctx.feature_arg()]),
    },
    LadderRule {
        code: WarningCode::NoBaselineRun,
        applies: |ctx| !ctx.is_sla() && ctx.state.checked && !ctx.state.data_exists,
        message: |_| render("warning.no_baseline_run", &[]),
    },
    LadderRule {
        code: WarningCode::SettingsDisabled,
        applies: |ctx| ctx.state.checked && !ctx.any_section_enabled(),
        message: |ctx| render("warning.settings_disabled", &[ctx.feature_arg()]),
    },
    LadderRule {
        code: WarningCode::NoThresholds,
        applies: |ctx| ctx.is_sla() && ctx.state.checked && ctx.inputs.thresholds.is_empty(),
        message: |_| render("warning.no_thresholds", &[]),
    },
    LadderRule {
        code: WarningCode::PerRequestDisabled,
        applies: |ctx| {
            ctx.state.checked
                && ctx.config().summary.fully_enabled()
                && !ctx.config().per_request_enabled()
        },
        message: |ctx| {
            render(
                "warning.per_request_disabled",
                &[ctx.feature_arg(), ("placeholder", ctx.disabled_placeholder())],
            )
        },
    },
    LadderRule {
        code: WarningCode::SummaryDisabled,
        applies: |ctx| {
            ctx.state.checked
                && !ctx.config().summary_enabled()
                && ctx.config().per_request.fully_enabled()
        },
        message: |ctx| {
            render(
                "warning.summary_disabled",
                &[ctx.feature_arg(), ("placeholder", ctx.disabled_placeholder())],
            )
        },
    },
];

// ============================================================================
// SECTION: Independent Rules
// ============================================================================

/// Ladder steps that hide every warning of the feature.
const SILENCING_STEPS: &[WarningCode] = &[WarningCode::DisabledWithData, WarningCode::NoBaselineRun];
/// Ladder steps under which nothing is visible to qualify.
const NOTHING_VISIBLE_STEPS: &[WarningCode] = &[
    WarningCode::DisabledWithData,
    WarningCode::NoBaselineRun,
    WarningCode::SettingsDisabled,
];
/// Ladder steps under which there is no threshold to qualify.
const NO_DATA_STEPS: &[WarningCode] = &[
    WarningCode::DisabledWithData,
    WarningCode::NoBaselineRun,
    WarningCode::SettingsDisabled,
    WarningCode::NoThresholds,
];

/// A rule evaluated alongside the ladder.
struct IndependentRule {
    /// Output class of produced entries.
    class: WarningClass,
    /// Ladder steps that suppress the rule.
    suppressed_by: &'static [WarningCode],
    /// Entry builder; receives the fired ladder step.
    emit: fn(&RuleContext<'_>, Option<WarningCode>) -> Vec<(WarningCode, String)>,
}

/// Independent rules in output order.
const INDEPENDENT_RULES: &[IndependentRule] = &[
    IndependentRule {
        class: WarningClass::Additional,
        suppressed_by: NO_DATA_STEPS,
        emit: scope_coverage_rule,
    },
    IndependentRule {
        class: WarningClass::Additional,
        suppressed_by: NO_DATA_STEPS,
        emit: multiple_percentiles_rule,
    },
    IndependentRule {
        class: WarningClass::Additional,
        suppressed_by: NOTHING_VISIBLE_STEPS,
        emit: section_off_rule,
    },
    IndependentRule {
        class: WarningClass::Informational,
        suppressed_by: SILENCING_STEPS,
        emit: disabled_metrics_rule,
    },
    IndependentRule {
        class: WarningClass::Informational,
        suppressed_by: NO_DATA_STEPS,
        emit: comparison_metric_rule,
    },
    IndependentRule {
        class: WarningClass::Deviation,
        suppressed_by: NOTHING_VISIBLE_STEPS,
        emit: deviation_rule,
    },
];

/// Scope-coverage lookup: `(has_every, has_all, full_coverage) -> case`.
const COVERAGE_TABLE: [((bool, bool, bool), Option<CoverageCase>); 8] = [
    ((false, false, false), Some(CoverageCase::NamedPartialWithoutAll)),
    ((false, false, true), Some(CoverageCase::NamedCompleteWithoutAll)),
    ((false, true, false), Some(CoverageCase::AllWithUncoveredRequests)),
    ((false, true, true), None),
    ((true, false, false), Some(CoverageCase::EveryWithoutAll)),
    ((true, false, true), Some(CoverageCase::EveryAndNamedWithoutAll)),
    ((true, true, false), None),
    ((true, true, true), None),
];

/// Looks up the coverage case for a flag combination.
#[must_use]
pub fn coverage_case(has_every: bool, has_all: bool, full_coverage: bool) -> Option<CoverageCase> {
    COVERAGE_TABLE
        .iter()
        .find(|(key, _)| *key == (has_every, has_all, full_coverage))
        .and_then(|(_, case)| *case)
}

/// Rule 4: SLA response-time scope coverage.
///
/// Only cells that are visible are described: uncovered requests are not
/// reported while Per-request response time is off, and general metrics are
/// named with the disabled placeholder while Summary response time is off.
fn scope_coverage_rule(ctx: &RuleContext<'_>, _: Option<WarningCode>) -> Vec<(WarningCode, String)> {
    let summary_visible = ctx.config().summary.is_checked(MetricKind::ResponseTime);
    let requests_visible = ctx.config().per_request.is_checked(MetricKind::ResponseTime);
    if !ctx.is_sla() || !(summary_visible || requests_visible) {
        return Vec::new();
    }
    let metric = ctx.config().comparison_metric;
    let active: Vec<&ThresholdRecord> = ctx
        .inputs
        .thresholds
        .iter()
        .filter(|threshold| {
            threshold.target == MetricKind::ResponseTime && threshold.applies_to_percentile(metric)
        })
        .collect();
    if active.is_empty() {
        return Vec::new();
    }
    let has_all = active.iter().any(|threshold| threshold.scope().is_aggregate());
    let has_every = active.iter().any(|threshold| threshold.scope().is_per_request());
    let named: BTreeSet<&str> = active
        .iter()
        .filter(|threshold| threshold.scope().request_name().is_some())
        .map(|threshold| threshold.scope.as_str())
        .collect();
    let uncovered = ctx.inputs.request_names.iter().filter(|name| !named.contains(*name)).count();
    let Some(case) = coverage_case(has_every, has_all, uncovered == 0) else {
        return Vec::new();
    };
    if case == CoverageCase::AllWithUncoveredRequests && !requests_visible {
        return Vec::new();
    }
    let general =
        if summary_visible { NOT_FOUND_TEXT.to_string() } else { ctx.disabled_placeholder() };
    let requests_key =
        if requests_visible { "sla.scope.requests.unset" } else { "sla.scope.requests.hidden" };
    let requests = render(requests_key, &[("uncovered", uncovered.to_string())]);
    let message = render(
        case.message_key(),
        &[("uncovered", uncovered.to_string()), ("requests", requests), ("general", general)],
    );
    vec![(WarningCode::ScopeCoverage(case), message)]
}

/// Rule 5: several SLA response-time percentiles with Per-request response time off.
fn multiple_percentiles_rule(
    ctx: &RuleContext<'_>,
    _: Option<WarningCode>,
) -> Vec<(WarningCode, String)> {
    let config = ctx.config();
    if !ctx.is_sla()
        || config.sla_percentiles.len() < 2
        || config.per_request.is_checked(MetricKind::ResponseTime)
    {
        return Vec::new();
    }
    let message = render(
        "sla.multiple_percentiles",
        &[
            ("percentiles", join_percentiles(&config.sla_percentiles)),
            ("metric", config.comparison_metric.to_string()),
        ],
    );
    vec![(WarningCode::MultiplePercentiles, message)]
}

/// Additional: fully disabled sections not already explained by the ladder.
fn section_off_rule(
    ctx: &RuleContext<'_>,
    fired: Option<WarningCode>,
) -> Vec<(WarningCode, String)> {
    Section::ALL
        .into_iter()
        .filter(|section| !ctx.config().section(*section).section_enabled())
        .filter(|section| fired != Some(ladder_step_covering(*section)))
        .map(|section| {
            let message = render(
                "warning.section_off",
                &[
                    ("section", section.label().to_string()),
                    ctx.feature_arg(),
                    ("area", section.area_label().to_string()),
                    ("placeholder", ctx.disabled_placeholder()),
                ],
            );
            (WarningCode::SectionOff(section), message)
        })
        .collect()
}

/// Informational: individually disabled metrics of enabled sections.
fn disabled_metrics_rule(
    ctx: &RuleContext<'_>,
    _: Option<WarningCode>,
) -> Vec<(WarningCode, String)> {
    if !ctx.any_section_enabled() {
        return Vec::new();
    }
    let sentences: Vec<String> = Section::ALL
        .into_iter()
        .filter(|section| ctx.config().section(*section).section_enabled())
        .flat_map(|section| {
            ctx.config().section(section).disabled_metrics().into_iter().map(move |metric| {
                render(
                    "warning.disabled_metric",
                    &[
                        ("metric", metric.label().to_string()),
                        ("area", section.area_label().to_string()),
                        ("section", section.label().to_string()),
                    ],
                )
            })
        })
        .collect();
    if sentences.is_empty() {
        return Vec::new();
    }
    vec![(WarningCode::DisabledMetrics, format!("{}.", sentences.join(". ")))]
}

/// Informational: which percentile response-time comparisons use.
fn comparison_metric_rule(
    ctx: &RuleContext<'_>,
    _: Option<WarningCode>,
) -> Vec<(WarningCode, String)> {
    let config = ctx.config();
    let metric = config.comparison_metric;
    if !config.per_request_enabled() {
        let message = render(
            "warning.comparison.per_request_off",
            &[ctx.feature_arg(), ("metric", metric.to_string())],
        );
        return vec![(WarningCode::ComparisonMetric(ComparisonNote::PerRequestOff), message)];
    }
    if !ctx.is_sla() {
        return Vec::new();
    }
    let response_time: Vec<&ThresholdRecord> = ctx
        .inputs
        .thresholds
        .iter()
        .filter(|threshold| threshold.target == MetricKind::ResponseTime)
        .collect();
    let (note, message) = if response_time.is_empty() {
        (ComparisonNote::NoResponseTimeSla, render("sla.comparison.no_response_time_sla", &[]))
    } else if response_time.iter().any(|threshold| threshold.aggregation == Some(metric)) {
        (
            ComparisonNote::Configured,
            render("sla.comparison.configured", &[("metric", metric.to_string())]),
        )
    } else {
        (
            ComparisonNote::OtherPercentilesOnly,
            render(
                "sla.comparison.other_percentiles",
                &[
                    ("metric", metric.to_string()),
                    ("available", join_percentiles(&config.sla_percentiles)),
                ],
            ),
        )
    };
    vec![(WarningCode::ComparisonMetric(note), message)]
}

/// Deviation: any nonzero tolerance across both sections.
fn deviation_rule(ctx: &RuleContext<'_>, _: Option<WarningCode>) -> Vec<(WarningCode, String)> {
    if !ctx.any_section_enabled() {
        return Vec::new();
    }
    let details: Vec<String> = Section::ALL
        .into_iter()
        .flat_map(|section| {
            ctx.config().section(section).nonzero_deviations().into_iter().map(
                move |(metric, amount)| {
                    let sign = deviation_sign(ctx, metric);
                    format!(
                        "{} {} {sign}{}{}",
                        section.label(),
                        metric.label().to_lowercase(),
                        format_amount(amount),
                        metric.deviation_unit()
                    )
                },
            )
        })
        .collect();
    if details.is_empty() {
        return Vec::new();
    }
    let shape_key = if ctx.is_sla() { "deviation.shape.sla" } else { "deviation.shape.baseline" };
    let message = render(
        "warning.deviation",
        &[
            ctx.feature_arg(),
            ("details", details.join(", ")),
            ("shape", render(shape_key, &[])),
        ],
    );
    vec![(WarningCode::DeviationApplied, message)]
}

// ============================================================================
// SECTION: Resolution
// ============================================================================

/// Resolves the ordered warnings of one feature.
#[must_use]
pub fn resolve_feature_warnings(feature: Feature, inputs: &WarningInputs<'_>) -> Vec<WarningEntry> {
    let ctx = RuleContext {
        feature,
        state: inputs.config.feature(feature),
        inputs,
    };
    let mut entries = Vec::new();
    let fired = PRIORITY_LADDER.iter().find(|rule| (rule.applies)(&ctx));
    if let Some(rule) = fired {
        entries.push(WarningEntry {
            feature,
            class: WarningClass::Priority,
            code: rule.code,
            message: (rule.message)(&ctx),
        });
    }
    let fired_code = fired.map(|rule| rule.code);
    if !ctx.state.checked {
        return entries;
    }
    for rule in INDEPENDENT_RULES {
        if fired_code.is_some_and(|code| rule.suppressed_by.contains(&code)) {
            continue;
        }
        entries.extend((rule.emit)(&ctx, fired_code).into_iter().map(|(code, message)| {
            WarningEntry {
                feature,
                class: rule.class,
                code,
                message,
            }
        }));
    }
    entries.sort_by_key(|entry| entry.class);
    entries
}

/// Resolves warnings for both features.
#[must_use]
pub fn resolve_warnings(inputs: &WarningInputs<'_>) -> FeatureWarnings {
    FeatureWarnings {
        sla: resolve_feature_warnings(Feature::Sla, inputs),
        baseline: resolve_feature_warnings(Feature::Baseline, inputs),
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Returns the ladder step that already explains a fully disabled section.
const fn ladder_step_covering(section: Section) -> WarningCode {
    match section {
        Section::Summary => WarningCode::SummaryDisabled,
        Section::PerRequest => WarningCode::PerRequestDisabled,
    }
}

/// Returns the sign a deviation of `metric` takes in the feature's comparisons.
///
/// Baseline comparisons follow the metric direction. SLA comparisons follow
/// the effective operators of the metric's thresholds; `±` marks operators
/// that disagree.
fn deviation_sign(ctx: &RuleContext<'_>, metric: MetricKind) -> &'static str {
    let default = ComparisonOp::default_for(metric).deviation_sign().unwrap_or("+");
    if !ctx.is_sla() {
        return default;
    }
    let signs: BTreeSet<&'static str> = ctx
        .inputs
        .thresholds
        .iter()
        .filter(|threshold| threshold.target == metric)
        .filter_map(|threshold| threshold.operator().deviation_sign())
        .collect();
    match signs.len() {
        0 => default,
        1 => signs.into_iter().next().unwrap_or(default),
        _ => "±",
    }
}

/// Joins percentile labels with commas.
fn join_percentiles(percentiles: &[Percentile]) -> String {
    percentiles.iter().map(|percentile| percentile.as_str()).collect::<Vec<_>>().join(", ")
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::COVERAGE_TABLE;
    use super::coverage_case;
    use crate::core::CoverageCase;

    #[test]
    fn coverage_table_enumerates_every_combination() {
        let mut keys: Vec<(bool, bool, bool)> = COVERAGE_TABLE.iter().map(|(key, _)| *key).collect();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), 8);
    }

    #[test]
    fn complete_coverage_has_no_case() {
        assert_eq!(coverage_case(true, true, false), None);
        assert_eq!(coverage_case(false, true, true), None);
        assert_eq!(coverage_case(true, false, false), Some(CoverageCase::EveryWithoutAll));
    }
}
