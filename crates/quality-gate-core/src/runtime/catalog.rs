// crates/quality-gate-core/src/runtime/catalog.rs
// ============================================================================
// Module: Warning Message Catalog
// Description: Message templates for quality-gate warnings.
// Purpose: Centralize warning wording apart from the rule table.
// Dependencies: Standard library collections.
// ============================================================================

//! ## Overview
//! Warning text lives in a static catalog keyed by stable message keys.
//! Templates use `{placeholder}` substitutions; the rule table supplies the
//! arguments. Unknown keys render as the key itself.
//!
//! Warning text is English only. Front ends that localize their own framing
//! pass these messages through unchanged.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Warning message templates.
const WARNING_CATALOG: &[(&str, &str)] = &[
    (
        "warning.disabled_with_data",
        "{feature} data exists for this test, but {feature} comparison is disabled in the quality \
         gate. Enable {feature} to see it in this report.",
    ),
    (
        "warning.no_baseline_run",
        "Baseline comparison is enabled, but no baseline test is set. Mark a previous run as the \
         baseline to compare against it.",
    ),
    (
        "warning.settings_disabled",
        "{feature} comparison is enabled, but every Summary results and Per request results metric \
         is disabled, so no {feature} values are shown.",
    ),
    (
        "warning.no_thresholds",
        "SLA comparison is enabled, but no SLA is configured for response time, error rate, or \
         throughput.",
    ),
    (
        "warning.per_request_disabled",
        "Per request results are disabled for {feature}; individual requests show \
         \"{placeholder}\".",
    ),
    (
        "warning.summary_disabled",
        "Summary results are disabled for {feature}; general metrics show \"{placeholder}\".",
    ),
    (
        "sla.scope.every_without_all",
        "A response time SLA is set for \"every\" request but not for \"all\"; general metrics \
         show \"{general}\". Add an \"all\" SLA to compare summary results.",
    ),
    (
        "sla.scope.every_and_named_without_all",
        "Every request has its own response time SLA and an \"every\" default exists, but no \
         \"all\" SLA is set; general metrics show \"{general}\".",
    ),
    (
        "sla.scope.named_complete_without_all",
        "Every request has its own response time SLA, but no \"all\" SLA is set; general metrics \
         show \"{general}\".",
    ),
    (
        "sla.scope.named_partial_without_all",
        "Response time SLA is set only for specific requests and no \"all\" SLA is set; \
         {requests} and general metrics show \"{general}\". Add an \"every\" SLA to cover the \
         remaining requests.",
    ),
    (
        "sla.scope.all_with_uncovered_requests",
        "A response time SLA is set for \"all\", but {uncovered} request(s) have neither their own \
         nor an \"every\" SLA and show \"Set SLA\".",
    ),
    ("sla.scope.requests.unset", "{uncovered} request(s) show \"Set SLA\""),
    ("sla.scope.requests.hidden", "{uncovered} request(s) have no response time SLA"),
    (
        "sla.multiple_percentiles",
        "Multiple response time SLA metrics are configured ({percentiles}); using {metric} because \
         Per request response time is disabled.",
    ),
    (
        "warning.section_off",
        "{section} are disabled for {feature}; {area} show \"{placeholder}\".",
    ),
    ("warning.disabled_metric", "{metric} comparison is disabled for {area} ({section})"),
    (
        "warning.comparison.per_request_off",
        "Per request results are disabled; {feature} response time comparisons use {metric}.",
    ),
    (
        "sla.comparison.configured",
        "Response time comparisons use {metric}; SLA thresholds are configured for {metric}.",
    ),
    (
        "sla.comparison.other_percentiles",
        "No response time SLA is configured for {metric}; SLA thresholds exist for {available}. \
         Select one of them as the comparison metric to compare requests.",
    ),
    (
        "sla.comparison.no_response_time_sla",
        "No response time SLA is configured; response time cells show \"Set SLA\" or \"N/A\".",
    ),
    (
        "warning.deviation",
        "{feature} comparisons include the configured deviation ({details}); values show as \
         \"{shape}\".",
    ),
    ("deviation.shape.sla", "threshold (threshold with deviation)"),
    ("deviation.shape.baseline", "baseline (baseline with deviation)"),
];

/// Returns the catalog as a lookup map.
fn catalog() -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    CATALOG_MAP.get_or_init(|| WARNING_CATALOG.iter().copied().collect())
}

// ============================================================================
// SECTION: Rendering
// ============================================================================

/// Renders `key` with `{placeholder}` substitutions from `args`.
#[must_use]
pub fn render(key: &str, args: &[(&str, String)]) -> String {
    let template = catalog().get(key).copied().unwrap_or(key);
    let mut result = template.to_string();
    for (name, value) in args {
        let placeholder = format!("{{{name}}}");
        result = result.replace(&placeholder, value);
    }
    result
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::WARNING_CATALOG;
    use super::render;

    #[test]
    fn keys_are_unique() {
        let mut keys: Vec<&str> = WARNING_CATALOG.iter().map(|(key, _)| *key).collect();
        let total = keys.len();
        keys.sort_unstable();
        keys.dedup();
        assert_eq!(keys.len(), total);
    }

    #[test]
    fn substitutes_every_occurrence() {
        let text = render("warning.disabled_with_data", &[("feature", "SLA".to_string())]);
        assert!(text.starts_with("SLA data exists"));
        assert!(!text.contains("{feature}"));
    }

    #[test]
    fn unknown_keys_render_as_key() {
        assert_eq!(render("missing.key", &[]), "missing.key");
    }
}
