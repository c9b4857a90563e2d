// crates/quality-gate-config/src/examples.rs
// ============================================================================
// Module: Config Examples
// Description: Canonical example configuration payload.
// Purpose: Deterministic starting point for new quality-gate.toml files.
// Dependencies: std
// ============================================================================

//! ## Overview
//! Canonical example for the quality-gate configuration. The example must
//! always load through [`crate::QualityGateFile::parse`].

/// Returns a canonical example `quality-gate.toml` configuration.
#[must_use]
pub fn config_toml_example() -> String {
    String::from(
        r#"# comparison_metric = "pct90"

[quality_gate.SLA]
checked = true

[quality_gate.baseline]
checked = true

[quality_gate.settings.summary_results]
check_response_time = true
check_error_rate = true
check_throughput = true
response_time_deviation = 200
error_rate_deviation = 0.5
throughput_deviation = 1.0

[quality_gate.settings.per_request_results]
check_response_time = true
check_error_rate = false
check_throughput = false
response_time_deviation = 200

[limits]
error_rate = 5.0
performance_degradation_rate = 10.0
missed_thresholds = 20.0

[report]
max_request_name_chars = 80
"#,
    )
}
