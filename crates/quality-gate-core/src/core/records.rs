// crates/quality-gate-core/src/core/records.rs
// ============================================================================
// Module: Run Records
// Description: Thresholds, result rows, baseline records, and run inputs.
// Purpose: Carry upstream data into the engine as read-only snapshots.
// Dependencies: serde, serde_json, thiserror
// ============================================================================

//! ## Overview
//! Records arrive from the results store and are never mutated by the engine.
//! [`ResultRow`] exposes its fields through accessors only, so a row's
//! `status` cannot be rewritten downstream. [`ThresholdRecord`] has no
//! deviation field at all: the upstream value is always zero and is dropped at
//! deserialisation, leaving section settings as the only deviation source.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

use crate::core::metric::ComparisonOp;
use crate::core::metric::MetricKind;
use crate::core::metric::Percentile;
use crate::core::numeric::round2;
use crate::core::scope::Scope;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Name the backend gives its aggregate row (matched case-insensitively).
pub const AGGREGATE_ROW_NAME: &str = "All";
/// Exact status label that excludes a row from aggregation.
pub const STATUS_FAILED: &str = "FAILED";
/// Exact status label of a successful row.
pub const STATUS_SUCCESS: &str = "SUCCESS";

// ============================================================================
// SECTION: Threshold Record
// ============================================================================

/// SLA threshold configured for a test.
///
/// # Invariants
/// - `value` is in milliseconds for response time, percent for error rate,
///   and requests per second for throughput.
/// - The upstream `deviation` field is not modelled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThresholdRecord {
    /// Raw scope string (`all`, `every`, or a request name).
    pub scope: String,
    /// Metric the threshold applies to.
    pub target: MetricKind,
    /// Percentile for response-time thresholds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aggregation: Option<Percentile>,
    /// Violation operator; defaults by metric direction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comparison: Option<ComparisonOp>,
    /// Threshold value in upstream units.
    pub value: f64,
}

impl ThresholdRecord {
    /// Builds a threshold with direction-default comparison.
    #[must_use]
    pub fn new(scope: impl Into<String>, target: MetricKind, value: f64) -> Self {
        Self {
            scope: scope.into(),
            target,
            aggregation: None,
            comparison: None,
            value,
        }
    }

    /// Sets the response-time percentile.
    #[must_use]
    pub const fn with_aggregation(mut self, aggregation: Percentile) -> Self {
        self.aggregation = Some(aggregation);
        self
    }

    /// Sets an explicit violation operator.
    #[must_use]
    pub const fn with_comparison(mut self, comparison: ComparisonOp) -> Self {
        self.comparison = Some(comparison);
        self
    }

    /// Returns the classified scope.
    #[must_use]
    pub fn scope(&self) -> Scope {
        Scope::parse(&self.scope)
    }

    /// Returns the effective violation operator.
    #[must_use]
    pub fn operator(&self) -> ComparisonOp {
        self.comparison.unwrap_or_else(|| ComparisonOp::default_for(self.target))
    }

    /// Returns true when the threshold applies under `percentile`.
    ///
    /// Error-rate and throughput thresholds apply under any percentile.
    #[must_use]
    pub fn applies_to_percentile(&self, percentile: Percentile) -> bool {
        self.target != MetricKind::ResponseTime || self.aggregation == Some(percentile)
    }
}

// ============================================================================
// SECTION: Result Row
// ============================================================================

/// Classified row status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RowStatus {
    /// Exactly `SUCCESS`.
    Success,
    /// Exactly `FAILED`.
    Failed,
    /// Missing or any other label, including lowercase `failed`.
    Unknown,
}

impl RowStatus {
    /// Classifies a raw status label with exact-case matching.
    #[must_use]
    pub fn from_label(label: Option<&str>) -> Self {
        match label {
            Some(STATUS_FAILED) => Self::Failed,
            Some(STATUS_SUCCESS) => Self::Success,
            _ => Self::Unknown,
        }
    }
}

/// A measured page, action, or request from one run.
///
/// # Invariants
/// - Fields are read-only outside this module.
/// - Response-time fields are in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRow {
    /// Request identifier.
    request_name: String,
    /// Request method, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    method: Option<String>,
    /// Opaque upstream status label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
    /// Total samples.
    #[serde(default)]
    total: u64,
    /// Successful samples.
    #[serde(default)]
    ok: u64,
    /// Failed samples.
    #[serde(default)]
    ko: u64,
    /// Throughput in requests per second.
    #[serde(default)]
    throughput: f64,
    /// Minimum response time.
    #[serde(default)]
    min: f64,
    /// Mean response time.
    #[serde(default, alias = "avg")]
    mean: f64,
    /// Median response time.
    #[serde(default)]
    pct50: f64,
    /// 75th percentile response time.
    #[serde(default)]
    pct75: f64,
    /// 90th percentile response time.
    #[serde(default)]
    pct90: f64,
    /// 95th percentile response time.
    #[serde(default)]
    pct95: f64,
    /// 99th percentile response time.
    #[serde(default)]
    pct99: f64,
    /// Maximum response time.
    #[serde(default)]
    max: f64,
}

impl ResultRow {
    /// Starts a row with zeroed metrics.
    #[must_use]
    pub fn new(request_name: impl Into<String>) -> Self {
        Self {
            request_name: request_name.into(),
            method: None,
            status: None,
            total: 0,
            ok: 0,
            ko: 0,
            throughput: 0.0,
            min: 0.0,
            mean: 0.0,
            pct50: 0.0,
            pct75: 0.0,
            pct90: 0.0,
            pct95: 0.0,
            pct99: 0.0,
            max: 0.0,
        }
    }

    /// Sets the upstream status label.
    #[must_use]
    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    /// Sets the request method.
    #[must_use]
    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = Some(method.into());
        self
    }

    /// Sets sample counts; `ok` is derived.
    #[must_use]
    pub const fn with_counts(mut self, total: u64, ko: u64) -> Self {
        self.total = total;
        self.ko = ko;
        self.ok = total.saturating_sub(ko);
        self
    }

    /// Sets throughput.
    #[must_use]
    pub const fn with_throughput(mut self, throughput: f64) -> Self {
        self.throughput = throughput;
        self
    }

    /// Sets one response-time aggregation.
    #[must_use]
    pub const fn with_percentile(mut self, percentile: Percentile, millis: f64) -> Self {
        match percentile {
            Percentile::Min => self.min = millis,
            Percentile::Mean => self.mean = millis,
            Percentile::Pct50 => self.pct50 = millis,
            Percentile::Pct75 => self.pct75 = millis,
            Percentile::Pct90 => self.pct90 = millis,
            Percentile::Pct95 => self.pct95 = millis,
            Percentile::Pct99 => self.pct99 = millis,
            Percentile::Max => self.max = millis,
        }
        self
    }

    /// Returns the request identifier.
    #[must_use]
    pub fn request_name(&self) -> &str {
        &self.request_name
    }

    /// Returns the request method.
    #[must_use]
    pub fn method(&self) -> Option<&str> {
        self.method.as_deref()
    }

    /// Returns the raw status label.
    #[must_use]
    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    /// Returns the classified status.
    #[must_use]
    pub fn status_class(&self) -> RowStatus {
        RowStatus::from_label(self.status())
    }

    /// Returns total samples.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns successful samples.
    #[must_use]
    pub const fn ok(&self) -> u64 {
        self.ok
    }

    /// Returns failed samples.
    #[must_use]
    pub const fn ko(&self) -> u64 {
        self.ko
    }

    /// Returns throughput.
    #[must_use]
    pub const fn throughput(&self) -> f64 {
        self.throughput
    }

    /// Returns a response-time aggregation in milliseconds.
    #[must_use]
    pub const fn percentile(&self, percentile: Percentile) -> f64 {
        match percentile {
            Percentile::Min => self.min,
            Percentile::Mean => self.mean,
            Percentile::Pct50 => self.pct50,
            Percentile::Pct75 => self.pct75,
            Percentile::Pct90 => self.pct90,
            Percentile::Pct95 => self.pct95,
            Percentile::Pct99 => self.pct99,
            Percentile::Max => self.max,
        }
    }

    /// Returns `ko / total * 100` rounded to two decimals (0 without samples).
    #[must_use]
    #[allow(clippy::cast_precision_loss, reason = "Sample counts stay far below 2^52.")]
    pub fn error_rate(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        round2(self.ko as f64 / self.total as f64 * 100.0)
    }

    /// Returns the raw metric value: milliseconds, percent, or requests per second.
    #[must_use]
    pub fn metric_value(&self, kind: MetricKind, percentile: Percentile) -> f64 {
        match kind {
            MetricKind::ResponseTime => self.percentile(percentile),
            MetricKind::ErrorRate => self.error_rate(),
            MetricKind::Throughput => self.throughput,
        }
    }

    /// Returns true for the backend aggregate row (`All`, any case).
    #[must_use]
    pub fn is_aggregate_row(&self) -> bool {
        self.request_name.eq_ignore_ascii_case(AGGREGATE_ROW_NAME)
    }

    /// Returns the numeric fields for validation.
    fn numeric_fields(&self) -> [(&'static str, f64); 9] {
        [
            ("throughput", self.throughput),
            ("min", self.min),
            ("mean", self.mean),
            ("pct50", self.pct50),
            ("pct75", self.pct75),
            ("pct90", self.pct90),
            ("pct95", self.pct95),
            ("pct99", self.pct99),
            ("max", self.max),
        ]
    }
}

// ============================================================================
// SECTION: Baseline Record
// ============================================================================

/// Metrics of one request from the baseline run.
///
/// # Invariants
/// - `response_times` holds every percentile of the source row, in milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineRecord {
    /// Request identifier.
    pub request_name: String,
    /// Response time per percentile.
    pub response_times: BTreeMap<Percentile, f64>,
    /// Error rate in percent.
    pub error_rate: f64,
    /// Throughput in requests per second.
    pub throughput: f64,
}

impl BaselineRecord {
    /// Captures a baseline row.
    #[must_use]
    pub fn from_row(row: &ResultRow) -> Self {
        let response_times = [
            Percentile::Min,
            Percentile::Mean,
            Percentile::Pct50,
            Percentile::Pct75,
            Percentile::Pct90,
            Percentile::Pct95,
            Percentile::Pct99,
            Percentile::Max,
        ]
        .into_iter()
        .map(|percentile| (percentile, row.percentile(percentile)))
        .collect();
        Self {
            request_name: row.request_name().to_string(),
            response_times,
            error_rate: row.error_rate(),
            throughput: row.throughput(),
        }
    }

    /// Returns the baseline value for `kind` in upstream units.
    #[must_use]
    pub fn value(&self, kind: MetricKind, percentile: Percentile) -> Option<f64> {
        match kind {
            MetricKind::ResponseTime => self.response_times.get(&percentile).copied(),
            MetricKind::ErrorRate => Some(self.error_rate),
            MetricKind::Throughput => Some(self.throughput),
        }
    }

    /// Returns true for the backend aggregate row.
    #[must_use]
    pub fn is_aggregate_row(&self) -> bool {
        self.request_name.eq_ignore_ascii_case(AGGREGATE_ROW_NAME)
    }
}

// ============================================================================
// SECTION: Run Inputs
// ============================================================================

/// Data bundle for one report.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportInputs {
    /// SLA thresholds configured for the test.
    pub thresholds: Vec<ThresholdRecord>,
    /// Baseline run rows.
    pub baseline: Vec<ResultRow>,
    /// Current run rows.
    pub current: Vec<ResultRow>,
    /// Earlier runs, newest first, for trend datapoints.
    pub builds: Vec<Vec<ResultRow>>,
    /// Explicit comparison percentile chosen by the user.
    pub comparison_metric: Option<Percentile>,
}

impl ReportInputs {
    /// Parses and validates a JSON bundle.
    ///
    /// # Errors
    ///
    /// Returns [`InputError`] when parsing or validation fails.
    pub fn from_json(bytes: &[u8]) -> Result<Self, InputError> {
        let inputs: Self =
            serde_json::from_slice(bytes).map_err(|err| InputError::Parse(err.to_string()))?;
        inputs.validate()?;
        Ok(inputs)
    }

    /// Checks numeric sanity of every record.
    ///
    /// # Errors
    ///
    /// Returns [`InputError::Invalid`] naming the first offending record.
    pub fn validate(&self) -> Result<(), InputError> {
        for threshold in &self.thresholds {
            if !threshold.value.is_finite() {
                return Err(InputError::Invalid(format!(
                    "threshold {}/{} value must be finite",
                    threshold.scope, threshold.target
                )));
            }
        }
        let builds = self.builds.iter().flatten();
        for row in self.current.iter().chain(&self.baseline).chain(builds) {
            validate_row(row)?;
        }
        Ok(())
    }
}

/// Validates one result row.
fn validate_row(row: &ResultRow) -> Result<(), InputError> {
    if row.ko > row.total {
        return Err(InputError::Invalid(format!(
            "row {} has more failed samples than total",
            row.request_name
        )));
    }
    for (field, value) in row.numeric_fields() {
        if !value.is_finite() || value < 0.0 {
            return Err(InputError::Invalid(format!(
                "row {} field {field} must be finite and non-negative",
                row.request_name
            )));
        }
    }
    Ok(())
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Errors raised while reading run inputs.
#[derive(Debug, Error)]
pub enum InputError {
    /// JSON parsing error.
    #[error("input parse error: {0}")]
    Parse(String),
    /// Record failed validation.
    #[error("invalid input: {0}")]
    Invalid(String),
}
