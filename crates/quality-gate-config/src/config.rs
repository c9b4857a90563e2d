// crates/quality-gate-config/src/config.rs
// ============================================================================
// Module: Quality Gate Configuration
// Description: Configuration loading and validation for the quality gate.
// Purpose: Provide strict config parsing with hard limits.
// Dependencies: quality-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! Configuration is loaded from a TOML file with strict size and path limits.
//! A missing `[quality_gate]` table is not an error: it deserializes to the
//! all-disabled settings, which the engine reports through its warnings.
//! Numeric fields that would make comparisons meaningless are rejected.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use quality_gate_core::GateLimits;
use quality_gate_core::MetricKind;
use quality_gate_core::Percentile;
use quality_gate_core::QualityGateConfig;
use quality_gate_core::ReportOptions;
use quality_gate_core::Section;
use quality_gate_core::SectionConfig;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default configuration filename when no path is specified.
pub const DEFAULT_CONFIG_NAME: &str = "quality-gate.toml";
/// Environment variable used to override the config path.
pub const CONFIG_ENV_VAR: &str = "QUALITY_GATE_CONFIG";
/// Maximum configuration file size in bytes.
pub const MAX_CONFIG_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;
/// Default display width for request names.
pub(crate) const DEFAULT_MAX_REQUEST_NAME_CHARS: usize = 80;
/// Minimum allowed request-name display width.
pub(crate) const MIN_REQUEST_NAME_CHARS: usize = 8;
/// Maximum allowed request-name display width.
pub(crate) const MAX_REQUEST_NAME_CHARS: usize = 1024;
/// Upper bound of percentage limits.
const MAX_PERCENT: f64 = 100.0;

// ============================================================================
// SECTION: Config Model
// ============================================================================

/// Top-level quality-gate configuration file.
///
/// # Invariants
/// - `Default` is the all-disabled gate with no limits.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityGateFile {
    /// Explicit comparison percentile selected by the user.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison_metric: Option<Percentile>,
    /// Feature toggles and section settings.
    pub quality_gate: QualityGateConfig,
    /// Optional run-level limits.
    pub limits: GateLimits,
    /// Report display options.
    pub report: ReportConfig,
}

/// Report display configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Request names longer than this are truncated with `...`.
    pub max_request_name_chars: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            max_request_name_chars: DEFAULT_MAX_REQUEST_NAME_CHARS,
        }
    }
}

impl ReportConfig {
    /// Validates the display options.
    fn validate(self) -> Result<(), ConfigError> {
        let width = self.max_request_name_chars;
        if !(MIN_REQUEST_NAME_CHARS ..= MAX_REQUEST_NAME_CHARS).contains(&width) {
            return Err(ConfigError::Invalid(format!(
                "report.max_request_name_chars must be between {MIN_REQUEST_NAME_CHARS} and \
                 {MAX_REQUEST_NAME_CHARS}",
            )));
        }
        Ok(())
    }
}

impl QualityGateFile {
    /// Loads configuration from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when loading or validation fails.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let resolved = resolve_path(path)?;
        validate_path(&resolved)?;
        let bytes = fs::read(&resolved).map_err(|err| ConfigError::Io(err.to_string()))?;
        if bytes.len() > MAX_CONFIG_FILE_SIZE {
            return Err(ConfigError::Invalid("config file exceeds size limit".to_string()));
        }
        let content = std::str::from_utf8(&bytes)
            .map_err(|_| ConfigError::Invalid("config file must be utf-8".to_string()))?;
        Self::parse(content)
    }

    /// Parses and validates TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when parsing or validation fails.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|err| ConfigError::Parse(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when configuration is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for section in Section::ALL {
            validate_section(section, self.quality_gate.section(section))?;
        }
        validate_limit("limits.error_rate", self.limits.error_rate)?;
        validate_limit(
            "limits.performance_degradation_rate",
            self.limits.performance_degradation_rate,
        )?;
        validate_limit("limits.missed_thresholds", self.limits.missed_thresholds)?;
        self.report.validate()
    }

    /// Returns the assembler options.
    #[must_use]
    pub const fn report_options(&self) -> ReportOptions {
        ReportOptions {
            max_request_name_chars: self.report.max_request_name_chars,
        }
    }
}

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Configuration loading or validation errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// I/O failure while reading configuration.
    #[error("config io error: {0}")]
    Io(String),
    /// TOML parsing error.
    #[error("config parse error: {0}")]
    Parse(String),
    /// Invalid configuration data.
    #[error("invalid config: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Resolves the config path from CLI or environment defaults.
fn resolve_path(path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(CONFIG_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_CONFIG_NAME))
}

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), ConfigError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(ConfigError::Invalid("config path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(ConfigError::Invalid("config path component too long".to_string()));
        }
    }
    Ok(())
}

/// Returns the TOML table name of a section.
const fn section_key(section: Section) -> &'static str {
    match section {
        Section::Summary => "summary_results",
        Section::PerRequest => "per_request_results",
    }
}

/// Validates the deviation amounts of one section.
fn validate_section(section: Section, config: &SectionConfig) -> Result<(), ConfigError> {
    for kind in MetricKind::ALL {
        let amount = config.deviation(kind);
        if !amount.is_finite() || amount < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "quality_gate.settings.{}.{}_deviation must be finite and non-negative",
                section_key(section),
                kind.as_str()
            )));
        }
    }
    Ok(())
}

/// Validates an optional percentage limit.
fn validate_limit(field: &str, value: Option<f64>) -> Result<(), ConfigError> {
    let Some(value) = value else {
        return Ok(());
    };
    if !value.is_finite() || !(0.0 ..= MAX_PERCENT).contains(&value) {
        return Err(ConfigError::Invalid(format!("{field} must be between 0 and 100")));
    }
    Ok(())
}

// ============================================================================
// SECTION: Tests
// ============================================================================
