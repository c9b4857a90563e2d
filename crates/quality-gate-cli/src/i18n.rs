// crates/quality-gate-cli/src/i18n.rs
// ============================================================================
// Module: CLI Internationalization Helpers
// Description: Provides message catalog and translation utilities for the CLI.
// Purpose: Centralize user-facing strings of the quality-gate binary.
// Dependencies: Standard library collections and formatting utilities.
// ============================================================================

//! ## Overview
//! The quality-gate CLI stores user-facing strings in a small translation
//! catalog so every command reports through the same wording. All runtime
//! output should be routed through the [`t!`](crate::t) macro.
//!
//! Warning texts produced by the comparison engine are passed through
//! untranslated; only the CLI framing around them is localized.
//!
//! ## Invariants
//! - The catalog is initialized once and read-only thereafter.
//! - Missing keys fall back to English and then to the key itself.
//! - Placeholder substitutions preserve deterministic order.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Supported CLI locales.
///
/// # Invariants
/// - [`Locale::En`] is the default fallback locale.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Locale {
    /// English (default).
    En,
    /// Catalan.
    Ca,
}

impl Locale {
    /// Returns the canonical locale label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Ca => "ca",
        }
    }

    /// Attempts to parse a locale value (case-insensitive, tolerant of region tags).
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        if value.is_empty() {
            return None;
        }
        let normalized = value.to_ascii_lowercase();
        let lang = normalized.split(['-', '_']).next().unwrap_or("");
        match lang {
            "en" => Some(Self::En),
            "ca" => Some(Self::Ca),
            _ => None,
        }
    }
}

/// Ordered list of supported CLI locales.
pub const SUPPORTED_LOCALES: &[Locale] = &[Locale::En, Locale::Ca];

/// A formatted message argument captured by the [`macro@crate::t`] macro.
///
/// # Invariants
/// - `key` matches a placeholder name without braces (for example, `path`).
#[derive(Clone)]
pub struct MessageArg {
    /// The placeholder name used in message templates (e.g., `"path"`).
    pub key: &'static str,
    /// The formatted string value to substitute for this placeholder.
    pub value: String,
}

impl MessageArg {
    /// Constructs a new [`MessageArg`] from a key and displayable value.
    pub fn new(key: &'static str, value: impl Into<String>) -> Self {
        Self {
            key,
            value: value.into(),
        }
    }
}

// ============================================================================
// SECTION: Locale Selection
// ============================================================================

/// Global locale selection for CLI output.
static CURRENT_LOCALE: OnceLock<Locale> = OnceLock::new();

/// Sets the CLI locale. Only the first call wins.
pub fn set_locale(locale: Locale) {
    let _ = CURRENT_LOCALE.set(locale);
}

/// Returns the current CLI locale (defaults to English).
#[must_use]
pub fn current_locale() -> Locale {
    CURRENT_LOCALE.get().copied().unwrap_or(Locale::En)
}

// ============================================================================
// SECTION: Catalog
// ============================================================================

/// Static English catalog entries.
const CATALOG_EN: &[(&str, &str)] = &[
    ("main.version", "quality-gate {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "output"),
    ("output.write_failed", "Failed to write to {stream}: {error}"),
    ("output.json_failed", "Failed to serialize {kind}: {error}"),
    ("logging.init_failed", "Failed to initialize logging: {error}"),
    ("input.kind.run", "run inputs"),
    ("input.read_failed", "Failed to read {kind} at {path}: {error}"),
    (
        "input.read_too_large",
        "Refusing to read {kind} at {path} because it is {size} bytes (limit {limit}).",
    ),
    ("input.parse_failed", "Failed to parse {kind} at {path}: {error}"),
    ("config.load_failed", "Failed to load config: {error}"),
    ("config.validate.ok", "Config valid."),
    ("report.kind", "report"),
    ("report.header", "Quality gate report (comparison metric: {metric}, source: {source})"),
    (
        "report.row",
        "{name} [{status}] total {total}, ko {ko}, response time {response_time} s, error rate \
         {error_rate} %, throughput {throughput} req/s",
    ),
    (
        "report.cells",
        "  {feature}: response time {response_time} | error rate {error_rate} | throughput \
         {throughput}",
    ),
    ("report.sla_summary", "SLA: {violated} of {checked} comparisons missed ({rate} %)"),
    (
        "report.baseline_summary",
        "Baseline: {violated} of {checked} comparisons degraded ({rate} %)",
    ),
    ("report.run_error_rate", "Run error rate: {rate} %"),
    (
        "report.headline",
        "Response time at {metric} across {requests} requests: min {min} s, mean {mean} s, pct95 \
         {pct95} s, max {max} s",
    ),
    (
        "report.trend",
        "Build {build}: total {total}, throughput {throughput} req/s, pct95 {pct95} s, error rate \
         {error_rate} %",
    ),
    ("report.diff", "Build {build} vs build {reference}: {metric} {diff} ({trend})"),
    ("gate.pass", "Quality gate passed."),
    ("gate.fail", "Quality gate failed."),
    ("gate.reason", "  - {reason}"),
    ("warnings.kind", "warnings"),
    ("warnings.heading", "{feature} warnings:"),
    ("warnings.none", "  none"),
    ("warnings.entry", "  [{class}] {message}"),
    ("i18n.lang.invalid_env", "Invalid value for {env}: {value}. Expected 'en' or 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Note: non-English output is machine-translated and may be inaccurate.",
    ),
];

/// Static Catalan catalog entries.
const CATALOG_CA: &[(&str, &str)] = &[
    ("main.version", "quality-gate {version}"),
    ("output.stream.stdout", "stdout"),
    ("output.stream.stderr", "stderr"),
    ("output.stream.unknown", "sortida"),
    ("output.write_failed", "No s'ha pogut escriure a {stream}: {error}"),
    ("output.json_failed", "No s'ha pogut serialitzar {kind}: {error}"),
    ("logging.init_failed", "No s'ha pogut inicialitzar el registre: {error}"),
    ("input.kind.run", "dades de l'execució"),
    ("input.read_failed", "No s'ha pogut llegir {kind} a {path}: {error}"),
    (
        "input.read_too_large",
        "Es rebutja llegir {kind} a {path} perquè ocupa {size} bytes (límit {limit}).",
    ),
    ("input.parse_failed", "No s'ha pogut analitzar {kind} a {path}: {error}"),
    ("config.load_failed", "No s'ha pogut carregar la configuració: {error}"),
    ("config.validate.ok", "Configuració vàlida."),
    ("report.kind", "informe"),
    (
        "report.header",
        "Informe de la porta de qualitat (mètrica de comparació: {metric}, origen: {source})",
    ),
    (
        "report.row",
        "{name} [{status}] total {total}, ko {ko}, temps de resposta {response_time} s, taxa \
         d'errors {error_rate} %, rendiment {throughput} pet/s",
    ),
    (
        "report.cells",
        "  {feature}: temps de resposta {response_time} | taxa d'errors {error_rate} | rendiment \
         {throughput}",
    ),
    ("report.sla_summary", "SLA: {violated} de {checked} comparacions incomplertes ({rate} %)"),
    (
        "report.baseline_summary",
        "Línia base: {violated} de {checked} comparacions empitjorades ({rate} %)",
    ),
    ("report.run_error_rate", "Taxa d'errors de l'execució: {rate} %"),
    (
        "report.headline",
        "Temps de resposta a {metric} en {requests} peticions: mín {min} s, mitjana {mean} s, \
         pct95 {pct95} s, màx {max} s",
    ),
    (
        "report.trend",
        "Compilació {build}: total {total}, rendiment {throughput} pet/s, pct95 {pct95} s, taxa \
         d'errors {error_rate} %",
    ),
    ("report.diff", "Compilació {build} respecte a {reference}: {metric} {diff} ({trend})"),
    ("gate.pass", "La porta de qualitat s'ha superat."),
    ("gate.fail", "La porta de qualitat no s'ha superat."),
    ("gate.reason", "  - {reason}"),
    ("warnings.kind", "avisos"),
    ("warnings.heading", "Avisos de {feature}:"),
    ("warnings.none", "  cap"),
    ("warnings.entry", "  [{class}] {message}"),
    ("i18n.lang.invalid_env", "Valor no vàlid per a {env}: {value}. S'esperava 'en' o 'ca'."),
    (
        "i18n.disclaimer.machine_translated",
        "Nota: la sortida que no és en anglès està traduïda automàticament i pot ser inexacta.",
    ),
];

/// Returns the raw catalog entries for the requested locale.
#[must_use]
pub fn catalog_entries_for(locale: Locale) -> &'static [(&'static str, &'static str)] {
    match locale {
        Locale::En => CATALOG_EN,
        Locale::Ca => CATALOG_CA,
    }
}

/// Returns the message catalog for the requested locale.
#[must_use]
pub fn catalog_for(locale: Locale) -> &'static HashMap<&'static str, &'static str> {
    static CATALOG_EN_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    static CATALOG_CA_MAP: OnceLock<HashMap<&'static str, &'static str>> = OnceLock::new();
    match locale {
        Locale::En => CATALOG_EN_MAP.get_or_init(|| CATALOG_EN.iter().copied().collect()),
        Locale::Ca => CATALOG_CA_MAP.get_or_init(|| CATALOG_CA.iter().copied().collect()),
    }
}

// ============================================================================
// SECTION: Translation
// ============================================================================

/// Translates `key` using the selected locale while substituting `args`.
#[must_use]
pub fn translate(key: &str, args: Vec<MessageArg>) -> String {
    let locale = current_locale();
    let template = catalog_for(locale)
        .get(key)
        .copied()
        .or_else(|| catalog_for(Locale::En).get(key).copied())
        .unwrap_or(key);
    if args.is_empty() {
        return template.to_string();
    }

    let mut result = template.to_string();
    for arg in args {
        let placeholder = format!("{{{}}}", arg.key);
        result = result.replace(&placeholder, &arg.value);
    }
    result
}

// ============================================================================
// SECTION: Macro
// ============================================================================

/// Formats a localized message from a key and named arguments.
///
/// # Arguments
///
/// - `$key` must match a catalog entry.
/// - Named arguments are substituted into `{placeholder}` positions.
#[macro_export]
macro_rules! t {
    ($key:literal $(, $name:ident = $value:expr )* $(,)?) => {{
        let args = ::std::vec![
            $(
                $crate::i18n::MessageArg::new(stringify!($name), $value.to_string()),
            )*
        ];
        $crate::i18n::translate($key, args)
    }};
}
