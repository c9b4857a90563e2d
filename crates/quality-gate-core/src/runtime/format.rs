// crates/quality-gate-core/src/runtime/format.rs
// ============================================================================
// Module: Display Formatting
// Description: Formatting helpers for report values.
// Purpose: Render counts, signed diffs, tolerances, and request names.
// Dependencies: crate::core
// ============================================================================

//! ## Overview
//! Helpers used by the assembler and the warning resolver to render values
//! consistently: compact counts (`1.5K`), signed diffs (`+0.25`), tolerance
//! amounts (`200ms`), and request names truncated to a display width.

use crate::core::numeric::format_decimal;
use crate::core::numeric::round2;

/// Default display width for request names.
pub const DEFAULT_MAX_NAME_CHARS: usize = 80;
/// Suffix appended to truncated request names.
const TRUNCATION_SUFFIX: &str = "...";

/// Renders a count with `K`/`M` suffixes above a thousand.
#[must_use]
pub fn stringify_number(value: f64) -> String {
    if (value / 1_000_000.0).floor() > 0.0 {
        return format!("{}M", format_decimal(round2(value / 1_000_000.0)));
    }
    if (value / 1_000.0).floor() > 0.0 {
        return format!("{}K", format_decimal(round2(value / 1_000.0)));
    }
    format_decimal(value)
}

/// Renders a diff with an explicit `+` for positive values.
#[must_use]
pub fn signed(value: f64) -> String {
    if value > 0.0 { format!("+{}", format_decimal(value)) } else { format_decimal(value) }
}

/// Renders a tolerance without a trailing `.0` on whole numbers.
#[must_use]
pub fn format_amount(value: f64) -> String {
    let rendered = format_decimal(value);
    rendered.strip_suffix(".0").map_or(rendered.clone(), str::to_string)
}

/// Truncates `name` to `max_chars` characters plus `...`.
#[must_use]
pub fn truncate_name(name: &str, max_chars: usize) -> String {
    if name.chars().count() <= max_chars {
        return name.to_string();
    }
    let mut truncated: String = name.chars().take(max_chars).collect();
    truncated.push_str(TRUNCATION_SUFFIX);
    truncated
}

#[cfg(test)]
mod tests {
    use super::format_amount;
    use super::signed;
    use super::stringify_number;
    use super::truncate_name;

    #[test]
    fn stringify_uses_suffixes() {
        assert_eq!(stringify_number(1500.0), "1.5K");
        assert_eq!(stringify_number(2_340_000.0), "2.34M");
        assert_eq!(stringify_number(999.0), "999.0");
    }

    #[test]
    fn signed_marks_positive_values() {
        assert_eq!(signed(0.25), "+0.25");
        assert_eq!(signed(-1.5), "-1.5");
        assert_eq!(signed(0.0), "0.0");
    }

    #[test]
    fn amounts_drop_whole_fraction() {
        assert_eq!(format_amount(200.0), "200");
        assert_eq!(format_amount(0.5), "0.5");
    }

    #[test]
    fn long_names_are_truncated() {
        let name = "x".repeat(90);
        let truncated = truncate_name(&name, 80);
        assert_eq!(truncated.len(), 83);
        assert!(truncated.ends_with("..."));
        assert_eq!(truncate_name("short", 80), "short");
    }
}
