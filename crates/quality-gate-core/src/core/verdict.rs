// crates/quality-gate-core/src/core/verdict.rs
// ============================================================================
// Module: Verdict
// Description: Tri-state pass/fail outcome of a single comparison.
// Purpose: Represent "not compared" without overloading booleans.
// Dependencies: serde::{Deserialize, Serialize}
// ============================================================================

//! ## Overview
//! A comparison cell either passes, fails, or could not be evaluated (a
//! sentinel such as "N/A" or "SLA disabled" was rendered instead). Callers
//! combine verdicts with the same fail-closed reading a tri-state AND gives:
//! any failure fails, otherwise any unknown stays unknown.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Deserialize;
use serde::Serialize;

// ============================================================================
// SECTION: Verdict
// ============================================================================

/// Outcome of one comparison.
///
/// # Invariants
/// - Represents a closed set of outcomes: pass, fail, or unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Current value is within the (adjusted) limit.
    Pass,
    /// Current value breaches the (adjusted) limit.
    Fail,
    /// No comparison was made.
    Unknown,
}

impl Verdict {
    /// Returns true if the value is `Pass`.
    #[must_use]
    pub const fn is_pass(self) -> bool {
        matches!(self, Self::Pass)
    }

    /// Returns true if the value is `Fail`.
    #[must_use]
    pub const fn is_fail(self) -> bool {
        matches!(self, Self::Fail)
    }

    /// Returns true if the value is `Unknown`.
    #[must_use]
    pub const fn is_unknown(self) -> bool {
        matches!(self, Self::Unknown)
    }

    /// Combines two verdicts: fail dominates, then unknown.
    #[must_use]
    pub const fn and(self, other: Self) -> Self {
        match (self, other) {
            (Self::Fail, _) | (_, Self::Fail) => Self::Fail,
            (Self::Pass, Self::Pass) => Self::Pass,
            _ => Self::Unknown,
        }
    }

    /// Returns the stable label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Unknown => "unknown",
        }
    }
}

impl From<bool> for Verdict {
    fn from(passed: bool) -> Self {
        if passed { Self::Pass } else { Self::Fail }
    }
}
