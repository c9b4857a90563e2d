// crates/quality-gate-core/src/core/scope.rs
// ============================================================================
// Module: Threshold Scope
// Description: Scope classification for SLA thresholds.
// Purpose: Keep the aggregate scope and the backend "All" row apart.
// Dependencies: serde
// ============================================================================

//! ## Overview
//! A threshold scope string is one of three things: the aggregate literal
//! `all` (lowercase, exact), the per-request default `every` (any case), or a
//! named request. The backend's capitalised `All` row is *not* the aggregate
//! scope; as a threshold scope it is just another request name.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fmt;

use serde::Serialize;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Aggregate scope literal (exact, lowercase).
pub const AGGREGATE_SCOPE: &str = "all";
/// Per-request default scope literal (compared case-insensitively).
pub const PER_REQUEST_SCOPE: &str = "every";

// ============================================================================
// SECTION: Scope
// ============================================================================

/// Classified threshold scope.
///
/// # Invariants
/// - Only the exact string `all` classifies as [`Scope::Aggregate`].
/// - `every` classifies as [`Scope::PerRequest`] in any letter case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "name", rename_all = "snake_case")]
pub enum Scope {
    /// Whole-run aggregate (`all`).
    Aggregate,
    /// Default for every request (`every`).
    PerRequest,
    /// One specific request.
    Named(String),
}

impl Scope {
    /// Classifies a raw scope string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw == AGGREGATE_SCOPE {
            Self::Aggregate
        } else if raw.eq_ignore_ascii_case(PER_REQUEST_SCOPE) {
            Self::PerRequest
        } else {
            Self::Named(raw.to_string())
        }
    }

    /// Returns true for the aggregate scope.
    #[must_use]
    pub const fn is_aggregate(&self) -> bool {
        matches!(self, Self::Aggregate)
    }

    /// Returns true for the per-request default scope.
    #[must_use]
    pub const fn is_per_request(&self) -> bool {
        matches!(self, Self::PerRequest)
    }

    /// Returns the request name for named scopes.
    #[must_use]
    pub fn request_name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name.as_str()),
            Self::Aggregate | Self::PerRequest => None,
        }
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aggregate => f.write_str(AGGREGATE_SCOPE),
            Self::PerRequest => f.write_str(PER_REQUEST_SCOPE),
            Self::Named(name) => f.write_str(name),
        }
    }
}

// ============================================================================
// SECTION: Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::Scope;

    #[test]
    fn aggregate_requires_exact_lowercase() {
        assert_eq!(Scope::parse("all"), Scope::Aggregate);
        assert_eq!(Scope::parse("All"), Scope::Named("All".to_string()));
        assert_eq!(Scope::parse("ALL"), Scope::Named("ALL".to_string()));
    }

    #[test]
    fn every_is_case_insensitive() {
        assert_eq!(Scope::parse("every"), Scope::PerRequest);
        assert_eq!(Scope::parse("Every"), Scope::PerRequest);
        assert_eq!(Scope::parse("EVERY"), Scope::PerRequest);
    }

    #[test]
    fn other_strings_are_named_requests() {
        let scope = Scope::parse("GET /login");
        assert_eq!(scope.request_name(), Some("GET /login"));
        assert!(!scope.is_aggregate());
    }
}
