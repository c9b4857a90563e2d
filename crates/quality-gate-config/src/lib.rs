// crates/quality-gate-config/src/lib.rs
// ============================================================================
// Module: Quality Gate Config Library
// Description: Config model, loading, and validation for the quality gate.
// Purpose: Single source of truth for quality-gate.toml semantics.
// Dependencies: quality-gate-core, serde, toml
// ============================================================================

//! ## Overview
//! `quality-gate-config` reads the quality-gate settings, gate limits, and
//! report options from a TOML file with hard size and path limits, and
//! validates every numeric field before the engine sees it.

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod config;
pub mod examples;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use config::*;
pub use examples::config_toml_example;
