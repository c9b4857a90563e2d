// crates/quality-gate-cli/src/main_tests.rs
// ============================================================================
// Module: CLI Main Helpers Tests
// Description: Unit tests for bounded reads and locale resolution.
// Purpose: Ensure oversized inputs fail closed and locale flags win over env.
// Dependencies: quality-gate-cli main helpers, tempfile
// ============================================================================

//! ## Overview
//! Validates `read_bytes_with_limit` enforces size limits for CLI inputs and
//! `resolve_locale` applies the flag, environment, default order.

#![allow(
    clippy::panic,
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::use_debug,
    clippy::dbg_macro,
    clippy::panic_in_result_fn,
    clippy::unwrap_in_result,
    reason = "Test-only output and panic-based assertions are permitted."
)]

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs;

use quality_gate_cli::i18n::Locale;
use tempfile::TempDir;

use super::LangArg;
use super::ReadLimitError;
use super::read_bytes_with_limit;
use super::resolve_locale;

// ============================================================================
// SECTION: Tests
// ============================================================================

#[test]
fn read_bytes_with_limit_allows_small_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("small.json");
    fs::write(&path, b"{}").expect("write small file");

    let bytes = read_bytes_with_limit(&path, 16).expect("read small file");
    assert_eq!(bytes, b"{}");
}

#[test]
fn read_bytes_with_limit_accepts_exact_limit() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("exact.json");
    fs::write(&path, [b' '; 8]).expect("write file");

    let bytes = read_bytes_with_limit(&path, 8).expect("read file at limit");
    assert_eq!(bytes.len(), 8);
}

#[test]
fn read_bytes_with_limit_rejects_large_file() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("large.json");
    let limit = 8_usize;
    fs::write(&path, vec![0_u8; limit + 1]).expect("write large file");

    let err = read_bytes_with_limit(&path, limit).expect_err("expected size limit failure");
    match err {
        ReadLimitError::TooLarge { size, limit: reported } => {
            assert_eq!(size, 9);
            assert_eq!(reported, limit);
        }
        ReadLimitError::Io(err) => panic!("unexpected IO error: {err}"),
    }
}

#[test]
fn read_bytes_with_limit_reports_missing_file() {
    let dir = TempDir::new().expect("temp dir");
    let err = read_bytes_with_limit(&dir.path().join("absent.json"), 8).expect_err("missing");
    assert!(matches!(err, ReadLimitError::Io(_)));
}

#[test]
fn resolve_locale_prefers_flag_then_env() {
    assert_eq!(resolve_locale(Some(LangArg::Ca), Some("en")).expect("flag"), Locale::Ca);
    assert_eq!(resolve_locale(None, Some("ca-ES")).expect("env"), Locale::Ca);
    assert_eq!(resolve_locale(None, None).expect("default"), Locale::En);
}

#[test]
fn resolve_locale_rejects_unknown_env_value() {
    let err = resolve_locale(None, Some("fr")).expect_err("unsupported locale");
    assert!(err.to_string().contains("QUALITY_GATE_LANG"));
}
