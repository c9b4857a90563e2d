// crates/quality-gate-cli/src/tests/i18n.rs
// ============================================================================
// Module: CLI i18n Tests
// Description: Unit tests for catalog parity and locale parsing.
// Purpose: Keep both CLI catalogs aligned on keys and placeholders.
// Dependencies: quality-gate-cli i18n module
// ============================================================================

//! ## Overview
//! Verifies the CLI message catalogs stay in sync, locale parsing is tolerant,
//! and every localized template uses the same placeholders as English.

use std::collections::BTreeSet;

use crate::i18n::Locale;
use crate::i18n::MessageArg;
use crate::i18n::SUPPORTED_LOCALES;
use crate::i18n::catalog_entries_for;
use crate::i18n::catalog_for;
use crate::i18n::translate;

/// Extracts `{name}` placeholders, rejecting malformed braces.
fn placeholder_names(template: &str) -> Result<BTreeSet<String>, String> {
    let mut names = BTreeSet::new();
    let mut rest = template;
    while let Some(open) = rest.find(['{', '}']) {
        if rest[open ..].starts_with('}') {
            return Err(format!("unmatched '}}' in {template:?}"));
        }
        let after = &rest[open + 1 ..];
        let Some(close) = after.find('}') else {
            return Err(format!("unclosed '{{' in {template:?}"));
        };
        let name = &after[.. close];
        if name.is_empty() || !name.chars().all(|ch| ch.is_ascii_lowercase() || ch == '_') {
            return Err(format!("invalid placeholder {name:?} in {template:?}"));
        }
        names.insert(name.to_string());
        rest = &after[close + 1 ..];
    }
    Ok(names)
}

#[test]
fn catalogs_have_matching_keys() {
    let en_keys: BTreeSet<&'static str> = catalog_for(Locale::En).keys().copied().collect();
    for locale in SUPPORTED_LOCALES {
        let keys: BTreeSet<&'static str> = catalog_for(*locale).keys().copied().collect();
        assert_eq!(en_keys, keys, "locale catalogs must stay in parity ({locale:?})");
    }
}

#[test]
fn catalogs_have_unique_keys_per_locale() {
    for locale in SUPPORTED_LOCALES {
        let entries = catalog_entries_for(*locale);
        let unique: BTreeSet<&str> = entries.iter().map(|(key, _)| *key).collect();
        assert_eq!(unique.len(), entries.len(), "duplicate catalog key in {locale:?}");
    }
}

#[test]
fn catalogs_share_placeholders_with_english() {
    let en = catalog_for(Locale::En);
    for locale in SUPPORTED_LOCALES {
        for (key, template) in catalog_entries_for(*locale) {
            let localized = placeholder_names(template)
                .unwrap_or_else(|error| panic!("{key} in {locale:?}: {error}"));
            let english = placeholder_names(en.get(key).copied().expect("english key"))
                .unwrap_or_else(|error| panic!("{key} in En: {error}"));
            assert_eq!(english, localized, "placeholder mismatch for {key} in {locale:?}");
        }
    }
}

#[test]
fn catalan_differs_for_curated_keys() {
    for key in ["config.validate.ok", "gate.pass", "gate.fail", "i18n.disclaimer.machine_translated"] {
        let en = catalog_for(Locale::En).get(key).copied().expect("en key");
        let ca = catalog_for(Locale::Ca).get(key).copied().expect("ca key");
        assert_ne!(en, ca, "catalan text must be translated for {key}");
    }
}

#[test]
fn locale_parse_accepts_region_tags_and_case() {
    assert_eq!(Locale::parse("en"), Some(Locale::En));
    assert_eq!(Locale::parse("EN"), Some(Locale::En));
    assert_eq!(Locale::parse("en-US"), Some(Locale::En));
    assert_eq!(Locale::parse("ca_ES"), Some(Locale::Ca));
    assert_eq!(Locale::parse(" ca "), Some(Locale::Ca));
    assert_eq!(Locale::parse(""), None);
    assert_eq!(Locale::parse("de"), None);
    assert_eq!(Locale::Ca.as_str(), "ca");
}

#[test]
fn translate_substitutes_placeholders() {
    let output = translate(
        "input.read_failed",
        vec![
            MessageArg::new("kind", "run inputs"),
            MessageArg::new("path", "/tmp/run.json"),
            MessageArg::new("error", "denied"),
        ],
    );
    assert_eq!(output, "Failed to read run inputs at /tmp/run.json: denied");
}

#[test]
fn translate_falls_back_to_key() {
    assert_eq!(translate("no.such.key", Vec::new()), "no.such.key");
}
