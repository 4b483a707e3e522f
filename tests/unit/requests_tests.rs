/*!
 * Tests for request building and result application
 */

use xcstrings_translator::catalog::{Catalog, Localization, StringEntry};
use xcstrings_translator::errors::ProviderError;
use xcstrings_translator::translation::{
    TranslationRequest, TranslationResponse, apply_translations, build_requests,
    build_requests_for_language,
};

use crate::common;

#[test]
fn test_buildRequests_withAbcCatalog_shouldOnlyRequestA() {
    let requests = build_requests(&common::abc_catalog(), &["fr"]);
    assert_eq!(requests, vec![TranslationRequest::new("A", "Hello", "en", "fr")]);
}

#[test]
fn test_applyTranslations_withAbcCatalog_shouldOnlyTouchA() {
    let mut catalog = common::abc_catalog();
    let before = catalog.clone();
    let request = TranslationRequest::new("A", "Hello", "en", "fr");

    let summary = apply_translations(&mut catalog, &[TranslationResponse::success(&request, "Bonjour")]);

    assert_eq!(summary.applied, 1);
    assert_eq!(
        catalog.get("A").unwrap().localizations.get("fr"),
        Some(&Localization::new("translated", "Bonjour"))
    );
    assert_eq!(catalog.get("B"), before.get("B"));
    assert_eq!(catalog.get("C"), before.get("C"));
}

#[test]
fn test_buildRequests_withAnyExistingState_shouldNeverRerequest() {
    let mut catalog = Catalog::new("en");
    for (i, state) in ["translated", "needs_review", "new", "stale", ""].iter().enumerate() {
        catalog
            .insert_source(format!("k{}", i), "Text")
            .localizations
            .insert("de".to_string(), Localization::new(*state, ""));
    }
    catalog
        .strings
        .get_mut("k0")
        .unwrap()
        .localizations
        .insert("it".to_string(), Localization::default());

    assert!(build_requests_for_language(&catalog, "de").is_empty());
    let italian = build_requests_for_language(&catalog, "it");
    assert_eq!(italian.len(), 4);
    assert!(italian.iter().all(|r| r.key != "k0"));
}

#[test]
fn test_buildRequests_withExcludedEntry_shouldEmitNothingForIt() {
    let mut catalog = Catalog::new("en");
    catalog.strings.insert(
        "Acme".to_string(),
        StringEntry {
            should_translate: Some(false),
            ..StringEntry::default()
        },
    );
    catalog.insert_source("Save", "Save");

    let requests = build_requests(&catalog, &["fr", "de", "es", "ja"]);

    assert_eq!(requests.len(), 4);
    assert!(requests.iter().all(|r| r.key == "Save"));
}

#[test]
fn test_buildRequests_withEmptySourceValue_shouldUseKey() {
    let mut catalog = Catalog::new("en");
    catalog.insert_source("Open file", "");

    let requests = build_requests_for_language(&catalog, "fr");

    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].text, "Open file");
    assert_eq!(requests[0].source_language, "en");
}

#[test]
fn test_applyTranslations_withFailuresAndUnknownKeys_shouldBeIdempotent() {
    let mut once = common::catalog_with_keys(3);
    let mut twice = once.clone();
    let responses = vec![
        TranslationResponse::success(&TranslationRequest::new("key000", "Source text 0", "en", "es"), "Texto 0"),
        TranslationResponse::failure(
            &TranslationRequest::new("key001", "Source text 1", "en", "es"),
            ProviderError::RateLimitExceeded("slow down".to_string()),
        ),
        TranslationResponse::success(&TranslationRequest::new("gone", "Old", "en", "es"), "Viejo"),
    ];

    let first = apply_translations(&mut once, &responses);
    apply_translations(&mut twice, &responses);
    let second = apply_translations(&mut twice, &responses);

    assert_eq!(once, twice);
    assert_eq!(first, second);
    assert_eq!((first.applied, first.failed, first.unknown_keys), (1, 1, 1));
    assert!(!once.get("key001").unwrap().has_localization("es"));
}
