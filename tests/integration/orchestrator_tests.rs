/*!
 * Tests for language-by-language orchestration
 */

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

use xcstrings_translator::app_config::FailurePolicy;
use xcstrings_translator::errors::TranslationError;
use xcstrings_translator::providers::MockProvider;
use xcstrings_translator::translation::{
    ProgressReporterFactory, ProgressSink, TranslationResponse, translate_per_language,
};

use crate::common;

#[derive(Default)]
struct RecordingFactory {
    requested: Arc<Mutex<Vec<(String, usize)>>>,
}

impl ProgressReporterFactory for RecordingFactory {
    fn reporter(&self, language: &str, total: usize) -> Box<dyn ProgressSink> {
        self.requested.lock().push((language.to_string(), total));
        Box::new(|_: usize, _: usize, _: &TranslationResponse| {})
    }
}

#[tokio::test]
async fn test_translatePerLanguage_withFailingSecondLanguage_shouldKeepFirstAndSkipThird() {
    common::init_logging();
    let catalog = common::catalog_with_keys(6);
    let mock = MockProvider::fail_on_language("de");
    let translator = common::translator(
        mock.clone(),
        1,
        Duration::from_secs(10),
        FailurePolicy::AbortOnFirstFailure,
    );

    let outcome = translate_per_language(&catalog, &["fr", "de", "es"], &translator, None).await;

    let fr: Vec<_> = outcome.responses.iter().filter(|r| r.target_language == "fr").collect();
    assert_eq!(fr.len(), 6);
    assert!(fr.iter().all(|r| r.is_success()));
    assert!(outcome.responses.iter().any(|r| r.target_language == "de" && !r.is_success()));
    assert!(outcome.responses.iter().all(|r| r.target_language != "es"));
    assert!(mock.calls().iter().all(|r| r.target_language != "es"));

    let error = outcome.error.expect("orchestration should fail");
    assert_eq!(error.failed_language(), Some("de"));
    assert!(error.to_string().contains("de"));
    assert!(matches!(
        error,
        TranslationError::LanguageFailed { ref source, .. }
            if matches!(**source, TranslationError::BatchAborted { .. })
    ));
    assert_eq!(outcome.completed_languages, vec!["fr"]);
}

#[tokio::test]
async fn test_translatePerLanguage_withProgressFactory_shouldWireOneReporterPerLanguage() {
    let mut catalog = common::catalog_with_keys(3);
    catalog.strings.get_mut("key000").unwrap().set_translation("de", "Quelltext 0");
    let factory = RecordingFactory::default();
    let translator = common::translator(
        MockProvider::working(),
        2,
        Duration::from_secs(10),
        FailurePolicy::AbortOnFirstFailure,
    );

    let outcome =
        translate_per_language(&catalog, &["fr", "de", "en-GB"], &translator, Some(&factory)).await;

    assert!(outcome.error.is_none());
    assert_eq!(outcome.requested, 8);
    assert_eq!(outcome.responses.len(), 8);
    assert_eq!(
        *factory.requested.lock(),
        vec![
            ("fr".to_string(), 3),
            ("de".to_string(), 2),
            ("en-GB".to_string(), 3)
        ]
    );
}

#[tokio::test]
async fn test_translatePerLanguage_withNothingPending_shouldNotRunBatches() {
    let mut catalog = common::catalog_with_keys(2);
    for entry in catalog.strings.values_mut() {
        entry.set_translation("fr", "déjà");
    }
    let factory = RecordingFactory::default();
    let mock = MockProvider::working();
    let translator = common::translator(
        mock.clone(),
        2,
        Duration::from_secs(10),
        FailurePolicy::AbortOnFirstFailure,
    );

    let outcome = translate_per_language(&catalog, &["fr"], &translator, Some(&factory)).await;

    assert!(outcome.error.is_none());
    assert!(outcome.responses.is_empty());
    assert!(factory.requested.lock().is_empty());
    assert_eq!(mock.call_count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_translatePerLanguage_withTimeout_shouldReportTimeoutForLanguage() {
    let catalog = common::catalog_with_keys(4);
    let translator = common::translator(
        MockProvider::slow(2_000),
        1,
        Duration::from_millis(100),
        FailurePolicy::AbortOnFirstFailure,
    );

    let outcome = translate_per_language(&catalog, &["fr", "de"], &translator, None).await;

    let error = outcome.error.expect("orchestration should fail");
    assert!(error.is_timeout());
    assert_eq!(error.failed_language(), Some("fr"));
    assert!(outcome.responses.len() < 4);
}
