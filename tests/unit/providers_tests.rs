/*!
 * Tests for provider decorators working together
 */

use std::sync::Arc;
use std::time::Duration;

use xcstrings_translator::app_config::FailurePolicy;
use xcstrings_translator::errors::ProviderError;
use xcstrings_translator::providers::{
    CachedProvider, MockBehavior, MockProvider, RetryingProvider, TranslationProvider,
};
use xcstrings_translator::translation::{BatchOptions, BatchTranslator, TranslationCache, TranslationRequest};

use crate::common;

#[tokio::test]
async fn test_arcProvider_shouldDelegateToInner() {
    let mock = MockProvider::working();
    let provider: Arc<dyn TranslationProvider> = Arc::new(mock.clone());
    let request = TranslationRequest::new("title", "Inbox", "en", "sv");

    let text = provider.translate(&request).await.unwrap();

    assert_eq!(provider.name(), "mock");
    assert_eq!(text, MockProvider::expected_translation(&request));
    assert_eq!(mock.calls(), vec![request]);
}

#[tokio::test(start_paused = true)]
async fn test_cacheOverRetry_withTransientFailure_shouldRetryOnceThenServeFromCache() {
    let mock = MockProvider::fail_times(1);
    let cache = TranslationCache::new(true);
    let provider = CachedProvider::new(RetryingProvider::new(mock.clone(), 2, 50), cache.clone());
    let request = TranslationRequest::new("ok", "OK", "en", "nl");

    assert!(provider.translate(&request).await.is_ok());
    assert!(provider.translate(&request).await.is_ok());

    assert_eq!(mock.call_count(), 2);
    assert_eq!(cache.stats().hits, 1);
}

#[tokio::test(start_paused = true)]
async fn test_retryingProvider_insideBatch_shouldHideTransientFailures() {
    let mock = MockProvider::fail_times(3);
    let provider = RetryingProvider::new(mock.clone(), 3, 10);
    let translator = BatchTranslator::new(
        Arc::new(provider),
        BatchOptions {
            concurrency: 2,
            timeout: Duration::from_secs(60),
            failure_policy: FailurePolicy::AbortOnFirstFailure,
        },
    );

    let outcome = translator.translate_batch(common::requests(6, "fr"), None).await;

    assert!(outcome.error.is_none());
    assert_eq!(outcome.succeeded(), 6);
    assert_eq!(mock.call_count(), 9);
}

#[tokio::test]
async fn test_mockBehavior_failOnLanguage_shouldOnlyFailThatLanguage() {
    let mock = MockProvider::new(MockBehavior::FailOnLanguage("de".to_string()));

    let fr = mock.translate(&TranslationRequest::new("a", "A", "en", "fr")).await;
    let de = mock.translate(&TranslationRequest::new("a", "A", "en", "de")).await;

    assert!(fr.is_ok());
    assert!(matches!(de, Err(ProviderError::ApiError { status_code: 500, .. })));
}
