/*!
 * Core translation service implementation.
 *
 * This module contains the `TranslationService`, which wires a provider into
 * the decorators its configuration asks for, runs the per-language batches
 * over a catalog and writes the results back.
 */

use log::{info, warn};
use std::sync::Arc;
use std::time::Instant;

use crate::app_config::Config;
use crate::catalog::LocalizationCatalog;
use crate::errors::{ProviderError, TranslationError};
use crate::providers::{CachedProvider, RetryingProvider, TranslationProvider};

use super::apply::apply_translations;
use super::batch::{BatchOptions, BatchTranslator};
use super::cache::{CacheStats, TranslationCache};
use super::model::TranslationRequest;
use super::orchestrator::translate_per_language;
use super::progress::ProgressReporterFactory;

/// Summary of one `translate_catalog` call
#[derive(Debug, Default)]
pub struct TranslationReport {
    /// Target languages the run was asked for, after de-duplication
    pub languages: Vec<String>,
    /// Languages whose batch completed
    pub completed_languages: Vec<String>,
    /// Requests submitted to the batch engine
    pub requested: usize,
    /// Translations written into the catalog
    pub succeeded: usize,
    /// Failed responses
    pub failed: usize,
    /// Why the run stopped early, if it did
    pub error: Option<TranslationError>,
}

impl TranslationReport {
    pub fn is_success(&self) -> bool {
        self.error.is_none() && self.failed == 0
    }
}

/// Translation service for string catalogs
#[derive(Debug, Clone)]
pub struct TranslationService {
    config: Config,
    /// Provider without decorators
    raw_provider: Arc<dyn TranslationProvider>,
    translator: BatchTranslator,
    cache: Option<TranslationCache>,
}

impl TranslationService {
    /// Create a new translation service
    ///
    /// The provider is wrapped in a retry/rate-limit layer when retries or a
    /// rate limit are configured, and in a cache layer when caching is on.
    pub fn new(config: Config, provider: Arc<dyn TranslationProvider>) -> Self {
        let settings = &config.translation;
        let mut decorated = Arc::clone(&provider);

        if settings.retry_count > 0 || settings.rate_limit.is_some() {
            decorated = Arc::new(
                RetryingProvider::new(decorated, settings.retry_count, settings.retry_backoff_ms)
                    .with_rate_limit(settings.rate_limit),
            );
        }

        let cache = settings.cache_enabled.then(|| TranslationCache::new(true));
        if let Some(cache) = &cache {
            decorated = Arc::new(CachedProvider::new(decorated, cache.clone()));
        }

        let translator = BatchTranslator::new(decorated, BatchOptions::from(settings));

        Self {
            config,
            raw_provider: provider,
            translator,
            cache,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn translator(&self) -> &BatchTranslator {
        &self.translator
    }

    pub fn cache_stats(&self) -> Option<CacheStats> {
        self.cache.as_ref().map(TranslationCache::stats)
    }

    /// Translate every missing (key, target language) pair of the catalog
    ///
    /// The catalog is only written after all batches have returned. Responses
    /// gathered before an error are still applied; the error is returned in
    /// the report.
    pub async fn translate_catalog<C>(
        &self,
        catalog: &mut C,
        progress: Option<&dyn ProgressReporterFactory>,
    ) -> TranslationReport
    where
        C: LocalizationCatalog + ?Sized,
    {
        if let Some(source) = &self.config.source_language {
            catalog.set_source_language(source);
        }

        let languages: Vec<String> = self
            .config
            .effective_target_languages()
            .into_iter()
            .filter(|l| !crate::language_utils::language_codes_match(l, catalog.source_language()))
            .collect();

        let start_time = Instant::now();
        let outcome = translate_per_language(&*catalog, &languages, &self.translator, progress).await;
        let applied = apply_translations(catalog, &outcome.responses);

        let report = TranslationReport {
            languages,
            completed_languages: outcome.completed_languages,
            requested: outcome.requested,
            succeeded: applied.applied,
            failed: applied.failed,
            error: outcome.error,
        };

        match &report.error {
            Some(e) => warn!(
                "Translation stopped early: {} ({} translations applied)",
                e, report.succeeded
            ),
            None => info!(
                "Translated {} of {} strings into {} languages in {:?}",
                report.succeeded,
                report.requested,
                report.completed_languages.len(),
                start_time.elapsed()
            ),
        }

        if let Some(stats) = self.cache_stats() {
            info!(
                "Cache: {} hits, {} misses ({:.1}% hit rate)",
                stats.hits,
                stats.misses,
                stats.hit_rate() * 100.0
            );
        }

        report
    }

    /// Check that the provider answers a short probe translation
    pub async fn test_connection(&self) -> Result<(), ProviderError> {
        let source = self.config.source_language.as_deref().unwrap_or("en");
        let target = self
            .config
            .effective_target_languages()
            .into_iter()
            .next()
            .unwrap_or_else(|| "fr".to_string());

        let probe = TranslationRequest::new("__connection_test__", "Hello", source, target);
        let text = self.raw_provider.translate(&probe).await?;

        if text.trim().is_empty() {
            return Err(ProviderError::ParseError(
                "Provider returned an empty translation".to_string(),
            ));
        }

        info!("Connection to {} provider OK", self.raw_provider.name());
        Ok(())
    }
}
