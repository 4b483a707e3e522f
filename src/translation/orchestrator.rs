/*!
 * Per-language sequencing of batches.
 *
 * Languages are translated one after another, each as its own batch, so only
 * one language's requests are in memory at a time and a failure keeps the
 * results of the languages that already finished.
 */

use log::{debug, info, warn};

use crate::catalog::LocalizationCatalog;
use crate::errors::TranslationError;

use super::batch::BatchTranslator;
use super::model::TranslationResponse;
use super::progress::ProgressReporterFactory;
use super::requests::build_requests_for_language;

/// Result of a multi-language run
#[derive(Debug, Default)]
pub struct OrchestratorOutcome {
    /// Responses of every language attempted, including the failing one
    pub responses: Vec<TranslationResponse>,
    /// Requests submitted across all attempted languages
    pub requested: usize,
    /// Languages whose batch finished without error, in order
    pub completed_languages: Vec<String>,
    /// Set when a language's batch failed; later languages were not run
    pub error: Option<TranslationError>,
}

/// Translate the catalog language by language, stopping at the first
/// language whose batch reports an error
///
/// Languages without pending requests are skipped without running a batch.
/// The catalog is only read; applying the responses is up to the caller.
pub async fn translate_per_language<C, S>(
    catalog: &C,
    target_languages: &[S],
    translator: &BatchTranslator,
    progress: Option<&dyn ProgressReporterFactory>,
) -> OrchestratorOutcome
where
    C: LocalizationCatalog + ?Sized,
    S: AsRef<str>,
{
    let mut outcome = OrchestratorOutcome::default();

    for language in target_languages {
        let language = language.as_ref();
        let requests = build_requests_for_language(catalog, language);
        if requests.is_empty() {
            debug!("Nothing to translate for {}", language);
            continue;
        }

        let count = requests.len();
        info!("Translating {} strings to {}", count, language);
        outcome.requested += count;

        let reporter = progress.map(|factory| factory.reporter(language, count));
        let batch = translator.translate_batch(requests, reporter.as_deref()).await;

        outcome.responses.extend(batch.responses);

        if let Some(e) = batch.error {
            warn!("Stopping after {}: {}", language, e);
            outcome.error = Some(TranslationError::LanguageFailed {
                language: language.to_string(),
                source: Box::new(e),
            });
            break;
        }

        outcome.completed_languages.push(language.to_string());
    }

    outcome
}
