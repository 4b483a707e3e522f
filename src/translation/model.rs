/*!
 * Request and response values exchanged with providers.
 */

use crate::errors::ProviderError;

/// One string to translate into one target language
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranslationRequest {
    /// Catalog key the text belongs to
    pub key: String,

    /// Source text
    pub text: String,

    /// Language of `text`
    pub source_language: String,

    /// Language to translate into
    pub target_language: String,
}

impl TranslationRequest {
    pub fn new(
        key: impl Into<String>,
        text: impl Into<String>,
        source_language: impl Into<String>,
        target_language: impl Into<String>,
    ) -> Self {
        Self {
            key: key.into(),
            text: text.into(),
            source_language: source_language.into(),
            target_language: target_language.into(),
        }
    }
}

/// Result of translating one request
///
/// Either the translated text or the provider error, never both.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslationResponse {
    pub key: String,
    pub target_language: String,
    pub outcome: Result<String, ProviderError>,
}

impl TranslationResponse {
    pub fn success(request: &TranslationRequest, text: impl Into<String>) -> Self {
        Self {
            key: request.key.clone(),
            target_language: request.target_language.clone(),
            outcome: Ok(text.into()),
        }
    }

    pub fn failure(request: &TranslationRequest, error: ProviderError) -> Self {
        Self {
            key: request.key.clone(),
            target_language: request.target_language.clone(),
            outcome: Err(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    pub fn translated_text(&self) -> Option<&str> {
        self.outcome.as_deref().ok()
    }

    pub fn error(&self) -> Option<&ProviderError> {
        self.outcome.as_ref().err()
    }
}
