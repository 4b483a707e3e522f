/*!
 * Caching decorator.
 */

use async_trait::async_trait;

use crate::errors::ProviderError;
use crate::providers::TranslationProvider;
use crate::translation::cache::TranslationCache;
use crate::translation::model::TranslationRequest;

/// Answers repeated (text, source, target) triples from a cache
///
/// Only successful translations are stored.
#[derive(Debug)]
pub struct CachedProvider<P> {
    inner: P,
    cache: TranslationCache,
}

impl<P: TranslationProvider> CachedProvider<P> {
    pub fn new(inner: P, cache: TranslationCache) -> Self {
        Self { inner, cache }
    }

    pub fn cache(&self) -> &TranslationCache {
        &self.cache
    }
}

#[async_trait]
impl<P: TranslationProvider> TranslationProvider for CachedProvider<P> {
    fn name(&self) -> &str {
        self.inner.name()
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        if let Some(text) =
            self.cache
                .get(&request.text, &request.source_language, &request.target_language)
        {
            return Ok(text);
        }

        let text = self.inner.translate(request).await?;
        self.cache.store(
            &request.text,
            &request.source_language,
            &request.target_language,
            &text,
        );
        Ok(text)
    }
}
