/*!
 * Provider abstraction for translation backends.
 *
 * The batch engine only ever sees a [`TranslationProvider`]: "translate one
 * string, return text or an error". Vendor clients live outside this crate
 * and plug in by implementing the trait. This module also carries the
 * decorators the service layers on top of a raw provider:
 * - `RetryingProvider`: retries transient failures and spaces out calls
 * - `CachedProvider`: answers repeated texts from a `TranslationCache`
 * - `MockProvider`: scripted behaviours for tests and benchmarks
 */

use async_trait::async_trait;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::ProviderError;
use crate::translation::model::TranslationRequest;

/// Common trait for all translation providers
///
/// Implementations report ordinary failures through the returned
/// `ProviderError`. Dropping the returned future is how a cancelled batch
/// abandons an in-flight call, so implementations must not rely on running
/// to completion.
#[async_trait]
pub trait TranslationProvider: Send + Sync + Debug {
    /// Short name used in logs
    fn name(&self) -> &str;

    /// Translate the request's text into its target language
    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError>;
}

#[async_trait]
impl<P: TranslationProvider + ?Sized> TranslationProvider for Arc<P> {
    fn name(&self) -> &str {
        (**self).name()
    }

    async fn translate(&self, request: &TranslationRequest) -> Result<String, ProviderError> {
        (**self).translate(request).await
    }
}

pub mod cached;
pub mod mock;
pub mod retry;

pub use cached::CachedProvider;
pub use mock::{MockBehavior, MockProvider};
pub use retry::RetryingProvider;
