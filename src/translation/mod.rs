/*!
 * Concurrent batch translation of string catalogs.
 *
 * This module is split into several submodules:
 *
 * - `model`: Request and response values
 * - `requests`: Deriving the requests a catalog still needs
 * - `batch`: The worker-pool batch engine
 * - `orchestrator`: Running one batch per target language
 * - `apply`: Writing responses back into the catalog
 * - `progress`: Progress sinks (log lines, terminal bars)
 * - `cache`: Translation memo used by the caching provider
 * - `core`: The `TranslationService` tying it all together
 */

// Re-export main types for easier usage
pub use self::apply::{ApplySummary, apply_translations};
pub use self::batch::{BatchOptions, BatchOutcome, BatchTranslator, Cancellation};
pub use self::cache::{CacheStats, TranslationCache};
pub use self::core::{TranslationReport, TranslationService};
pub use self::model::{TranslationRequest, TranslationResponse};
pub use self::orchestrator::{OrchestratorOutcome, translate_per_language};
pub use self::progress::{
    LogProgress, LogProgressFactory, ProgressBars, ProgressReporterFactory, ProgressSink,
};
pub use self::requests::{build_requests, build_requests_for_language};

// Submodules
pub mod apply;
pub mod batch;
pub mod cache;
pub mod core;
pub mod model;
pub mod orchestrator;
pub mod progress;
pub mod requests;
