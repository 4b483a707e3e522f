/*!
 * # xcstrings-translator
 *
 * A Rust library for translating localization string catalogs with
 * pluggable translation providers.
 *
 * ## Features
 *
 * - Works out which (key, language) pairs a catalog is still missing
 * - Translates them concurrently with a bounded worker pool per language
 * - Enforces a deadline per batch and stops a batch on its first failure
 *   (or collects every failure, if configured)
 * - Retries transient provider failures with exponential backoff
 * - Client-side rate limiting and a translation cache
 * - Progress reporting through log lines or terminal progress bars
 * - BCP-47 style language tags checked against ISO 639
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `catalog`: The catalog model and the capability the engine needs
 * - `translation`: The batch translation engine:
 *   - `translation::requests`: Request derivation
 *   - `translation::batch`: Worker pool, deadline and cancellation
 *   - `translation::orchestrator`: Language-by-language sequencing
 *   - `translation::apply`: Writing results back
 *   - `translation::core`: The `TranslationService`
 * - `providers`: The provider trait plus retry, cache and mock providers
 * - `language_utils`: Language tag utilities
 * - `errors`: Custom error types for the library
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod catalog;
pub mod errors;
pub mod language_utils;
pub mod providers;
pub mod translation;

// Re-export main types for easier usage
pub use app_config::{Config, FailurePolicy, LogLevel, TranslationConfig};
pub use catalog::{Catalog, Localization, LocalizationCatalog, StringEntry, StringUnit};
pub use errors::{AppError, ConfigError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, validate_language_code};
pub use providers::{MockProvider, TranslationProvider};
pub use translation::{
    BatchTranslator, TranslationReport, TranslationRequest, TranslationResponse,
    TranslationService,
};
