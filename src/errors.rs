/*!
 * Error types for the xcstrings-translator library.
 *
 * This module contains custom error types for different parts of the library,
 * using the thiserror crate for ergonomic error definitions.
 */

use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when a provider translates a single string
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Error related to rate limiting
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The call was abandoned because its batch was cancelled
    #[error("Translation cancelled")]
    Cancelled,

    /// The provider failed in an unexpected way (for example it panicked)
    #[error("Internal provider failure: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Whether repeating the same call may succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::RequestFailed(_) | Self::ConnectionError(_) | Self::RateLimitExceeded(_) => true,
            Self::ApiError { status_code, .. } => *status_code == 429 || *status_code >= 500,
            Self::ParseError(_)
            | Self::AuthenticationError(_)
            | Self::Cancelled
            | Self::Internal(_) => false,
        }
    }
}

/// Errors that make a batch or a multi-language run incomplete
#[derive(Error, Debug)]
pub enum TranslationError {
    /// The first failed response of a batch cancelled the rest of it
    #[error("Batch aborted: translating '{key}' to {target_language} failed: {source}")]
    BatchAborted {
        /// Key of the failing entry
        key: String,
        /// Target language of the failing request
        target_language: String,
        /// Original provider error
        #[source]
        source: ProviderError,
    },

    /// The overall batch deadline elapsed before every request completed
    #[error("Translation timed out after {timeout:?}: {completed} of {total} requests completed")]
    TimedOut {
        /// Responses collected before the deadline
        completed: usize,
        /// Requests submitted
        total: usize,
        /// Deadline that elapsed
        timeout: Duration,
    },

    /// Fewer responses than requests without a failure or a timeout to blame
    #[error("Translation incomplete: {completed} of {total} requests produced a response")]
    Incomplete {
        /// Responses collected
        completed: usize,
        /// Requests submitted
        total: usize,
    },

    /// A per-language batch failed and halted the remaining languages
    #[error("Translation to {language} failed: {source}")]
    LanguageFailed {
        /// Target language whose batch failed
        language: String,
        /// Batch-level cause
        #[source]
        source: Box<TranslationError>,
    },
}

impl TranslationError {
    /// Whether this error (or the batch error it wraps) is a timeout
    pub fn is_timeout(&self) -> bool {
        match self {
            Self::TimedOut { .. } => true,
            Self::LanguageFailed { source, .. } => source.is_timeout(),
            _ => false,
        }
    }

    /// Target language named by an orchestration failure
    pub fn failed_language(&self) -> Option<&str> {
        match self {
            Self::LanguageFailed { language, .. } => Some(language),
            _ => None,
        }
    }
}

/// Errors raised while loading or validating configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// No target language was configured
    #[error("At least one target language is required")]
    NoTargetLanguages,

    /// A language code could not be recognized
    #[error("Invalid language code: {0}")]
    InvalidLanguage(String),

    /// A numeric setting is out of range
    #[error("Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Offending setting
        field: &'static str,
        /// Why it was rejected
        reason: String,
    },
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error from a provider
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from translation
    #[error("Translation error: {0}")]
    Translation(#[from] TranslationError),

    /// Error from configuration
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
