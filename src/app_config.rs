use anyhow::{Context, Result};
use log::LevelFilter;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use crate::errors::ConfigError;
use crate::language_utils;

/// Application configuration module
/// This module handles loading and validating the settings that drive a
/// catalog translation run.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Overrides the catalog's own source language when set
    #[serde(default)]
    pub source_language: Option<String>,

    /// Target language codes, processed in order
    #[serde(default)]
    pub target_languages: Vec<String>,

    /// Translation config
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// What a batch does when one of its requests fails
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// Cancel the rest of the batch and report the first failure
    #[default]
    AbortOnFirstFailure,
    /// Translate everything; failures only show up as failed responses
    CollectAll,
}

/// Settings for the batch engine and the provider decorators
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TranslationConfig {
    /// Number of parallel workers per batch
    #[serde(default = "default_concurrency")]
    pub concurrency: usize,

    /// Deadline for a whole batch, in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    #[serde(default)]
    pub failure_policy: FailurePolicy,

    /// Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    /// Backoff multiplier for retries (in milliseconds)
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,

    /// Rate limit (requests per minute)
    #[serde(default)]
    pub rate_limit: Option<u32>,

    /// Whether identical texts are only translated once
    #[serde(default = "default_true")]
    pub cache_enabled: bool,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            concurrency: default_concurrency(),
            timeout_secs: default_timeout_secs(),
            failure_policy: FailurePolicy::default(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
            rate_limit: None,
            cache_enabled: true,
        }
    }
}

impl TranslationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_concurrency() -> usize {
    5
}

fn default_timeout_secs() -> u64 {
    300
}

fn default_retry_count() -> u32 {
    3
}

fn default_retry_backoff_ms() -> u64 {
    1000 // doubled on each retry
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Create a configuration with default settings for the given targets
    pub fn new<S: AsRef<str>>(target_languages: &[S]) -> Self {
        Self {
            target_languages: target_languages.iter().map(|l| l.as_ref().to_string()).collect(),
            ..Self::default()
        }
    }

    /// Load a JSON configuration file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .context(format!("Failed to open config file: {}", path.display()))?;

        let reader = BufReader::new(file);
        let config: Config = serde_json::from_reader(reader)
            .context(format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Failed to parse configuration")
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<(), ConfigError> {
        let source = self.source_language.as_deref().unwrap_or("").trim();
        if !source.is_empty() {
            language_utils::validate_language_code(source)
                .map_err(|_| ConfigError::InvalidLanguage(source.to_string()))?;
        }

        let targets = self.effective_target_languages();
        if targets.is_empty() {
            return Err(ConfigError::NoTargetLanguages);
        }
        for target in &targets {
            language_utils::validate_language_code(target)
                .map_err(|_| ConfigError::InvalidLanguage(target.clone()))?;
        }

        if self.translation.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "timeout_secs",
                reason: "must be greater than zero".to_string(),
            });
        }
        if self.translation.rate_limit == Some(0) {
            return Err(ConfigError::InvalidValue {
                field: "rate_limit",
                reason: "must be greater than zero when set".to_string(),
            });
        }

        Ok(())
    }

    /// Target languages with blanks, duplicates and the source language removed
    pub fn effective_target_languages(&self) -> Vec<String> {
        let source = self.source_language.as_deref().unwrap_or("").trim();
        language_utils::dedupe_languages(&self.target_languages)
            .into_iter()
            .filter(|l| source.is_empty() || !language_utils::language_codes_match(l, source))
            .collect()
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: None,
            target_languages: Vec::new(),
            translation: TranslationConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
