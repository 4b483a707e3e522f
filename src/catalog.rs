/*!
 * String catalog model.
 *
 * A catalog maps keys to entries; each entry holds per-language localization
 * units. The field names follow the `.xcstrings` JSON layout so the types can
 * be read and written with serde_json by the caller.
 */

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// State written for every localization produced by a provider
pub const STATE_TRANSLATED: &str = "translated";

/// Read/write access to a catalog, as needed by the request builder and the
/// result applier
pub trait LocalizationCatalog {
    /// Language the source texts are written in
    fn source_language(&self) -> &str;

    /// All entries with their keys
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &StringEntry)> + '_>;

    /// Mutable access to one entry
    fn entry_mut(&mut self, key: &str) -> Option<&mut StringEntry>;

    /// Replace the source language; blank values leave it unchanged
    fn set_source_language(&mut self, language: &str);
}

/// A (state, value) pair for one key in one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StringUnit {
    /// Translation state, e.g. "translated" or "needs_review"
    #[serde(default)]
    pub state: String,

    /// Localized text
    #[serde(default)]
    pub value: String,
}

/// Localization of one entry in one language
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Localization {
    #[serde(rename = "stringUnit", default, skip_serializing_if = "Option::is_none")]
    pub string_unit: Option<StringUnit>,
}

impl Localization {
    pub fn new(state: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            string_unit: Some(StringUnit {
                state: state.into(),
                value: value.into(),
            }),
        }
    }

    /// Localized text, empty when the unit is missing
    pub fn value(&self) -> &str {
        self.string_unit.as_ref().map(|u| u.value.as_str()).unwrap_or("")
    }

    pub fn state(&self) -> Option<&str> {
        self.string_unit.as_ref().map(|u| u.state.as_str())
    }
}

/// One catalog key's data
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StringEntry {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub localizations: BTreeMap<String, Localization>,

    /// `Some(false)` excludes the entry from translation
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_translate: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extraction_state: Option<String>,
}

impl StringEntry {
    /// Whether the entry carries an explicit "do not translate" marker
    pub fn is_excluded(&self) -> bool {
        self.should_translate == Some(false)
    }

    /// Whether any localization exists for `language`, whatever its state
    pub fn has_localization(&self, language: &str) -> bool {
        self.localizations.contains_key(language)
    }

    /// Upsert a provider translation for `language`
    pub fn set_translation(&mut self, language: &str, text: &str) {
        self.localizations
            .insert(language.to_string(), Localization::new(STATE_TRANSLATED, text));
    }
}

/// In-memory string catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub source_language: String,

    #[serde(default)]
    pub strings: BTreeMap<String, StringEntry>,

    #[serde(default)]
    pub version: String,
}

/// Per-entry view of what is still missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntrySummary {
    pub key: String,
    /// Source text, falling back to the key
    pub source: String,
    /// Target languages with no localization or an empty value
    pub missing: Vec<String>,
}

/// Overview of a catalog against a set of target languages
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogSummary {
    pub source_language: String,
    /// Every language present in the catalog plus the source, sorted
    pub available_languages: Vec<String>,
    pub total_strings: usize,
    pub entries: Vec<EntrySummary>,
}

impl CatalogSummary {
    /// Number of (key, language) pairs still missing
    pub fn missing_count(&self) -> usize {
        self.entries.iter().map(|e| e.missing.len()).sum()
    }
}

impl Catalog {
    pub fn new(source_language: impl Into<String>) -> Self {
        Self {
            source_language: source_language.into(),
            strings: BTreeMap::new(),
            version: "1.0".to_string(),
        }
    }

    /// Replace the catalog's source language (no-op for blank overrides)
    pub fn with_source_language(mut self, language: &str) -> Self {
        self.override_source_language(language);
        self
    }

    pub fn override_source_language(&mut self, language: &str) {
        let language = language.trim();
        if !language.is_empty() {
            self.source_language = language.to_string();
        }
    }

    /// Insert an entry whose source text lives under the source language
    pub fn insert_source(&mut self, key: impl Into<String>, text: impl Into<String>) -> &mut StringEntry {
        let source_language = self.source_language.clone();
        let entry = self.strings.entry(key.into()).or_default();
        entry
            .localizations
            .insert(source_language, Localization::new(STATE_TRANSLATED, text));
        entry
    }

    pub fn get(&self, key: &str) -> Option<&StringEntry> {
        self.strings.get(key)
    }

    pub fn len(&self) -> usize {
        self.strings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.strings.is_empty()
    }

    /// Sorted set of languages used anywhere in the catalog
    pub fn languages(&self) -> Vec<String> {
        let mut languages = BTreeSet::new();
        if !self.source_language.is_empty() {
            languages.insert(self.source_language.clone());
        }
        for entry in self.strings.values() {
            languages.extend(entry.localizations.keys().cloned());
        }
        languages.into_iter().collect()
    }

    /// Summarize which targets each entry is still missing
    ///
    /// With no explicit targets every non-source language in the catalog is
    /// used.
    pub fn summary(&self, targets: &[String]) -> CatalogSummary {
        let available_languages = self.languages();
        let targets: Vec<String> = if targets.is_empty() {
            available_languages
                .iter()
                .filter(|l| **l != self.source_language)
                .cloned()
                .collect()
        } else {
            crate::language_utils::dedupe_languages(targets)
        };

        let entries = self
            .strings
            .iter()
            .map(|(key, entry)| {
                let source = entry
                    .localizations
                    .get(&self.source_language)
                    .map(Localization::value)
                    .filter(|v| !v.is_empty())
                    .unwrap_or(key.as_str())
                    .to_string();
                let missing = targets
                    .iter()
                    .filter(|t| entry.localizations.get(*t).is_none_or(|l| l.value().is_empty()))
                    .cloned()
                    .collect();
                EntrySummary {
                    key: key.clone(),
                    source,
                    missing,
                }
            })
            .collect();

        CatalogSummary {
            source_language: self.source_language.clone(),
            available_languages,
            total_strings: self.strings.len(),
            entries,
        }
    }
}

impl LocalizationCatalog for Catalog {
    fn source_language(&self) -> &str {
        &self.source_language
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &StringEntry)> + '_> {
        Box::new(self.strings.iter().map(|(k, v)| (k.as_str(), v)))
    }

    fn entry_mut(&mut self, key: &str) -> Option<&mut StringEntry> {
        self.strings.get_mut(key)
    }

    fn set_source_language(&mut self, language: &str) {
        self.override_source_language(language);
    }
}
