/*!
 * Derivation of the requests a catalog still needs.
 */

use log::debug;

use crate::catalog::{LocalizationCatalog, StringEntry};

use super::model::TranslationRequest;

/// Source text for an entry: the source-language value, or the key itself
/// when that value is missing or empty
fn source_text<'a>(key: &'a str, entry: &'a StringEntry, source_language: &str) -> Option<&'a str> {
    let value = entry
        .localizations
        .get(source_language)
        .map(|l| l.value())
        .unwrap_or("");

    if !value.is_empty() {
        Some(value)
    } else if !key.is_empty() {
        Some(key)
    } else {
        None
    }
}

/// Build one request per (untranslated key, target language) pair
///
/// Entries marked "do not translate" and entries without any usable source
/// text are skipped. A target language the entry already has a localization
/// for, in any state, is never requested again.
pub fn build_requests<C, S>(catalog: &C, target_languages: &[S]) -> Vec<TranslationRequest>
where
    C: LocalizationCatalog + ?Sized,
    S: AsRef<str>,
{
    let source_language = catalog.source_language();
    let mut requests = Vec::new();
    let mut skipped = 0usize;

    for (key, entry) in catalog.entries() {
        if entry.is_excluded() {
            skipped += 1;
            continue;
        }

        let Some(text) = source_text(key, entry, source_language) else {
            skipped += 1;
            continue;
        };

        for target in target_languages {
            let target = target.as_ref();
            if entry.has_localization(target) {
                continue;
            }
            requests.push(TranslationRequest::new(key, text, source_language, target));
        }
    }

    debug!(
        "Built {} translation requests ({} entries skipped)",
        requests.len(),
        skipped
    );
    requests
}

/// Build the requests for a single target language
pub fn build_requests_for_language<C>(catalog: &C, target_language: &str) -> Vec<TranslationRequest>
where
    C: LocalizationCatalog + ?Sized,
{
    build_requests(catalog, &[target_language])
}
