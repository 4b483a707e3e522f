/*!
 * Merging provider responses back into a catalog.
 */

use log::{debug, warn};

use crate::catalog::LocalizationCatalog;

use super::model::TranslationResponse;

/// Counts produced by [`apply_translations`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ApplySummary {
    /// Successful responses written into the catalog
    pub applied: usize,
    /// Failed responses left out
    pub failed: usize,
    /// Successful responses whose key is not in the catalog
    pub unknown_keys: usize,
}

/// Write every successful response into the catalog
///
/// Failed responses are logged and otherwise ignored, as are responses for
/// keys the catalog does not contain. Applying the same responses twice
/// leaves the catalog as applying them once.
pub fn apply_translations<C>(catalog: &mut C, responses: &[TranslationResponse]) -> ApplySummary
where
    C: LocalizationCatalog + ?Sized,
{
    let mut summary = ApplySummary::default();

    for response in responses {
        let text = match &response.outcome {
            Ok(text) => text,
            Err(e) => {
                warn!(
                    "Error translating key '{}' to {}: {}",
                    response.key, response.target_language, e
                );
                summary.failed += 1;
                continue;
            }
        };

        match catalog.entry_mut(&response.key) {
            Some(entry) => {
                entry.set_translation(&response.target_language, text);
                summary.applied += 1;
            }
            None => {
                debug!("Ignoring translation for unknown key '{}'", response.key);
                summary.unknown_keys += 1;
            }
        }
    }

    summary
}
