use anyhow::{Result, anyhow};
use isolang::Language;
use std::collections::HashSet;

/// Language utilities for catalog language tags
///
/// String catalogs identify languages with BCP-47 style tags such as `en`,
/// `zh-Hans`, `pt-BR` or `es-419`. The primary subtag is checked against
/// ISO 639 with isolang; the remaining subtags only have to be well formed.

/// ISO 639-2/B codes that differ from their ISO 639-2/T form
const PART2B_TO_PART2T: &[(&str, &str)] = &[
    ("fre", "fra"),
    ("ger", "deu"),
    ("dut", "nld"),
    ("gre", "ell"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("ice", "isl"),
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("per", "fas"),
    ("geo", "kat"),
    ("may", "msa"),
    ("mac", "mkd"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Split a tag into its primary subtag and the rest
fn split_tag(code: &str) -> (String, Vec<&str>) {
    let mut parts = code.trim().split(['-', '_']);
    let primary = parts.next().unwrap_or_default().to_lowercase();
    (primary, parts.collect())
}

/// Resolve a primary subtag to an isolang language
fn primary_language(primary: &str) -> Option<Language> {
    match primary.len() {
        2 => Language::from_639_1(primary),
        3 => {
            let part2t = PART2B_TO_PART2T
                .iter()
                .find(|(b, _)| *b == primary)
                .map(|(_, t)| *t)
                .unwrap_or(primary);
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate a catalog language tag
pub fn validate_language_code(code: &str) -> Result<()> {
    let (primary, subtags) = split_tag(code);

    if primary_language(&primary).is_none() {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    let well_formed = subtags
        .iter()
        .all(|s| (2..=8).contains(&s.len()) && s.chars().all(|c| c.is_ascii_alphanumeric()));
    if !well_formed {
        return Err(anyhow!("Invalid language code: {}", code));
    }

    Ok(())
}

/// Get the English language name for a tag's primary subtag
pub fn get_language_name(code: &str) -> Result<String> {
    let (primary, _) = split_tag(code);
    let lang = primary_language(&primary)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Check if two language tags name the same catalog language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    code1.trim().eq_ignore_ascii_case(code2.trim())
}

/// Trim, drop blanks and keep the first occurrence of every language
pub fn dedupe_languages<S: AsRef<str>>(languages: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    languages
        .iter()
        .map(|l| l.as_ref().trim())
        .filter(|l| !l.is_empty())
        .filter(|l| seen.insert(l.to_string()))
        .map(str::to_string)
        .collect()
}
