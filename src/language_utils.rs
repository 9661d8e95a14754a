use anyhow::{Result, anyhow};
use isolang::Language;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Language utilities for ISO language code handling
///
/// Translation packages are keyed by ISO 639-1 codes ("en", "es"), while users
/// and configuration files may use ISO 639-2 codes ("spa", "ger"). These helpers
/// validate and normalize between the two.

// ISO 639-2/B codes that differ from their 639-2/T counterpart
static BIBLIOGRAPHIC_CODES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
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
    ])
});

fn lookup(code: &str) -> Option<Language> {
    let normalized = code.trim().to_lowercase();
    match normalized.len() {
        2 => Language::from_639_1(&normalized),
        3 => {
            let part2t = BIBLIOGRAPHIC_CODES
                .get(normalized.as_str())
                .copied()
                .unwrap_or(normalized.as_str());
            Language::from_639_3(part2t)
        }
        _ => None,
    }
}

/// Validate that a code is a known ISO 639-1 or ISO 639-2 language code
pub fn validate_language_code(code: &str) -> Result<()> {
    lookup(code)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", code))
}

/// Normalize a language code to ISO 639-1 (2-letter) format, the form used by
/// translation packages. Falls back to ISO 639-2/T when no 2-letter code exists.
pub fn normalize_to_part1(code: &str) -> Result<String> {
    let lang = lookup(code).ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;
    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Check if two language codes represent the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    match (lookup(code1), lookup(code2)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let lang = lookup(code).ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;
    Ok(lang.to_name().to_string())
}
