/*!
 * Tests for ISO language code utilities
 */

use pdftrans::language_utils::{
    get_language_name, language_codes_match, normalize_to_part1, validate_language_code,
};

#[test]
fn test_validate_withKnownCodes_shouldAccept() {
    for code in ["en", "es", "fr", "eng", "spa", "ger", "fre", "EN", " es "] {
        assert!(validate_language_code(code).is_ok(), "{} should be valid", code);
    }
}

#[test]
fn test_validate_withUnknownCodes_shouldReject() {
    for code in ["", "zz", "english", "e"] {
        assert!(validate_language_code(code).is_err(), "{} should be invalid", code);
    }
}

#[test]
fn test_normalizeToPart1_shouldMapBibliographicCodes() {
    assert_eq!(normalize_to_part1("ger").unwrap(), "de");
    assert_eq!(normalize_to_part1("fre").unwrap(), "fr");
}

#[test]
fn test_normalizeToPart1_shouldReturnPackageCodes() {
    assert_eq!(normalize_to_part1("spa").unwrap(), "es");
    assert_eq!(normalize_to_part1("eng").unwrap(), "en");
    assert_eq!(normalize_to_part1("de").unwrap(), "de");
}

#[test]
fn test_languageCodesMatch_acrossFormats() {
    assert!(language_codes_match("es", "spa"));
    assert!(language_codes_match("de", "ger"));
    assert!(!language_codes_match("en", "es"));
    assert!(!language_codes_match("en", "zz"));
}

#[test]
fn test_getLanguageName_shouldReturnEnglishName() {
    assert_eq!(get_language_name("es").unwrap(), "Spanish");
    assert_eq!(get_language_name("eng").unwrap(), "English");
    assert!(get_language_name("zz").is_err());
}
