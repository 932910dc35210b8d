/*!
 * Unit tests for the language catalog
 */

use sentex::language_utils::{
    canonical_code, get_language_info, get_language_name, language_codes_match,
};

#[test]
fn test_canonicalCode_shouldNormalizeAcrossAllAcceptedForms() {
    // (input, canonical alpha-3)
    let cases = [
        ("en", "eng"),
        ("eng", "eng"),
        ("ja", "jpn"),
        ("jpn", "jpn"),
        ("tr", "tur"),
        ("de", "deu"),
        ("ger", "deu"),
        ("fre", "fra"),
        ("fra", "fra"),
    ];
    for (input, expected) in cases {
        assert_eq!(canonical_code(input), expected, "input: {}", input);
    }
}

#[test]
fn test_canonicalCode_shouldTolerateCaseAndWhitespace() {
    assert_eq!(canonical_code(" EN "), "eng");
    assert_eq!(canonical_code("Jpn"), "jpn");
}

#[test]
fn test_canonicalCode_withUnknownCode_shouldEchoLowercased() {
    assert_eq!(canonical_code("QQ"), "qq");
    assert_eq!(canonical_code("tlh-extended"), "tlh-extended");
}

#[test]
fn test_getLanguageInfo_withoutAlpha2_shouldStillResolve() {
    // Ancient Greek has no ISO 639-1 code
    let info = get_language_info("grc");
    assert!(info.alpha_2.is_none());
    assert_eq!(info.alpha_3, "grc");
    assert!(info.name.contains("Greek"));
}

#[test]
fn test_getLanguageName_shouldResolveDisplayNames() {
    assert_eq!(get_language_name("tur"), "Turkish");
    assert_eq!(get_language_name("ja"), "Japanese");
}

#[test]
fn test_languageCodesMatch_shouldBeSymmetric() {
    assert!(language_codes_match("en", "eng"));
    assert!(language_codes_match("eng", "en"));
    assert!(!language_codes_match("unknown1", "unknown2"));
    assert!(language_codes_match("unknown1", "unknown1"));
}
