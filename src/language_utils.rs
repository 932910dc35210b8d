use isolang::Language;

/// Language catalog for ISO language code handling
///
/// This module provides functions for normalizing ISO 639-1 (2-letter) and
/// ISO 639-2 (3-letter) language codes to the alpha-3 form the providers
/// expose, and for resolving display names. Unknown codes are echoed back
/// rather than rejected so that provider-specific codes still flow through.
/// Resolved information about a language code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LanguageInfo {
    /// ISO 639-1 code, if the language has one
    pub alpha_2: Option<String>,
    /// ISO 639-3 code (canonical form)
    pub alpha_3: String,
    /// English display name
    pub name: String,
}

/// Map an ISO 639-2/B code to its 639-2/T equivalent
fn part2b_to_part2t(code: &str) -> Option<&'static str> {
    match code {
        "fre" => Some("fra"), // French
        "ger" => Some("deu"), // German
        "dut" => Some("nld"), // Dutch
        "gre" => Some("ell"), // Greek
        "chi" => Some("zho"), // Chinese
        "cze" => Some("ces"), // Czech
        "ice" => Some("isl"), // Icelandic
        "alb" => Some("sqi"), // Albanian
        "arm" => Some("hye"), // Armenian
        "baq" => Some("eus"), // Basque
        "bur" => Some("mya"), // Burmese
        "per" => Some("fas"), // Persian
        "geo" => Some("kat"), // Georgian
        "may" => Some("msa"), // Malay
        "mac" => Some("mkd"), // Macedonian
        "rum" => Some("ron"), // Romanian
        "slo" => Some("slk"), // Slovak
        "wel" => Some("cym"), // Welsh
        _ => None,
    }
}

/// Resolve a 2- or 3-letter code against the ISO database
fn lookup(code: &str) -> Option<Language> {
    if code.len() == 2 {
        Language::from_639_1(code)
    } else if code.len() == 3 {
        Language::from_639_3(code)
            .or_else(|| part2b_to_part2t(code).and_then(Language::from_639_3))
    } else {
        None
    }
}

/// Get catalog information for a language code.
///
/// Unknown codes fall back to echoing the input as both the canonical code
/// and the display name instead of raising, so that callers never fail on
/// exotic or provider-internal identifiers.
pub fn get_language_info(code: &str) -> LanguageInfo {
    let normalized = code.trim().to_lowercase();
    match lookup(&normalized) {
        Some(lang) => LanguageInfo {
            alpha_2: lang.to_639_1().map(|c| c.to_string()),
            alpha_3: lang.to_639_3().to_string(),
            name: lang.to_name().to_string(),
        },
        None => LanguageInfo {
            alpha_2: None,
            alpha_3: normalized.clone(),
            name: normalized,
        },
    }
}

/// Normalize any accepted identifier form to the canonical alpha-3 code.
///
/// Accepts ISO 639-1 (2-letter), ISO 639-2/T and ISO 639-2/B (3-letter)
/// forms. Unknown codes are echoed back lowercased.
pub fn canonical_code(code: &str) -> String {
    get_language_info(code).alpha_3
}

/// Get the display name for a language code, echoing the code if unknown
pub fn get_language_name(code: &str) -> String {
    get_language_info(code).name
}

/// Check if two language codes refer to the same language
pub fn language_codes_match(code1: &str, code2: &str) -> bool {
    canonical_code(code1) == canonical_code(code2)
}
