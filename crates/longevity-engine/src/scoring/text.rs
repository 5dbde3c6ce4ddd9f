//! Best-effort extraction from semi-structured clinician text. Every helper
//! follows the same contract: no match means no trigger, never an error.

use regex::Regex;
use std::sync::OnceLock;

fn numeric_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"-?\d+(?:\.\d+)?").expect("numeric token pattern compiles"))
}

/// First signed numeric token in the text, decimal point included.
/// "posture: 6cm offset" yields 6.0; "offset -1.5 cm" yields -1.5.
pub fn first_numeric_token(text: &str) -> Option<f64> {
    numeric_token_pattern()
        .find(text)
        .and_then(|token| token.as_str().parse::<f64>().ok())
}

fn unsigned_token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\d+(?:\.\d+)?").expect("unsigned token pattern compiles"))
}

/// Largest numeric token in the text. "8-10 drinks per week" yields 10.0,
/// which is the conservative reading for a reported range. Tokens here are
/// unsigned so a range dash is never read as a minus sign.
pub fn max_numeric_token(text: &str) -> Option<f64> {
    unsigned_token_pattern()
        .find_iter(text)
        .filter_map(|token| token.as_str().parse::<f64>().ok())
        .fold(None, |best, value| match best {
            Some(current) if current >= value => Some(current),
            _ => Some(value),
        })
}

const DEFICIT_KEYWORDS: &[&str] = &[
    "pain",
    "restricted",
    "restriction",
    "limited",
    "weak",
    "unable",
    "tight",
    "impaired",
    "decreased",
    "reduced",
    "deficit",
    "compensat",
    "asymmetr",
    "instability",
];

const CLEARLY_NORMAL_KEYWORDS: &[&str] = &[
    "normal",
    "wnl",
    "within normal limits",
    "no pain",
    "pain-free",
    "full",
    "intact",
    "unremarkable",
    "negative",
    "good",
];

/// Verdict from scanning qualitative free text for deficit language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordVerdict {
    /// A deficit keyword was found. Carries nothing else; callers report
    /// the matched text themselves.
    Deficit,
    ClearlyNormal,
    /// Text present but neither vocabulary matched.
    Inconclusive,
}

/// Deficit keywords win over normal keywords so "limited, otherwise normal"
/// still reads as a deficit.
pub fn scan_keywords(text: &str) -> KeywordVerdict {
    let normalized = text.trim().to_ascii_lowercase();
    if normalized.is_empty() {
        return KeywordVerdict::Inconclusive;
    }
    if DEFICIT_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
    {
        return KeywordVerdict::Deficit;
    }
    if CLEARLY_NORMAL_KEYWORDS
        .iter()
        .any(|keyword| normalized.contains(keyword))
    {
        return KeywordVerdict::ClearlyNormal;
    }
    KeywordVerdict::Inconclusive
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_first_numeric_token_with_sign_and_decimal() {
        assert_eq!(first_numeric_token("posture: 6cm offset"), Some(6.0));
        assert_eq!(first_numeric_token("offset -1.5 cm left"), Some(-1.5));
        assert_eq!(first_numeric_token("no measurable offset"), None);
    }

    #[test]
    fn max_numeric_token_takes_the_upper_end_of_ranges() {
        assert_eq!(max_numeric_token("8-10 drinks per week"), Some(10.0));
        assert_eq!(max_numeric_token("about 3 per week"), Some(3.0));
        assert_eq!(max_numeric_token("socially"), None);
    }

    #[test]
    fn keyword_scan_prefers_deficits_over_normal_language() {
        assert_eq!(scan_keywords("restricted ROM, otherwise normal"), KeywordVerdict::Deficit);
        assert_eq!(scan_keywords("Full ROM, intact"), KeywordVerdict::ClearlyNormal);
        assert_eq!(scan_keywords("patient declined"), KeywordVerdict::Inconclusive);
        assert_eq!(scan_keywords(""), KeywordVerdict::Inconclusive);
    }
}
