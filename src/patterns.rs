//! Compiled regex patterns and fixed word lists.
//!
//! All patterns are compiled once at first use using `LazyLock`. The word
//! lists are part of the feature schema: classifiers trained on earlier
//! datasets depend on them matching exactly.

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

// =============================================================================
// Word Lists
// =============================================================================

/// Words whose presence anywhere in the raw HTML suggests credential harvesting.
pub const PHISHING_WORDS: &[&str] = &[
    "login", "password", "account", "verify", "security", "authenticate", "update",
    "confirm", "identity", "validation", "billing", "unusual", "suspicious", "urgent",
    "information", "recovery", "suspend", "fraud", "alert", "compromise",
];

/// Words pages use to claim trustworthiness.
pub const TRUST_WORDS: &[&str] = &[
    "official", "authorized", "genuine", "secure", "trusted", "verified", "legitimate",
];

/// Substrings identifying widely used front-end libraries.
pub const SCRIPT_LIBRARIES: &[&str] = &["jquery", "angular", "react", "vue"];

/// URL characters counted by `num_special_chars`.
pub const URL_SPECIAL_CHARS: &[char] = &[
    '-', '_', '.', '~', ':', '/', '?', '#', '[', ']', '@', '!', '$', '&', '\'', '(', ')',
    '*', '+', ',', ';', '=',
];

/// Attribute value prefixes counted as non-standard protocols.
pub const NON_STANDARD_PROTOCOLS: &[&str] = &["ftp:", "telnet:"];

// =============================================================================
// Script Content Markers
// =============================================================================

/// Script text marking a JavaScript redirect.
pub const JS_REDIRECT_MARKER: &str = "window.location.href";

/// Script text marking a document URL rewrite.
pub const DOCUMENT_URL_MARKER: &str = "document.URL";

/// Script text marking packed/obfuscated JavaScript.
pub const JS_OBFUSCATION_MARKER: &str = "eval(function";

// =============================================================================
// Text Patterns
// =============================================================================

/// Word tokens for `avg_word_length`.
pub static WORD_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z0-9_]+").expect("WORD_TOKEN regex"));

/// Inline style hiding the element.
pub static HIDDEN_DISPLAY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)display\s*:\s*none").expect("HIDDEN_DISPLAY regex"));

/// The `url=` key of a meta refresh `content` value; spaces may surround `=`.
pub static REFRESH_URL_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\burl\s*=\s*").expect("REFRESH_URL_KEY regex"));

/// Location assignments and `location.replace()/assign()` calls in scripts.
///
/// Group 1 holds the target of an assignment, group 2 the argument of a call.
pub static SCRIPT_REDIRECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?:\b(?:window|document|top|self)\.)?\blocation(?:\.href)?\s*=\s*["']([^"']+)["']|\blocation\.(?:replace|assign)\(\s*["']([^"']+)["']"#,
    )
    .expect("SCRIPT_REDIRECT regex")
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn word_lists_have_expected_sizes() {
        assert_eq!(PHISHING_WORDS.len(), 20);
        assert_eq!(TRUST_WORDS.len(), 7);
        assert_eq!(SCRIPT_LIBRARIES.len(), 4);
        assert_eq!(URL_SPECIAL_CHARS.len(), 22);
    }

    #[test]
    fn word_token_splits_on_punctuation() {
        let words: Vec<_> = WORD_TOKEN
            .find_iter("<p>hi, there_you-2</p>")
            .map(|m| m.as_str())
            .collect();
        assert_eq!(words, vec!["p", "hi", "there_you", "2", "p"]);
    }

    #[test]
    fn hidden_display_tolerates_spacing() {
        assert!(HIDDEN_DISPLAY.is_match("color: red; DISPLAY : none"));
        assert!(!HIDDEN_DISPLAY.is_match("display: block"));
    }

    #[test]
    fn refresh_url_key_allows_spacing() {
        assert_eq!(REFRESH_URL_KEY.find("0; URL = x").map(|m| m.as_str()), Some("URL = "));
        assert!(REFRESH_URL_KEY.find("0;myurl=x").is_none());
    }

    #[test]
    fn script_redirect_captures_targets() {
        let caps = SCRIPT_REDIRECT.captures(r#"window.location.href = "https://a.example/";"#);
        assert_eq!(
            caps.and_then(|c| c.get(1)).map(|m| m.as_str()),
            Some("https://a.example/")
        );

        let caps = SCRIPT_REDIRECT.captures("location.replace('/next')");
        assert_eq!(caps.and_then(|c| c.get(2)).map(|m| m.as_str()), Some("/next"));
    }
}
