//! URL Structure Analyzer
//!
//! Features derived from the URL string alone, independent of the document.

use crate::patterns::URL_SPECIAL_CHARS;

/// Structural features of a source URL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UrlFeatures {
    /// `.`-delimited label count minus two.
    pub num_subdomains: i64,
    /// Characters from the reserved/special URL character set.
    pub num_special_chars: usize,
    /// URL starts with `https://`.
    pub has_https: bool,
}

/// Analyze a URL string.
#[must_use]
pub fn analyze(url: &str) -> UrlFeatures {
    UrlFeatures {
        num_subdomains: num_subdomains(url),
        num_special_chars: num_special_chars(url),
        has_https: has_https(url),
    }
}

/// Number of `.`-separated pieces of the whole URL, minus two.
///
/// An approximation kept for compatibility with existing datasets: path and
/// query dots count, multi-label TLDs such as `co.uk` inflate the result and
/// a bare `localhost` gives `-1`.
#[must_use]
pub fn num_subdomains(url: &str) -> i64 {
    let pieces = i64::try_from(url.split('.').count()).unwrap_or(i64::MAX);
    pieces - 2
}

/// Count of characters in `- _ . ~ : / ? # [ ] @ ! $ & ' ( ) * + , ; =`.
#[must_use]
pub fn num_special_chars(url: &str) -> usize {
    url.chars().filter(|c| URL_SPECIAL_CHARS.contains(c)).count()
}

/// Whether the URL begins with the literal `https://`.
#[must_use]
pub fn has_https(url: &str) -> bool {
    url.starts_with("https://")
}
