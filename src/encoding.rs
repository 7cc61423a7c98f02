//! Character encoding detection for byte input.
//!
//! Pages stored by scrapers keep whatever charset the server sent. Before
//! parsing, bytes are decoded using (in order) a byte-order mark, a
//! `<meta charset>` declaration, a `Content-Type` meta declaration, or UTF-8.

use encoding_rs::{Encoding, UTF_8};
use regex::Regex;
use std::sync::LazyLock;

/// How many leading bytes are searched for a charset declaration.
const DECLARATION_WINDOW: usize = 1024;

/// `<meta charset="...">`
#[allow(clippy::expect_used)]
static META_CHARSET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+charset\s*=\s*["']?([^"'\s>/;]+)"#).expect("META_CHARSET regex")
});

/// `<meta http-equiv="Content-Type" content="text/html; charset=...">`
#[allow(clippy::expect_used)]
static META_CONTENT_TYPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)<meta[^>]+http-equiv\s*=\s*["']?content-type["']?[^>]+content\s*=\s*["']?[^"'>]*;\s*charset\s*=\s*([^"'\s>;]+)"#)
        .expect("META_CONTENT_TYPE regex")
});

/// Detect the character encoding of HTML bytes.
#[must_use]
pub fn detect_encoding(html: &[u8]) -> &'static Encoding {
    if let Some((encoding, _bom_len)) = Encoding::for_bom(html) {
        return encoding;
    }

    let window = String::from_utf8_lossy(&html[..html.len().min(DECLARATION_WINDOW)]);

    [&*META_CONTENT_TYPE, &*META_CHARSET]
        .iter()
        .filter_map(|re| re.captures(&window).and_then(|c| c.get(1)))
        .find_map(|label| Encoding::for_label(label.as_str().as_bytes()))
        .unwrap_or(UTF_8)
}

/// Decode HTML bytes to a UTF-8 string.
///
/// Invalid sequences become U+FFFD rather than failing; a BOM is stripped.
///
/// # Examples
///
/// ```
/// use phish_features::encoding::decode_html;
///
/// let html = b"<meta charset=\"windows-1252\"><p>Caf\xE9</p>";
/// assert!(decode_html(html).contains("Café"));
/// ```
#[must_use]
pub fn decode_html(html: &[u8]) -> String {
    let (decoded, _encoding, _had_errors) = detect_encoding(html).decode(html);
    decoded.into_owned()
}
