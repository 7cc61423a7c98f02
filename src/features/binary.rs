//! Binary Feature Set
//!
//! Presence flags, each computed by one bounded DOM query or raw-text test.
//! A missing element or attribute yields `false`.

use crate::dom::{AttrFilter, HtmlDocument};
use crate::features::external::ExternalReferences;
use crate::patterns::{
    DOCUMENT_URL_MARKER, HIDDEN_DISPLAY, JS_OBFUSCATION_MARKER, JS_REDIRECT_MARKER,
    PHISHING_WORDS, SCRIPT_LIBRARIES, TRUST_WORDS,
};

/// Presence/absence flags of one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BinaryFeatures {
    pub has_title: bool,
    pub has_meta_description: bool,
    pub has_form: bool,
    pub has_input: bool,
    pub has_button: bool,
    pub has_img: bool,
    pub has_submit_button: bool,
    pub has_link: bool,
    pub has_password_input: bool,
    pub has_email_input: bool,
    pub has_hidden_element: bool,
    pub has_audio: bool,
    pub has_video: bool,
    pub has_js_redirect: bool,
    pub has_meta_refresh_redirect: bool,
    pub has_onclick_event: bool,
    pub has_document_url_change: bool,
    pub has_inline_js: bool,
    pub has_external_link_new_tab: bool,
    pub has_cors: bool,
    pub has_js_obfuscation: bool,
    pub has_login_form: bool,
    pub has_https: bool,
    pub has_iframe: bool,
    pub has_phishing_words: bool,
    pub has_keywords: bool,
    pub has_external_links: bool,
    pub has_popular_script_libraries: bool,
}

/// Compute the binary feature set.
///
/// `html` is the raw markup the document was parsed from; word-list tests run
/// on it rather than on the parsed tree. `has_https` comes from the URL
/// structure analyzer.
#[must_use]
pub fn extract(
    doc: &HtmlDocument,
    html: &str,
    refs: &ExternalReferences,
    has_https: bool,
) -> BinaryFeatures {
    let lowered = html.to_lowercase();
    let contains_any = |words: &[&str]| words.iter().any(|w| lowered.contains(w));
    let exists = |tag: &str| doc.find(tag, &[]).is_some();

    BinaryFeatures {
        has_title: exists("title"),
        has_meta_description: doc
            .find("meta", &[AttrFilter::Equals("name", "description")])
            .is_some(),
        has_form: exists("form"),
        has_input: exists("input"),
        has_button: exists("button"),
        has_img: exists("img"),
        has_submit_button: has_input_of_type(doc, "submit"),
        has_link: exists("a"),
        has_password_input: has_input_of_type(doc, "password"),
        has_email_input: has_input_of_type(doc, "email"),
        has_hidden_element: has_hidden_element(doc),
        has_audio: exists("audio"),
        has_video: exists("video"),
        has_js_redirect: script_contains(doc, JS_REDIRECT_MARKER),
        has_meta_refresh_redirect: doc
            .find("meta", &[AttrFilter::EqualsIgnoreCase("http-equiv", "refresh")])
            .is_some(),
        has_onclick_event: doc.has_attribute_predicate(|name, _| name == "onclick"),
        has_document_url_change: script_contains(doc, DOCUMENT_URL_MARKER),
        has_inline_js: doc
            .find("script", &[])
            .is_some_and(|script| !script.text().is_empty()),
        has_external_link_new_tab: doc
            .find("a", &[AttrFilter::Equals("target", "_blank")])
            .is_some(),
        has_cors: doc
            .find("script", &[AttrFilter::Present("crossorigin")])
            .is_some(),
        has_js_obfuscation: script_contains(doc, JS_OBFUSCATION_MARKER),
        has_login_form: doc
            .find("form", &[AttrFilter::Contains("action", "login")])
            .is_some(),
        has_https,
        has_iframe: exists("iframe"),
        has_phishing_words: contains_any(PHISHING_WORDS),
        has_keywords: contains_any(TRUST_WORDS),
        has_external_links: !refs.links.is_empty(),
        has_popular_script_libraries: contains_any(SCRIPT_LIBRARIES),
    }
}

/// Whether an `<input>` with the given `type` exists.
fn has_input_of_type(doc: &HtmlDocument, input_type: &str) -> bool {
    doc.find("input", &[AttrFilter::EqualsIgnoreCase("type", input_type)])
        .is_some()
}

/// Whether any `<script>` text contains the literal `needle`.
fn script_contains(doc: &HtmlDocument, needle: &str) -> bool {
    doc.find_all("script")
        .iter()
        .any(|script| script.text().contains(needle))
}

/// Inline `display: none` on any element, or a hidden input.
fn has_hidden_element(doc: &HtmlDocument) -> bool {
    doc.has_attribute_predicate(|name, value| name == "style" && HIDDEN_DISPLAY.is_match(value))
        || has_input_of_type(doc, "hidden")
}
