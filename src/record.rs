//! Feature record types.
//!
//! A [`FeatureRecord`] is the fixed-schema output of one extraction. Its key
//! set and order depend only on the [`SchemaVariant`], never on document
//! content: classifiers consume it positionally and datasets by column.

use std::fmt;

use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::features::{BinaryFeatures, HeuristicFeatures, QuantitativeFeatures, UrlFeatures};

/// Sentinel label text treated as a missing value on numeric coercion.
pub const UNKNOWN: &str = "unknown";

/// Provenance keys leading the URL-content schema.
pub const PROVENANCE_KEYS: &[&str] = &["url", "type"];

/// Feature keys in canonical order, shared by both schema variants.
pub const FEATURE_KEYS: &[&str] = &[
    // binary
    "has_title",
    "has_meta_description",
    "has_form",
    "has_input",
    "has_button",
    "has_img",
    "has_submit_button",
    "has_link",
    "has_password_input",
    "has_email_input",
    "has_hidden_element",
    "has_audio",
    "has_video",
    "has_js_redirect",
    "has_meta_refresh_redirect",
    "has_onclick_event",
    "has_document_url_change",
    "has_inline_js",
    "has_external_link_new_tab",
    "has_cors",
    "has_js_obfuscation",
    "has_login_form",
    "has_https",
    "has_iframe",
    "has_phishing_words",
    "has_keywords",
    "has_external_links",
    "has_popular_script_libraries",
    // quantitative
    "num_input_tags",
    "num_button_tags",
    "num_img_tags",
    "num_option_tags",
    "num_list_tags",
    "num_th_tags",
    "num_tr_tags",
    "num_href_attributes",
    "num_paragraph_tags",
    "num_script_tags",
    "num_links",
    "num_images",
    "num_scripts",
    "num_styles",
    "num_forms",
    "num_external_domains",
    "num_external_resources",
    "num_external_forms",
    "num_external_links",
    "num_external_images",
    // heuristic
    "avg_word_length",
    "avg_link_text_length",
    "content_length",
    "url_length",
    "has_ip_in_url",
    "uses_url_shortener",
    "uses_https",
    "has_login_forms",
    "percentage_external_resources",
    "percentage_external_forms",
    "percentage_external_links",
    "percentage_js_content",
    "has_non_standard_protocols",
    "has_multiple_domain_redirects",
    "domain_name_similarity",
    // url structure
    "num_subdomains",
    "num_special_chars",
];

/// Which key set a record exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SchemaVariant {
    /// Feature keys only; direct classifier input.
    #[default]
    Prediction,
    /// `url` and `type` followed by the feature keys; dataset rows.
    UrlContent,
}

impl SchemaVariant {
    /// Ordered keys of this variant.
    #[must_use]
    pub fn keys(self) -> Vec<&'static str> {
        match self {
            Self::Prediction => FEATURE_KEYS.to_vec(),
            Self::UrlContent => PROVENANCE_KEYS.iter().chain(FEATURE_KEYS).copied().collect(),
        }
    }

    /// Number of keys in this variant.
    #[must_use]
    pub fn key_count(self) -> usize {
        match self {
            Self::Prediction => FEATURE_KEYS.len(),
            Self::UrlContent => PROVENANCE_KEYS.len() + FEATURE_KEYS.len(),
        }
    }
}

/// A single feature value.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureValue {
    Bool(bool),
    Int(i64),
    Real(f64),
    /// Not computed or not applicable; NaN on numeric coercion.
    Missing,
    /// Provenance text (`url`, `type`).
    Text(String),
}

impl FeatureValue {
    /// Text value, or missing when absent.
    #[must_use]
    pub fn text(value: Option<&str>) -> Self {
        value.map_or(Self::Missing, |v| Self::Text(v.to_string()))
    }

    /// Numeric coercion for classifier input.
    ///
    /// Booleans become `0`/`1`. Missing values and the `"unknown"` sentinel
    /// become NaN, never `0`. Other text is parsed as a number, NaN if it
    /// is not one.
    #[must_use]
    pub fn as_f64(&self) -> f64 {
        match self {
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Int(i) => *i as f64,
            Self::Real(r) => *r,
            Self::Missing => f64::NAN,
            Self::Text(t) if t == UNKNOWN => f64::NAN,
            Self::Text(t) => t.trim().parse().unwrap_or(f64::NAN),
        }
    }

    /// Whether the value coerces to NaN.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.as_f64().is_nan()
    }
}

impl From<bool> for FeatureValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<usize> for FeatureValue {
    fn from(n: usize) -> Self {
        Self::Int(i64::try_from(n).unwrap_or(i64::MAX))
    }
}

impl From<i64> for FeatureValue {
    fn from(n: i64) -> Self {
        Self::Int(n)
    }
}

impl From<f64> for FeatureValue {
    fn from(r: f64) -> Self {
        Self::Real(r)
    }
}

impl From<Option<f64>> for FeatureValue {
    fn from(r: Option<f64>) -> Self {
        r.map_or(Self::Missing, Self::Real)
    }
}

/// Delimited-text rendering: `True`/`False`, plain numbers, empty for missing.
impl fmt::Display for FeatureValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(true) => f.write_str("True"),
            Self::Bool(false) => f.write_str("False"),
            Self::Int(i) => write!(f, "{i}"),
            Self::Real(r) if r.is_finite() => write!(f, "{r}"),
            Self::Real(_) | Self::Missing => Ok(()),
            Self::Text(t) => f.write_str(t),
        }
    }
}

impl Serialize for FeatureValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::Int(i) => serializer.serialize_i64(*i),
            Self::Real(r) if r.is_finite() => serializer.serialize_f64(*r),
            Self::Real(_) | Self::Missing => serializer.serialize_none(),
            Self::Text(t) => serializer.serialize_str(t),
        }
    }
}

/// Fixed-schema feature record of one document.
///
/// Built by [`crate::extract_with_options`]. Use [`FeatureRecord::entries`]
/// for the ordered key/value view.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRecord {
    /// Key set this record exposes.
    pub schema: SchemaVariant,
    /// Source URL, if supplied.
    pub url: Option<String>,
    /// Dataset label, if supplied.
    pub label: Option<String>,
    pub binary: BinaryFeatures,
    pub quantitative: QuantitativeFeatures,
    pub heuristic: HeuristicFeatures,
    /// `None` when no source URL was supplied.
    pub url_structure: Option<UrlFeatures>,
}

impl FeatureRecord {
    /// Ordered key/value pairs for this record's schema variant.
    #[must_use]
    pub fn entries(&self) -> Vec<(&'static str, FeatureValue)> {
        let mut entries = Vec::with_capacity(self.schema.key_count());
        if self.schema == SchemaVariant::UrlContent {
            entries.push(("url", FeatureValue::text(self.url.as_deref())));
            entries.push(("type", FeatureValue::text(self.label.as_deref())));
        }
        entries.extend(self.feature_entries());
        entries
    }

    /// Value of one key, if the schema has it.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<FeatureValue> {
        self.entries()
            .into_iter()
            .find_map(|(k, v)| (k == key).then_some(v))
    }

    /// Numeric vector in prediction-schema order, whatever this record's variant.
    #[must_use]
    pub fn prediction_vector(&self) -> Vec<f64> {
        self.feature_entries()
            .iter()
            .map(|(_, value)| value.as_f64())
            .collect()
    }

    /// Feature keys whose values coerce to NaN.
    #[must_use]
    pub fn missing_features(&self) -> Vec<&'static str> {
        self.feature_entries()
            .into_iter()
            .filter_map(|(key, value)| value.is_missing().then_some(key))
            .collect()
    }

    /// Check that the emitted keys match the schema exactly.
    pub fn verify_schema(&self) -> Result<()> {
        let expected = self.schema.keys();
        let entries = self.entries();
        if entries.len() != expected.len() {
            return Err(Error::SchemaViolation(format!(
                "expected {} keys, record has {}",
                expected.len(),
                entries.len()
            )));
        }
        for (pos, ((key, _), want)) in entries.iter().zip(&expected).enumerate() {
            if key != want {
                return Err(Error::SchemaViolation(format!(
                    "key {pos} is `{key}`, expected `{want}`"
                )));
            }
        }
        Ok(())
    }

    fn feature_entries(&self) -> Vec<(&'static str, FeatureValue)> {
        let b = &self.binary;
        let q = &self.quantitative;
        let h = &self.heuristic;
        let u = self.url_structure.as_ref();

        vec![
            ("has_title", b.has_title.into()),
            ("has_meta_description", b.has_meta_description.into()),
            ("has_form", b.has_form.into()),
            ("has_input", b.has_input.into()),
            ("has_button", b.has_button.into()),
            ("has_img", b.has_img.into()),
            ("has_submit_button", b.has_submit_button.into()),
            ("has_link", b.has_link.into()),
            ("has_password_input", b.has_password_input.into()),
            ("has_email_input", b.has_email_input.into()),
            ("has_hidden_element", b.has_hidden_element.into()),
            ("has_audio", b.has_audio.into()),
            ("has_video", b.has_video.into()),
            ("has_js_redirect", b.has_js_redirect.into()),
            ("has_meta_refresh_redirect", b.has_meta_refresh_redirect.into()),
            ("has_onclick_event", b.has_onclick_event.into()),
            ("has_document_url_change", b.has_document_url_change.into()),
            ("has_inline_js", b.has_inline_js.into()),
            ("has_external_link_new_tab", b.has_external_link_new_tab.into()),
            ("has_cors", b.has_cors.into()),
            ("has_js_obfuscation", b.has_js_obfuscation.into()),
            ("has_login_form", b.has_login_form.into()),
            ("has_https", b.has_https.into()),
            ("has_iframe", b.has_iframe.into()),
            ("has_phishing_words", b.has_phishing_words.into()),
            ("has_keywords", b.has_keywords.into()),
            ("has_external_links", b.has_external_links.into()),
            ("has_popular_script_libraries", b.has_popular_script_libraries.into()),
            ("num_input_tags", q.num_input_tags.into()),
            ("num_button_tags", q.num_button_tags.into()),
            ("num_img_tags", q.num_img_tags.into()),
            ("num_option_tags", q.num_option_tags.into()),
            ("num_list_tags", q.num_list_tags.into()),
            ("num_th_tags", q.num_th_tags.into()),
            ("num_tr_tags", q.num_tr_tags.into()),
            ("num_href_attributes", q.num_href_attributes.into()),
            ("num_paragraph_tags", q.num_paragraph_tags.into()),
            ("num_script_tags", q.num_script_tags.into()),
            ("num_links", q.num_links.into()),
            ("num_images", q.num_images.into()),
            ("num_scripts", q.num_scripts.into()),
            ("num_styles", q.num_styles.into()),
            ("num_forms", q.num_forms.into()),
            ("num_external_domains", q.num_external_domains.into()),
            ("num_external_resources", q.num_external_resources.into()),
            ("num_external_forms", q.num_external_forms.into()),
            ("num_external_links", q.num_external_links.into()),
            ("num_external_images", q.num_external_images.into()),
            ("avg_word_length", h.avg_word_length.into()),
            ("avg_link_text_length", h.avg_link_text_length.into()),
            ("content_length", h.content_length.into()),
            ("url_length", h.url_length.into()),
            // Declared but never computed; always missing.
            ("has_ip_in_url", FeatureValue::Missing),
            ("uses_url_shortener", FeatureValue::Missing),
            ("uses_https", FeatureValue::Missing),
            ("has_login_forms", h.has_login_forms.into()),
            ("percentage_external_resources", h.percentage_external_resources.into()),
            ("percentage_external_forms", h.percentage_external_forms.into()),
            ("percentage_external_links", h.percentage_external_links.into()),
            ("percentage_js_content", h.percentage_js_content.into()),
            ("has_non_standard_protocols", h.has_non_standard_protocols.into()),
            ("has_multiple_domain_redirects", h.has_multiple_domain_redirects.into()),
            ("domain_name_similarity", h.domain_name_similarity.into()),
            ("num_subdomains", u.map_or(FeatureValue::Missing, |u| u.num_subdomains.into())),
            ("num_special_chars", u.map_or(FeatureValue::Missing, |u| u.num_special_chars.into())),
        ]
    }
}

/// Serializes as a map in schema order.
impl Serialize for FeatureRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let entries = self.entries();
        let mut map = serializer.serialize_map(Some(entries.len()))?;
        for (key, value) in &entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}
