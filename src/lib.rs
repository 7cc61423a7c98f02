//! # phish-features
//!
//! HTML feature extraction for content-based phishing classifiers.
//!
//! Turns a raw HTML document and its source URL into a fixed-schema record of
//! presence flags, element counts, external-reference statistics and derived
//! heuristics. The key set and order of a record never depend on the page, so
//! records can be fed to a classifier positionally or written as dataset rows.
//!
//! ## Quick Start
//!
//! ```rust
//! use phish_features::{extract, FeatureValue};
//!
//! let html = r#"<html><head><title>T</title></head>
//! <body><a href="https://evil.example/x">l</a></body></html>"#;
//!
//! let record = extract(html, "https://good.example/")?;
//! assert_eq!(record.get("has_title"), Some(FeatureValue::Bool(true)));
//! assert_eq!(record.get("percentage_external_links"), Some(FeatureValue::Real(100.0)));
//! # Ok::<(), phish_features::Error>(())
//! ```
//!
//! ## Feature Families
//!
//! - **Binary**: presence of titles, forms, password inputs, redirects, phishing vocabulary
//! - **Quantitative**: tag counts and external resource/form/link/image counts
//! - **Heuristic**: external-reference percentages, JS share, redirect chains, domain similarity
//! - **URL structure**: subdomain and special-character counts, scheme
//!
//! ## Schemas
//!
//! [`SchemaVariant::Prediction`] holds the feature keys only.
//! [`SchemaVariant::UrlContent`] prefixes `url` and `type` for dataset rows.

mod error;
mod extract;
mod options;
mod patterns;
mod record;

/// DOM adapter over `dom_query`.
pub mod dom;

/// Feature families (binary, quantitative, external references, heuristic, URL).
pub mod features;

/// URL utilities for host resolution and normalization.
pub mod url_utils;

/// Character encoding detection and transcoding.
pub mod encoding;

/// Dataset building: saved-page and HTTP sources, CSV sink, classifier seam, batch extraction.
pub mod dataset;

// Public API - re-exports
pub use error::{Error, Result};
pub use options::Options;
pub use record::{FeatureRecord, FeatureValue, SchemaVariant, FEATURE_KEYS, PROVENANCE_KEYS};

/// Extracts a prediction-schema record from an HTML document.
///
/// # Arguments
///
/// * `html` - The HTML document as a string slice
/// * `url` - The URL the document was fetched from
///
/// # Example
///
/// ```rust
/// use phish_features::{extract, FEATURE_KEYS};
///
/// let record = extract("", "https://good.example/")?;
/// assert_eq!(record.prediction_vector().len(), FEATURE_KEYS.len());
/// # Ok::<(), phish_features::Error>(())
/// ```
pub fn extract(html: &str, url: &str) -> Result<FeatureRecord> {
    extract_with_options(html, &Options::for_prediction(url))
}

/// Extracts a feature record with custom options.
///
/// Returns `Err(Error::ParseError)` only when the input is not markup at all;
/// malformed HTML is parsed best-effort.
///
/// # Example
///
/// ```rust
/// use phish_features::{extract_with_options, Options, SchemaVariant};
///
/// let options = Options::for_dataset("https://good.example/", "legitimate");
/// let record = extract_with_options("<form action=login.php></form>", &options)?;
/// assert_eq!(record.schema, SchemaVariant::UrlContent);
/// assert!(record.binary.has_login_form);
/// # Ok::<(), phish_features::Error>(())
/// ```
pub fn extract_with_options(html: &str, options: &Options) -> Result<FeatureRecord> {
    extract::extract_features(html, options)
}

/// Extracts a feature record from HTML bytes with automatic encoding detection.
///
/// The charset is taken from a byte-order mark, `<meta charset>` or a
/// `Content-Type` meta declaration, defaulting to UTF-8. Invalid sequences
/// are replaced with U+FFFD rather than causing errors.
///
/// # Example
///
/// ```rust
/// use phish_features::{extract_bytes, Options};
///
/// let html = b"<html><head><meta charset=\"ISO-8859-1\"></head><body>Caf\xE9</body></html>";
/// let record = extract_bytes(html, &Options::default())?;
/// assert_eq!(record.quantitative.num_links, 0);
/// # Ok::<(), phish_features::Error>(())
/// ```
pub fn extract_bytes(html: &[u8], options: &Options) -> Result<FeatureRecord> {
    let html_str = encoding::decode_html(html);
    extract_with_options(&html_str, options)
}
