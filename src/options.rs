//! Configuration options for feature extraction.
//!
//! The `Options` struct carries the per-document context that the HTML itself
//! does not contain: where it came from and, for training data, its label.

use crate::record::SchemaVariant;

/// Configuration options for feature extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for a URL-less prediction record.
///
/// # Example
///
/// ```rust
/// use phish_features::{Options, SchemaVariant};
///
/// // Prediction input for a known page
/// let options = Options::for_prediction("https://example.com/login");
/// assert_eq!(options.schema, SchemaVariant::Prediction);
///
/// // Labelled training row
/// let options = Options {
///     label: Some("phishing".to_string()),
///     ..Options::for_dataset("https://example.com/", "legitimate")
/// };
/// assert_eq!(options.schema, SchemaVariant::UrlContent);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Options {
    /// Source URL of the document.
    ///
    /// Used to tell same-host references from external ones, as the start of
    /// the redirect chain, for domain-name similarity and for the URL
    /// structure features. When absent, URL-derived features are missing and
    /// every absolute reference counts as external.
    ///
    /// Default: `None`
    pub url: Option<String>,

    /// Dataset label (e.g. `"legitimate"`, `"phishing"`, `"unknown"`).
    ///
    /// Only emitted in the [`SchemaVariant::UrlContent`] schema, as the
    /// `type` column.
    ///
    /// Default: `None`
    pub label: Option<String>,

    /// Which key set the assembled record exposes.
    ///
    /// Default: [`SchemaVariant::Prediction`]
    pub schema: SchemaVariant,
}

impl Options {
    /// Options for a classifier input record of the page at `url`.
    #[must_use]
    pub fn for_prediction(url: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            ..Self::default()
        }
    }

    /// Options for a labelled dataset row of the page at `url`.
    #[must_use]
    pub fn for_dataset(url: &str, label: &str) -> Self {
        Self {
            url: Some(url.to_string()),
            label: Some(label.to_string()),
            schema: SchemaVariant::UrlContent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_prediction_without_url() {
        let options = Options::default();
        assert!(options.url.is_none());
        assert!(options.label.is_none());
        assert_eq!(options.schema, SchemaVariant::Prediction);
    }

    #[test]
    fn dataset_options_carry_label() {
        let options = Options::for_dataset("https://good.example/", "legitimate");
        assert_eq!(options.url.as_deref(), Some("https://good.example/"));
        assert_eq!(options.label.as_deref(), Some("legitimate"));
        assert_eq!(options.schema, SchemaVariant::UrlContent);
    }
}
