//! Quantitative Feature Set
//!
//! Tag and attribute counts. Zero is a valid count, never an error.

use crate::dom::{AttrFilter, HtmlDocument};
use crate::features::external::ExternalReferences;

/// Element counts of one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuantitativeFeatures {
    pub num_input_tags: usize,
    pub num_button_tags: usize,
    pub num_img_tags: usize,
    pub num_option_tags: usize,
    /// `<ul>` and `<ol>` combined.
    pub num_list_tags: usize,
    pub num_th_tags: usize,
    pub num_tr_tags: usize,
    /// Anchors carrying an `href`.
    pub num_href_attributes: usize,
    pub num_paragraph_tags: usize,
    pub num_script_tags: usize,
    pub num_links: usize,
    pub num_images: usize,
    pub num_scripts: usize,
    /// `<link rel="stylesheet">` elements.
    pub num_styles: usize,
    pub num_forms: usize,
    pub num_external_domains: usize,
    pub num_external_resources: usize,
    pub num_external_forms: usize,
    pub num_external_links: usize,
    pub num_external_images: usize,
}

/// Compute the quantitative feature set.
#[must_use]
pub fn extract(doc: &HtmlDocument, refs: &ExternalReferences) -> QuantitativeFeatures {
    let count = |tag: &str| doc.find_all(tag).length();

    let num_img_tags = count("img");
    let num_script_tags = count("script");

    QuantitativeFeatures {
        num_input_tags: count("input"),
        num_button_tags: count("button"),
        num_img_tags,
        num_option_tags: count("option"),
        num_list_tags: doc.find_all_tags(&["ul", "ol"]).length(),
        num_th_tags: count("th"),
        num_tr_tags: count("tr"),
        num_href_attributes: doc.find_all_where("a", &[AttrFilter::Present("href")]).len(),
        num_paragraph_tags: count("p"),
        num_script_tags,
        num_links: count("a"),
        num_images: num_img_tags,
        num_scripts: num_script_tags,
        num_styles: doc
            .find_all_where("link", &[AttrFilter::HasWord("rel", "stylesheet")])
            .len(),
        num_forms: count("form"),
        num_external_domains: refs.domains.len(),
        num_external_resources: refs.resources.len(),
        num_external_forms: refs.forms.len(),
        num_external_links: refs.links.len(),
        num_external_images: refs.images.len(),
    }
}
