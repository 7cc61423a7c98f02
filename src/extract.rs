//! Feature Vector Assembler.
//!
//! Parses the document, runs the external-reference analysis once, feeds it
//! to the binary, quantitative and heuristic sets, adds the URL structure
//! features and assembles the fixed-schema record. Assembly itself never
//! fails on missing data; only a document that cannot be parsed at all
//! aborts the record.

use tracing::debug;

use crate::dom::HtmlDocument;
use crate::error::Result;
use crate::features::heuristic::HeuristicContext;
use crate::features::{binary, external, heuristic, quantitative, url_structure, PageOrigin};
use crate::options::Options;
use crate::record::FeatureRecord;
use crate::url_utils;

/// Main entry point for feature extraction.
pub(crate) fn extract_features(html: &str, options: &Options) -> Result<FeatureRecord> {
    let span = tracing::debug_span!(
        "extract",
        html_len = html.len(),
        url = options.url.as_deref().unwrap_or_default()
    );
    let _guard = span.enter();

    let document = HtmlDocument::parse(html)?;

    let page_url = options.url.as_deref().and_then(url_utils::parse_page_url);
    let origin = PageOrigin::new(page_url.as_ref());
    let refs = external::analyze(&document, &origin);

    let url_features = options.url.as_deref().map(url_structure::analyze);
    let has_https = url_features.is_some_and(|u| u.has_https);

    let binary = binary::extract(&document, html, &refs, has_https);
    let quantitative = quantitative::extract(&document, &refs);
    let heuristic = heuristic::extract(
        &document,
        &HeuristicContext {
            html,
            refs: &refs,
            page_url: page_url.as_ref(),
            has_password_input: binary.has_password_input,
        },
    );

    debug!(
        external_domains = refs.domains.len(),
        external_links = refs.links.len(),
        links = quantitative.num_links,
        "features extracted"
    );

    Ok(FeatureRecord {
        schema: options.schema,
        url: options.url.clone(),
        label: options.label.clone(),
        binary,
        quantitative,
        heuristic,
        url_structure: url_features,
    })
}
