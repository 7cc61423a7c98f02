//! Dataset building and the collaborator seams around extraction.
//!
//! Extraction itself is a pure function of one document. This module wires it
//! to the outside: an [`HtmlSource`] provides markup per URL, a
//! [`DatasetSink`] persists labelled records, and a [`Classifier`] consumes
//! prediction vectors.
//!
//! # Module Structure
//!
//! - `source`: URL list reading and the on-disk HTML source
//! - `http`: live HTML source
//! - `sink`: delimited-text dataset sink with append semantics

pub mod http;
pub mod sink;
pub mod source;

pub use http::HttpHtmlSource;
pub use sink::CsvDatasetSink;
pub use source::{read_url_list, DirectoryHtmlSource, UrlEntry};

use rayon::prelude::*;
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::record::FeatureRecord;
use crate::url_utils::ensure_scheme;
use crate::{extract_with_options, Options};

/// Provides raw HTML for a URL.
///
/// Failures are reported as [`Error::Fetch`] and never replaced by empty
/// content: a page that could not be fetched has no features.
pub trait HtmlSource {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Persists labelled feature records.
pub trait DatasetSink {
    /// Append records, returning how many rows were written.
    fn append(&self, records: &[FeatureRecord]) -> Result<usize>;
}

/// Binary classification outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prediction {
    Legitimate,
    Phishing,
}

/// Consumes prediction-schema vectors.
///
/// Rejecting vectors with missing (NaN) entries is up to the implementation.
pub trait Classifier {
    fn predict(&self, features: &[f64]) -> Result<Prediction>;
}

/// Classify one record through its prediction-schema vector.
pub fn classify<C: Classifier + ?Sized>(record: &FeatureRecord, classifier: &C) -> Result<Prediction> {
    classifier.predict(&record.prediction_vector())
}

/// Result of a batch extraction.
#[derive(Debug, Default)]
pub struct BatchOutcome {
    /// Records of the pages that were fetched and parsed, in input order.
    pub records: Vec<FeatureRecord>,
    /// URLs that produced no record, with the reason.
    pub failed: Vec<(String, Error)>,
}

/// Fetch and extract every entry in parallel.
///
/// Entries are independent; each worker parses its own document. URLs
/// without a scheme get `https://`. Failed entries are logged and skipped.
pub fn build_dataset<S>(source: &S, entries: &[UrlEntry]) -> BatchOutcome
where
    S: HtmlSource + Sync + ?Sized,
{
    let results: Vec<(String, Result<FeatureRecord>)> = entries
        .par_iter()
        .map(|entry| {
            let url = ensure_scheme(&entry.url);
            let options = Options::for_dataset(&url, &entry.label);
            let result = source
                .fetch(&url)
                .and_then(|html| extract_with_options(&html, &options));
            (url, result)
        })
        .collect();

    let mut outcome = BatchOutcome::default();
    for (url, result) in results {
        match result {
            Ok(record) => outcome.records.push(record),
            Err(err) => {
                warn!(url = %url, error = %err, "skipping page");
                outcome.failed.push((url, err));
            }
        }
    }

    info!(
        extracted = outcome.records.len(),
        failed = outcome.failed.len(),
        "batch extraction finished"
    );
    outcome
}
