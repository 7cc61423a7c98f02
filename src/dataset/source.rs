//! URL lists and the on-disk HTML source.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::dataset::HtmlSource;
use crate::encoding::decode_html;
use crate::error::{Error, Result};
use crate::url_utils::{ensure_scheme, parse_page_url};

/// One row of a URL list: the page and its label.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UrlEntry {
    pub url: String,
    #[serde(rename = "type")]
    pub label: String,
}

/// Read a URL list with `url` and `type` columns; other columns are ignored.
///
/// `rows` selects data rows `start..=end`, numbered from 1 after the header.
/// A `start` of 0 reads from the first row and takes one extra row, as
/// pandas `skiprows=range(1, start)` windows do.
pub fn read_url_list(path: &Path, rows: Option<(usize, usize)>) -> Result<Vec<UrlEntry>> {
    let mut reader = csv::Reader::from_path(path)?;
    let entries = reader.deserialize::<UrlEntry>();

    match rows {
        Some((start, end)) => entries
            .skip(start.saturating_sub(1))
            .take(end.saturating_add(1).saturating_sub(start))
            .map(|row| row.map_err(Error::from))
            .collect(),
        None => entries.map(|row| row.map_err(Error::from)).collect(),
    }
}

/// Reads pages saved as `<root>/<host>.html`, `<host>:<port>.html` when the
/// URL names a port.
#[derive(Debug, Clone)]
pub struct DirectoryHtmlSource {
    root: PathBuf,
}

impl DirectoryHtmlSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File a page is stored in, or `None` if the URL has no host.
    #[must_use]
    pub fn path_for(&self, url: &str) -> Option<PathBuf> {
        let url = parse_page_url(&ensure_scheme(url))?;
        let host = url.host_str()?;
        let stem = match url.port() {
            Some(port) => format!("{host}:{port}"),
            None => host.to_string(),
        };
        Some(self.root.join(format!("{stem}.html")))
    }
}

impl HtmlSource for DirectoryHtmlSource {
    fn fetch(&self, url: &str) -> Result<String> {
        let fail = |reason: String| Error::Fetch {
            url: url.to_string(),
            reason,
        };

        let path = self
            .path_for(url)
            .ok_or_else(|| fail("URL has no host".to_string()))?;
        let bytes = fs::read(&path).map_err(|e| fail(format!("{}: {e}", path.display())))?;
        Ok(decode_html(&bytes))
    }
}
