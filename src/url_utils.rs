//! URL Utility Functions
//!
//! Host resolution for reference attributes, source URL parsing and the
//! scheme normalisation applied to dataset URL lists.

use url::Url;

/// Scheme assumed for protocol-relative references when the page's is unknown.
const DEFAULT_SCHEME: &str = "https";

/// Parse the source URL of a document.
///
/// # Returns
/// * `Some(Url)` if the string is an absolute URL with a non-empty host
#[must_use]
pub fn parse_page_url(url_str: &str) -> Option<Url> {
    let url = Url::parse(url_str.trim()).ok()?;
    match url.host_str() {
        Some(host) if !host.is_empty() => Some(url),
        _ => None,
    }
}

/// Resolve the network host an attribute value points at.
///
/// Only absolute references carry a host: relative paths, fragments and
/// host-less schemes such as `javascript:` or `mailto:` yield `None`, as do
/// values that do not parse as URLs at all. Protocol-relative values
/// (`//cdn.example/x.js`) take `scheme`, or `https` when none is given.
///
/// # Examples
/// ```
/// use phish_features::url_utils::absolute_host;
///
/// assert_eq!(absolute_host("https://Evil.Example/x", None), Some("evil.example".to_string()));
/// assert_eq!(absolute_host("//cdn.example/a.js", None), Some("cdn.example".to_string()));
/// assert_eq!(absolute_host("/login.php", None), None);
/// assert_eq!(absolute_host("mailto:a@b.example", None), None);
/// ```
#[must_use]
pub fn absolute_host(value: &str, scheme: Option<&str>) -> Option<String> {
    let value = value.trim();

    if value.is_empty() {
        return None;
    }

    let parsed = if value.starts_with("//") {
        Url::parse(&format!("{}:{value}", scheme.unwrap_or(DEFAULT_SCHEME)))
    } else {
        Url::parse(value)
    };

    parsed
        .ok()
        .and_then(|url| url.host_str().map(str::to_string))
        .filter(|host| !host.is_empty())
}

/// Strip a single leading `www.` label from a host.
#[must_use]
pub fn strip_www(host: &str) -> &str {
    host.strip_prefix("www.").unwrap_or(host)
}

/// Prefix `https://` to URLs that carry no `http://`/`https://` scheme.
///
/// URL lists in training data are often bare hostnames.
#[must_use]
pub fn ensure_scheme(url_str: &str) -> String {
    let url_str = url_str.trim();
    if url_str.starts_with("http://") || url_str.starts_with("https://") {
        url_str.to_string()
    } else {
        format!("https://{url_str}")
    }
}
