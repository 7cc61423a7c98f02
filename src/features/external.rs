//! External-Reference Analyzer
//!
//! Collects the cross-origin resources, forms, links, images and domains a
//! document references. A reference is external when its attribute value is
//! an absolute URL with a non-empty host, and that host differs from the
//! source page's host when the source URL is known.

use std::collections::BTreeSet;

use url::Url;

use crate::dom::{self, AttrFilter, HtmlDocument};
use crate::url_utils::absolute_host;

/// External references of one document.
///
/// Computed fresh per extraction and dropped once the feature sets have
/// consumed it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExternalReferences {
    /// Distinct external hosts from `script[src]`, stylesheet `link[href]`,
    /// `img[src]` and `a[href]`.
    pub domains: BTreeSet<String>,

    /// External `src`/`href` values of `script`, `link` and `img` elements.
    pub resources: Vec<String>,

    /// External `action` values of `form` elements.
    pub forms: Vec<String>,

    /// External `href` values of `a` elements.
    pub links: Vec<String>,

    /// External `src` values of `img` elements.
    pub images: Vec<String>,
}

/// Source page context used to decide what counts as external.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageOrigin<'a> {
    host: Option<&'a str>,
    scheme: Option<&'a str>,
}

impl<'a> PageOrigin<'a> {
    /// Origin of the page at `url`; `None` means every absolute host is external.
    #[must_use]
    pub fn new(url: Option<&'a Url>) -> Self {
        Self {
            host: url.and_then(Url::host_str),
            scheme: url.map(Url::scheme),
        }
    }

    /// The host `value` references, if it is external to this origin.
    #[must_use]
    pub fn external_host(&self, value: &str) -> Option<String> {
        let host = absolute_host(value, self.scheme)?;
        match self.host {
            Some(own) if own.eq_ignore_ascii_case(&host) => None,
            _ => Some(host),
        }
    }
}

/// Attribute each resource tag references.
const RESOURCE_ATTRS: &[(&str, &str)] = &[("script", "src"), ("link", "href"), ("img", "src")];

/// Analyze the document's external references.
#[must_use]
pub fn analyze(doc: &HtmlDocument, origin: &PageOrigin) -> ExternalReferences {
    let mut refs = ExternalReferences::default();

    for &(tag, attr) in RESOURCE_ATTRS {
        for el in doc.find_all(tag).iter() {
            let Some(value) = dom::attribute(&el, attr) else {
                continue;
            };
            let Some(host) = origin.external_host(&value) else {
                continue;
            };

            // Only stylesheets among <link> feed the domain set, so that every
            // domain maps back to a counted link/script/style/image element.
            if tag != "link" || AttrFilter::HasWord("rel", "stylesheet").matches(&el) {
                refs.domains.insert(host);
            }
            if tag == "img" {
                refs.images.push(value.clone());
            }
            refs.resources.push(value);
        }
    }

    for el in doc.find_all("a").iter() {
        let Some(href) = dom::attribute(&el, "href") else {
            continue;
        };
        if let Some(host) = origin.external_host(&href) {
            refs.domains.insert(host);
            refs.links.push(href);
        }
    }

    for el in doc.find_all("form").iter() {
        let Some(action) = dom::attribute(&el, "action") else {
            continue;
        };
        if origin.external_host(&action).is_some() {
            refs.forms.push(action);
        }
    }

    refs
}

/// Number of `script[src]`, `link[href]` and `img[src]` elements.
#[must_use]
pub fn count_resources(doc: &HtmlDocument) -> usize {
    RESOURCE_ATTRS
        .iter()
        .map(|&(tag, attr)| doc.find_all_where(tag, &[AttrFilter::Present(attr)]).len())
        .sum()
}
