//! DOM Operations Adapter
//!
//! Wraps a `dom_query` document behind the small set of queries the feature
//! extractors need: find-all-by-tag, find-by-tag-and-attribute, attribute
//! predicate search and text content. Parsing is html5ever-based and always
//! yields a best-effort tree for malformed markup.

// Re-export core types for external use
pub use dom_query::{Document, Selection};

pub use tendril::StrTendril;

use crate::error::{Error, Result};

/// Number of leading bytes inspected when deciding whether input is markup.
const BINARY_SNIFF_LEN: usize = 1024;

/// Attribute constraint applied by [`HtmlDocument::find`] and
/// [`HtmlDocument::find_all_where`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttrFilter<'a> {
    /// Attribute is present, any value.
    Present(&'a str),
    /// Attribute value equals the given string exactly.
    Equals(&'a str, &'a str),
    /// Attribute value equals the given string, ASCII case-insensitively.
    EqualsIgnoreCase(&'a str, &'a str),
    /// Attribute value contains the given substring.
    Contains(&'a str, &'a str),
    /// Attribute value is a whitespace-separated list containing the word
    /// (ASCII case-insensitive), as `rel` and `class` are.
    HasWord(&'a str, &'a str),
}

impl AttrFilter<'_> {
    /// Check the filter against one element.
    #[must_use]
    pub fn matches(&self, sel: &Selection) -> bool {
        match *self {
            Self::Present(name) => sel.has_attr(name),
            Self::Equals(name, expected) => sel.attr(name).is_some_and(|v| &*v == expected),
            Self::EqualsIgnoreCase(name, expected) => sel
                .attr(name)
                .is_some_and(|v| v.trim().eq_ignore_ascii_case(expected)),
            Self::Contains(name, needle) => sel.attr(name).is_some_and(|v| v.contains(needle)),
            Self::HasWord(name, word) => sel.attr(name).is_some_and(|v| {
                v.split_ascii_whitespace()
                    .any(|token| token.eq_ignore_ascii_case(word))
            }),
        }
    }
}

/// An immutable parsed HTML page.
///
/// Owned by a single extraction call. Not `Send`: batch extraction parses
/// one document per worker instead of sharing trees.
pub struct HtmlDocument {
    doc: Document,
}

impl HtmlDocument {
    /// Parse raw HTML into a traversable tree.
    ///
    /// Empty input is valid and yields a tree with no content elements.
    /// Input carrying NUL bytes near its start is treated as a binary
    /// stream and rejected.
    pub fn parse(html: &str) -> Result<Self> {
        let head = &html.as_bytes()[..html.len().min(BINARY_SNIFF_LEN)];
        if let Some(pos) = head.iter().position(|&b| b == 0) {
            return Err(Error::ParseError(format!(
                "input looks like binary data (NUL byte at offset {pos})"
            )));
        }

        Ok(Self {
            doc: Document::from(html),
        })
    }

    /// All elements with the given tag name, in document order.
    #[inline]
    #[must_use]
    pub fn find_all(&self, tag: &str) -> Selection<'_> {
        self.doc.select(tag)
    }

    /// All elements matching any of the given tag names, in document order.
    #[must_use]
    pub fn find_all_tags(&self, tags: &[&str]) -> Selection<'_> {
        self.doc.select(&tags.join(", "))
    }

    /// All elements with the tag name that satisfy every filter.
    #[must_use]
    pub fn find_all_where(&self, tag: &str, filters: &[AttrFilter]) -> Vec<Selection<'_>> {
        self.find_all(tag)
            .iter()
            .filter(|el| filters.iter().all(|f| f.matches(el)))
            .collect()
    }

    /// First element with the tag name that satisfies every filter.
    #[must_use]
    pub fn find(&self, tag: &str, filters: &[AttrFilter]) -> Option<Selection<'_>> {
        self.find_all(tag)
            .iter()
            .find(|el| filters.iter().all(|f| f.matches(el)))
    }

    /// Whether any element carries an attribute for which `predicate(name, value)` holds.
    ///
    /// Attribute names are lowercase as produced by the HTML tokenizer.
    pub fn has_attribute_predicate<F>(&self, predicate: F) -> bool
    where
        F: Fn(&str, &str) -> bool,
    {
        self.doc.select("*").nodes().iter().any(|node| {
            node.attrs()
                .iter()
                .any(|attr| predicate(&*attr.name.local, &*attr.value))
        })
    }

    /// Every element of the document, in document order.
    #[inline]
    #[must_use]
    pub fn elements(&self) -> Selection<'_> {
        self.doc.select("*")
    }

    /// Text content of the whole document, script and style text included.
    #[inline]
    #[must_use]
    pub fn text(&self) -> StrTendril {
        self.doc.select("html").text()
    }

    /// Serialized markup of the parsed tree.
    #[inline]
    #[must_use]
    pub fn serialized(&self) -> StrTendril {
        self.doc.html()
    }
}

// === Node Operations ===

/// Get any attribute value
#[inline]
#[must_use]
pub fn attribute(sel: &Selection, name: &str) -> Option<String> {
    sel.attr(name).map(|s| s.to_string())
}

/// Get all text content of node and descendants
#[inline]
#[must_use]
pub fn text_content(sel: &Selection) -> StrTendril {
    sel.text()
}

/// Get outer HTML content
#[inline]
#[must_use]
pub fn outer_html(sel: &Selection) -> StrTendril {
    sel.html()
}

/// Get tag name (lowercase)
#[must_use]
pub fn tag_name(sel: &Selection) -> Option<String> {
    sel.nodes()
        .first()
        .and_then(dom_query::NodeRef::node_name)
        .map(|t| t.to_string())
}
