//! Heuristic Feature Set
//!
//! Ratios, averages and composite signals built on the raw markup, the parsed
//! tree and the external references. Each heuristic resolves its own empty
//! case: ratios over an empty denominator are `0`, and domain-name similarity
//! is missing when there is nothing to compare.

use std::collections::BTreeSet;

use url::Url;

use crate::dom::{self, AttrFilter, HtmlDocument};
use crate::features::external::{self, ExternalReferences, PageOrigin};
use crate::patterns::{NON_STANDARD_PROTOCOLS, REFRESH_URL_KEY, SCRIPT_REDIRECT, WORD_TOKEN};
use crate::url_utils::{absolute_host, strip_www};

/// Derived signals of one document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HeuristicFeatures {
    /// Mean length of `[A-Za-z0-9_]+` tokens in the raw markup.
    pub avg_word_length: f64,
    /// Mean text length of `<a>` elements.
    pub avg_link_text_length: f64,
    /// Character length of the raw markup.
    pub content_length: usize,
    /// Character length of the re-serialized tree.
    ///
    /// A structural size proxy, not the length of the page URL.
    pub url_length: usize,
    /// Same as the binary `has_password_input`.
    pub has_login_forms: bool,
    pub percentage_external_resources: f64,
    pub percentage_external_forms: f64,
    pub percentage_external_links: f64,
    pub percentage_js_content: f64,
    pub has_non_standard_protocols: bool,
    pub has_multiple_domain_redirects: bool,
    /// Position-aligned match percentage between the page host and the host
    /// claimed in `<meta name="author">`.
    pub domain_name_similarity: Option<f64>,
}

/// Inputs shared with the other feature sets.
pub struct HeuristicContext<'a> {
    pub html: &'a str,
    pub refs: &'a ExternalReferences,
    pub page_url: Option<&'a Url>,
    pub has_password_input: bool,
}

/// Compute the heuristic feature set.
#[must_use]
pub fn extract(doc: &HtmlDocument, ctx: &HeuristicContext) -> HeuristicFeatures {
    let forms_with_action = doc.find_all_where("form", &[AttrFilter::Present("action")]).len();
    let anchors_with_href = doc.find_all_where("a", &[AttrFilter::Present("href")]).len();

    HeuristicFeatures {
        avg_word_length: avg_word_length(ctx.html),
        avg_link_text_length: avg_link_text_length(doc),
        content_length: ctx.html.chars().count(),
        url_length: doc.serialized().chars().count(),
        has_login_forms: ctx.has_password_input,
        percentage_external_resources: percentage(
            ctx.refs.resources.len(),
            external::count_resources(doc),
        ),
        percentage_external_forms: percentage(ctx.refs.forms.len(), forms_with_action),
        percentage_external_links: percentage(ctx.refs.links.len(), anchors_with_href),
        percentage_js_content: percentage_js_content(doc),
        has_non_standard_protocols: has_non_standard_protocols(doc),
        has_multiple_domain_redirects: has_multiple_domain_redirects(doc, ctx.page_url),
        domain_name_similarity: domain_name_similarity(doc, ctx.page_url),
    }
}

/// `100 * part / whole`, or `0` when `whole` is zero.
#[must_use]
pub fn percentage(part: usize, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    part as f64 / whole as f64 * 100.0
}

fn mean(total: usize, n: usize) -> f64 {
    if n == 0 {
        0.0
    } else {
        total as f64 / n as f64
    }
}

/// Mean token length over the raw markup, tags and attributes included.
#[must_use]
pub fn avg_word_length(html: &str) -> f64 {
    let (total, n) = WORD_TOKEN
        .find_iter(html)
        .fold((0, 0), |(total, n), m| (total + m.len(), n + 1));
    mean(total, n)
}

fn avg_link_text_length(doc: &HtmlDocument) -> f64 {
    let links = doc.find_all("a");
    let total: usize = links
        .iter()
        .map(|a| dom::text_content(&a).chars().count())
        .sum();
    mean(total, links.length())
}

/// Share of serialized `<script>` markup in the serialized markup of all
/// elements, with nested elements counted once per ancestor.
fn percentage_js_content(doc: &HtmlDocument) -> f64 {
    fn serialized_len(sel: &dom::Selection) -> usize {
        dom::outer_html(sel).chars().count()
    }

    let total: usize = doc.elements().iter().map(|el| serialized_len(&el)).sum();
    let js: usize = doc.find_all("script").iter().map(|el| serialized_len(&el)).sum();

    percentage(js, total)
}

fn has_non_standard_protocols(doc: &HtmlDocument) -> bool {
    doc.has_attribute_predicate(|_, value| {
        let value = value.trim_start();
        NON_STANDARD_PROTOCOLS.iter().any(|proto| {
            value
                .get(..proto.len())
                .is_some_and(|prefix| prefix.eq_ignore_ascii_case(proto))
        })
    })
}

/// Target of a `<meta http-equiv="refresh">` `content` value (`"0;url=..."`).
#[must_use]
pub fn refresh_target(content: &str) -> Option<&str> {
    let key = REFRESH_URL_KEY.find(content)?;
    let target = content[key.end()..]
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .trim_matches(|c| c == '"' || c == '\'')
        .trim();
    (!target.is_empty()).then_some(target)
}

/// Redirect targets declared by the document, in document order.
fn redirect_targets(doc: &HtmlDocument) -> Vec<String> {
    let mut targets = Vec::new();

    for el in doc.find_all_tags(&["meta", "script"]).iter() {
        if dom::tag_name(&el).as_deref() == Some("meta") {
            if AttrFilter::EqualsIgnoreCase("http-equiv", "refresh").matches(&el) {
                let content = dom::attribute(&el, "content").unwrap_or_default();
                if let Some(target) = refresh_target(&content) {
                    targets.push(target.to_string());
                }
            }
            continue;
        }

        let text = dom::text_content(&el);
        for caps in SCRIPT_REDIRECT.captures_iter(&text) {
            if let Some(m) = caps.get(1).or_else(|| caps.get(2)) {
                targets.push(m.as_str().to_string());
            }
        }
    }

    targets
}

/// Follow refresh/script redirects from the page URL, each target resolved
/// against the previous hop. True when the chain, page included, spans more
/// than one host.
fn has_multiple_domain_redirects(doc: &HtmlDocument, page_url: Option<&Url>) -> bool {
    let targets = redirect_targets(doc);
    if targets.is_empty() {
        return false;
    }

    let mut hosts = BTreeSet::new();
    let mut current = page_url.cloned();
    if let Some(host) = current.as_ref().and_then(Url::host_str) {
        hosts.insert(host.to_string());
    }

    for target in &targets {
        let resolved = match &current {
            Some(base) => base.join(target),
            None => Url::parse(target),
        };
        let Ok(resolved) = resolved else {
            continue;
        };
        if let Some(host) = resolved.host_str().filter(|h| !h.is_empty()) {
            hosts.insert(host.to_string());
        }
        current = Some(resolved);
    }

    hosts.len() > 1
}

/// Crude similarity baseline between the page host and the author-claimed
/// host: the percentage of aligned character positions that agree, after
/// stripping a leading `www.`. Not an edit distance.
fn domain_name_similarity(doc: &HtmlDocument, page_url: Option<&Url>) -> Option<f64> {
    let original = strip_www(page_url?.host_str()?);
    if original.is_empty() {
        return None;
    }

    let author = doc.find("meta", &[AttrFilter::Equals("name", "author")])?;
    let content = dom::attribute(&author, "content").unwrap_or_default();
    let claimed_host = absolute_host(&content, page_url.map(Url::scheme)).unwrap_or_default();
    let claimed = strip_www(&claimed_host);

    let matches = original
        .chars()
        .zip(claimed.chars())
        .filter(|(a, b)| a == b)
        .count();
    Some(percentage(matches, original.chars().count()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::url_utils::parse_page_url;

    fn heuristics(html: &str, page: Option<&str>) -> HeuristicFeatures {
        let doc = match HtmlDocument::parse(html) {
            Ok(doc) => doc,
            Err(err) => panic!("parse failed: {err}"),
        };
        let url = page.and_then(parse_page_url);
        let refs = external::analyze(&doc, &PageOrigin::new(url.as_ref()));
        extract(
            &doc,
            &HeuristicContext {
                html,
                refs: &refs,
                page_url: url.as_ref(),
                has_password_input: false,
            },
        )
    }

    #[test]
    fn percentage_handles_zero_denominator() {
        assert_eq!(percentage(0, 0), 0.0);
        assert_eq!(percentage(1, 4), 25.0);
        assert_eq!(percentage(3, 3), 100.0);
    }

    #[test]
    fn avg_word_length_over_tokens() {
        assert_eq!(avg_word_length(""), 0.0);
        assert_eq!(avg_word_length("!!! ..."), 0.0);
        // "ab", "abcd" -> 3.0
        assert_eq!(avg_word_length("ab, abcd."), 3.0);
    }

    #[test]
    fn avg_link_text_length_over_all_anchors() {
        let h = heuristics(r#"<a href="/a">abcd</a><a>ab</a>"#, None);
        assert_eq!(h.avg_link_text_length, 3.0);
        assert_eq!(heuristics("<p>none</p>", None).avg_link_text_length, 0.0);
    }

    #[test]
    fn content_length_counts_characters() {
        assert_eq!(heuristics("", None).content_length, 0);
        assert_eq!(heuristics("<p>é</p>", None).content_length, 8);
    }

    #[test]
    fn external_percentages() {
        let h = heuristics(
            r#"<a href="https://evil.example/x">1</a><a href="/local">2</a><a>3</a>
               <form action="https://evil.example/c"></form><form action="/s"></form><form></form>
               <img src="https://img.example/a.png"><img src="b.png"><script src="c.js"></script>
               <link rel="stylesheet" href="https://good.example/s.css">"#,
            Some("https://good.example/"),
        );
        assert_eq!(h.percentage_external_links, 50.0);
        assert_eq!(h.percentage_external_forms, 50.0);
        assert_eq!(h.percentage_external_resources, 25.0);
    }

    #[test]
    fn js_content_ratio() {
        assert_eq!(heuristics("<p>no scripts</p>", None).percentage_js_content, 0.0);
        let h = heuristics("<script>var a = 1;</script><p>x</p>", None);
        assert!(h.percentage_js_content > 0.0 && h.percentage_js_content < 100.0);
    }

    #[test]
    fn non_standard_protocols_in_any_attribute() {
        assert!(heuristics(r#"<a href="ftp://files.example/">f</a>"#, None).has_non_standard_protocols);
        assert!(heuristics(r#"<img data-src=" TELNET:host">"#, None).has_non_standard_protocols);
        assert!(!heuristics(r#"<a href="https://x.example/ftp:">f</a>"#, None).has_non_standard_protocols);
    }

    #[test]
    fn refresh_target_parsing() {
        assert_eq!(refresh_target("0;url=https://other.example/"), Some("https://other.example/"));
        assert_eq!(refresh_target("5; URL='/next'; junk"), Some("/next"));
        assert_eq!(refresh_target("0; url = https://other.example/"), Some("https://other.example/"));
        assert_eq!(refresh_target("0;URL =/x"), Some("/x"));
        assert_eq!(refresh_target("30"), None);
        assert_eq!(refresh_target("0;url="), None);
    }

    #[test]
    fn meta_refresh_to_other_domain() {
        let h = heuristics(
            r#"<meta http-equiv="refresh" content="0;url=https://other.example/">"#,
            Some("https://good.example/"),
        );
        assert!(h.has_multiple_domain_redirects);
    }

    #[test]
    fn same_domain_redirect_is_single_domain() {
        let h = heuristics(
            r#"<meta http-equiv="refresh" content="0;url=/welcome">"#,
            Some("https://good.example/"),
        );
        assert!(!h.has_multiple_domain_redirects);
    }

    #[test]
    fn script_redirect_chain() {
        let h = heuristics(
            r#"<script>window.location.href = "https://hop.example/";</script>"#,
            Some("https://good.example/"),
        );
        assert!(h.has_multiple_domain_redirects);
    }

    #[test]
    fn no_redirect_is_false() {
        assert!(!heuristics("<p>static</p>", Some("https://good.example/")).has_multiple_domain_redirects);
    }

    #[test]
    fn domain_similarity_requires_author_and_url() {
        let html = r#"<head><meta name="author" content="https://www.goad.example/"></head>"#;
        assert_eq!(heuristics(html, None).domain_name_similarity, None);
        assert_eq!(heuristics("<p>x</p>", Some("https://good.example/")).domain_name_similarity, None);

        // "good.example" vs "goad.example": 11 of 12 positions agree
        let similarity = heuristics(html, Some("https://www.good.example/")).domain_name_similarity;
        assert_eq!(similarity, Some(11.0 / 12.0 * 100.0));
    }

    #[test]
    fn domain_similarity_of_plain_author_name_is_zero() {
        let html = r#"<meta name="author" content="Jane Doe">"#;
        assert_eq!(
            heuristics(html, Some("https://good.example/")).domain_name_similarity,
            Some(0.0)
        );
    }
}
