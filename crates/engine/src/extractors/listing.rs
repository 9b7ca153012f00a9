// ABOUTME: Landing-page link discovery: special-issue anchors resolved against the page base URL.
// ABOUTME: Keeps absolute http(s) links with non-empty titles; dedupes by resolved URL.

//! Listing extraction.
//!
//! A journal landing page links its open calls with anchors whose href
//! contains the `/special-issue/` path segment. Relative hrefs are resolved
//! against the landing URL; anything that does not resolve to http(s) is
//! dropped rather than reported.

use std::collections::HashSet;

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use tracing::debug;
use url::Url;

use crate::dom::flatten_text;

static ISSUE_LINK_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse(r#"a[href*="/special-issue/"]"#).unwrap());

/// One discovered call-for-papers link on a landing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueLink {
    pub title: String,
    pub url: String,
}

/// Collect special-issue links from a landing page, in document order,
/// deduplicated by resolved URL.
pub fn listing_links(doc: &Html, base: &Url) -> Vec<IssueLink> {
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for anchor in doc.select(&ISSUE_LINK_SEL) {
        let Some(href) = anchor.value().attr("href") else {
            continue;
        };
        let Ok(resolved) = base.join(href) else {
            debug!(href, "unresolvable special-issue href skipped");
            continue;
        };
        if !matches!(resolved.scheme(), "http" | "https") {
            continue;
        }

        let title = flatten_text(&anchor);
        if title.is_empty() {
            continue;
        }

        let url = resolved.to_string();
        if seen.insert(url.clone()) {
            links.push(IssueLink { title, url });
        }
    }

    links
}
