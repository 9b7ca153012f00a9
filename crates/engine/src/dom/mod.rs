// ABOUTME: DOM utilities for HTML document traversal and normalization.
// ABOUTME: Hosts the document cleaner and text-flattening helpers shared by all extractors.

//! DOM utilities.
//!
//! This module provides the document cleaner that normalizes heterogeneous
//! journal markup down to a small attribute-free tag set, plus helpers for
//! flattening element text the way every field extractor consumes it.

pub mod clean;

use scraper::ElementRef;

/// Flatten an element's text content: descendant text joined with spaces,
/// runs of whitespace collapsed, trimmed.
pub fn flatten_text(el: &ElementRef) -> String {
    let text = el.text().collect::<Vec<_>>().join(" ");
    normalize_whitespace(&text)
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use scraper::{Html, Selector};

    #[test]
    fn flatten_text_joins_and_collapses() {
        let doc = Html::parse_fragment("<p>Guest\n  editors:   <strong>Jane</strong> Doe</p>");
        let sel = Selector::parse("p").unwrap();
        let el = doc.select(&sel).next().unwrap();
        assert_eq!(flatten_text(&el), "Guest editors: Jane Doe");
    }

    #[test]
    fn normalize_whitespace_empty() {
        assert_eq!(normalize_whitespace("   \n\t "), "");
    }
}
