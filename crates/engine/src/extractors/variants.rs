// ABOUTME: The per-journal extraction variants: standard state-machine walk and outline anchor walk.
// ABOUTME: Both return an IssueFields triple and degrade to sentinels instead of failing.

//! Extraction variants.
//!
//! Both variants share the deadline lookup and the final assembly (clean +
//! sanitize description, join editors, substitute sentinels). They differ in
//! how blocks are discovered: the standard variant walks a content container
//! through the section state machine; the outline variant starts at a
//! "call for papers" heading and reads editors out of OutlineElement divs.
//!
//! These are best-effort heuristics tuned to known layouts. A page whose
//! structure matches nothing here yields the all-sentinel triple, never an
//! error.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::dom::clean::{clean, is_chrome_element};
use crate::dom::flatten_text;
use crate::extractors::fields::{extract_deadline, extract_pure_name, is_metadata_line};
use crate::extractors::router::ParserKind;
use crate::extractors::sections::{has_nested_block, render_block, SectionAccumulator, MAX_BLOCKS};
use crate::record::{DEADLINE_SENTINEL, DESCRIPTION_SENTINEL, EDITORS_SENTINEL};

/// The `{deadline, editors, description}` triple produced by one detail-page
/// extraction. Fields carry sentinels when unextractable.
#[derive(Debug, Clone, PartialEq)]
pub struct IssueFields {
    pub deadline: String,
    pub guest_editors: String,
    pub description: String,
}

impl IssueFields {
    /// All-sentinel fallback for structurally unrecognized documents.
    pub fn fallback() -> Self {
        Self {
            deadline: DEADLINE_SENTINEL.to_string(),
            guest_editors: EDITORS_SENTINEL.to_string(),
            description: DESCRIPTION_SENTINEL.to_string(),
        }
    }
}

static STRONG_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("strong, b").unwrap());
static HEADING_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("h2, h3").unwrap());
static BLOCK_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("p, div, ul, ol, h3").unwrap());
static CONTAINER_SELS: Lazy<Vec<Selector>> = Lazy::new(|| {
    ["div.inner", "main", "body"]
        .iter()
        .map(|s| Selector::parse(s).unwrap())
        .collect()
});
static OUTLINE_EDITOR_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.OutlineElement").unwrap());

/// Run the variant selected for a journal against one detail-page document.
pub fn extract_fields(doc: &Html, kind: ParserKind) -> IssueFields {
    match kind {
        ParserKind::Standard => standard(doc),
        ParserKind::Outline => outline(doc),
    }
}

/// Deadline lookup, done once per document before any sibling walk.
/// Emphasized date tokens win over the flattened document text.
fn find_deadline(doc: &Html) -> Option<String> {
    for el in doc.select(&STRONG_SEL) {
        if let Some(deadline) = extract_deadline(&flatten_text(&el)) {
            return Some(deadline);
        }
    }
    let text = doc
        .root_element()
        .text()
        .collect::<Vec<_>>()
        .join(" ");
    extract_deadline(&text)
}

/// True if the element or any ancestor is page chrome.
fn under_chrome(el: &ElementRef) -> bool {
    if is_chrome_element(el) {
        return true;
    }
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|ancestor| is_chrome_element(&ancestor))
}

/// Standard variant: deadline from the whole document, then a state-machine
/// walk over the first recognized content container.
fn standard(doc: &Html) -> IssueFields {
    let deadline = find_deadline(doc);

    let container = CONTAINER_SELS
        .iter()
        .find_map(|sel| doc.select(sel).next());
    let Some(container) = container else {
        return IssueFields::fallback();
    };

    let mut acc = SectionAccumulator::new();
    for el in container
        .select(&BLOCK_SEL)
        .filter(|el| !under_chrome(el))
        .take(MAX_BLOCKS)
    {
        if !acc.visit(&el) {
            break;
        }
    }

    let (editors, parts) = acc.finish();
    assemble(deadline, editors, parts)
}

/// Outline variant: anchor on a "call for papers" heading, collect following
/// leaf blocks as description, read editors from OutlineElement divs.
fn outline(doc: &Html) -> IssueFields {
    let deadline = find_deadline(doc);

    let anchor = doc
        .select(&HEADING_SEL)
        .find(|el| flatten_text(el).to_lowercase().contains("call for papers"));

    let mut parts = Vec::new();
    if let Some(anchor) = anchor {
        let mut after = false;
        let mut visited = 0usize;
        for node in doc.tree.root().descendants() {
            if node.id() == anchor.id() {
                after = true;
                continue;
            }
            if !after {
                continue;
            }
            let Some(el) = ElementRef::wrap(node) else {
                continue;
            };
            if !matches!(
                el.value().name().to_lowercase().as_str(),
                "p" | "ul" | "div"
            ) {
                continue;
            }
            if has_nested_block(&el) || under_chrome(&el) {
                continue;
            }
            visited += 1;
            if visited > MAX_BLOCKS {
                break;
            }

            let text = flatten_text(&el);
            let lower = text.to_lowercase();
            if lower.contains("manuscript submission") {
                break;
            }
            if lower.contains("guest editors") || lower.contains("university") {
                continue;
            }
            if is_metadata_line(&text) || text.len() < 10 {
                continue;
            }
            parts.push(render_block(&el));
        }
    }

    let mut editors = Vec::new();
    for el in doc.select(&OUTLINE_EDITOR_SEL) {
        let text = flatten_text(&el);
        let lower = text.to_lowercase();
        if lower.contains("submit") || lower.contains("guide") {
            continue;
        }
        if text.len() > 2 && !lower.contains("guest editors") {
            let name = extract_pure_name(&text);
            if name.len() > 2 && name.len() < 40 {
                editors.push(name);
            }
        }
    }

    assemble(deadline, editors, parts)
}

/// Substitute sentinels and run the cleaner plus the sanitize pass over the
/// aggregated description markup.
fn assemble(deadline: Option<String>, editors: Vec<String>, parts: Vec<String>) -> IssueFields {
    let description = if parts.is_empty() {
        DESCRIPTION_SENTINEL.to_string()
    } else {
        let cleaned = sanitize_description(&clean(&parts.concat()));
        if cleaned.trim().is_empty() {
            DESCRIPTION_SENTINEL.to_string()
        } else {
            cleaned
        }
    };

    IssueFields {
        deadline: deadline.unwrap_or_else(|| DEADLINE_SENTINEL.to_string()),
        guest_editors: if editors.is_empty() {
            EDITORS_SENTINEL.to_string()
        } else {
            editors.join("<br>")
        },
        description,
    }
}

/// Final sanitize pass over the cleaned description fragment. The cleaner
/// already restricts the tag set; ammonia enforces it on the way out.
fn sanitize_description(html: &str) -> String {
    ammonia::Builder::new()
        .tags(["p", "ul", "ol", "li", "br"].iter().copied().collect())
        .clean(html)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const STANDARD_PAGE: &str = r#"<!DOCTYPE html>
<html>
<head><title>Remote Sensing of Environment | Call for papers</title></head>
<body>
<header><nav><a href="/">Journals</a></nav></header>
<div class="inner">
    <p><strong>Submission deadline: 14 March 2026</strong></p>
    <h3>Special issue information</h3>
    <p>This issue focuses on thermal imaging of cities at night.</p>
    <h3>Guest editors</h3>
    <p>Dr. Jane Doe, University of X</p>
    <p>Prof. John Smith, Institute of Y</p>
    <h3>Manuscript submission information</h3>
    <p>Submit via the editorial system before the deadline.</p>
</div>
<footer>Cookie notice</footer>
</body>
</html>"#;

    #[test]
    fn standard_extracts_all_four_fields() {
        let doc = Html::parse_document(STANDARD_PAGE);
        let fields = extract_fields(&doc, ParserKind::Standard);

        assert_eq!(fields.deadline, "14 March 2026");
        assert_eq!(fields.guest_editors, "Jane Doe<br>John Smith");
        assert!(fields
            .description
            .contains("thermal imaging of cities at night"));
        // Nothing after the stop trigger is consumed.
        assert!(!fields.description.contains("editorial system"));
    }

    #[test]
    fn standard_description_is_schema_restricted() {
        let doc = Html::parse_document(STANDARD_PAGE);
        let fields = extract_fields(&doc, ParserKind::Standard);
        assert!(fields.description.starts_with("<p>"));
        assert!(!fields.description.contains("class="));
        assert!(!fields.description.contains("<strong>"));
    }

    #[test]
    fn standard_ignores_chrome_content() {
        let doc = Html::parse_document(STANDARD_PAGE);
        let fields = extract_fields(&doc, ParserKind::Standard);
        assert!(!fields.description.contains("Journals"));
        assert!(!fields.description.contains("Cookie notice"));
    }

    #[test]
    fn standard_empty_document_yields_fallback() {
        let doc = Html::parse_document("<html><body></body></html>");
        let fields = extract_fields(&doc, ParserKind::Standard);
        assert_eq!(fields, IssueFields::fallback());
    }

    #[test]
    fn standard_garbage_document_does_not_panic() {
        let doc = Html::parse_document("<<<>>> not really <html at all");
        let fields = extract_fields(&doc, ParserKind::Standard);
        assert_eq!(fields.deadline, DEADLINE_SENTINEL);
        assert_eq!(fields.guest_editors, EDITORS_SENTINEL);
    }

    const OUTLINE_PAGE: &str = r#"<!DOCTYPE html>
<html>
<body>
<h2>Call for papers</h2>
<p>Cities invites submissions on adaptive reuse of industrial districts.</p>
<p>Guest editors are listed below.</p>
<div class="OutlineElement"><p>Dr. Maria Rossi, Politecnico di Milano</p></div>
<div class="OutlineElement">Submit your paper via the guide for authors</div>
<div class="OutlineElement">Ana Lima</div>
<p>Manuscript submission opens 1 May 2026.</p>
<p>This trailing block is never collected.</p>
</body>
</html>"#;

    #[test]
    fn outline_collects_description_after_anchor() {
        let doc = Html::parse_document(OUTLINE_PAGE);
        let fields = extract_fields(&doc, ParserKind::Outline);

        assert!(fields
            .description
            .contains("adaptive reuse of industrial districts"));
        assert!(!fields.description.contains("Guest editors are listed"));
        assert!(!fields.description.contains("never collected"));
    }

    #[test]
    fn outline_reads_editors_from_outline_divs() {
        let doc = Html::parse_document(OUTLINE_PAGE);
        let fields = extract_fields(&doc, ParserKind::Outline);
        assert_eq!(fields.guest_editors, "Maria Rossi<br>Ana Lima");
    }

    #[test]
    fn outline_without_anchor_yields_description_sentinel() {
        let doc = Html::parse_document(
            "<html><body><p>No call for papers heading anywhere here.</p></body></html>",
        );
        let fields = extract_fields(&doc, ParserKind::Outline);
        assert_eq!(fields.description, DESCRIPTION_SENTINEL);
    }

    #[test]
    fn deadline_prefers_emphasized_token() {
        let html = r#"<html><body><div class="inner">
            <p>Published 1 January 2020 in the archive.</p>
            <p><strong>Deadline: 30 June 2026</strong></p>
        </div></body></html>"#;
        let doc = Html::parse_document(html);
        let fields = extract_fields(&doc, ParserKind::Standard);
        assert_eq!(fields.deadline, "30 June 2026");
    }
}
