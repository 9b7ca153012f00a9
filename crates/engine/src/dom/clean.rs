// ABOUTME: Document cleaner producing attribute-free markup restricted to p/ul/ol/li/br.
// ABOUTME: Pure transform over a parsed fragment; removal cascades before unwrapping; idempotent.

//! Document cleaner.
//!
//! `clean` reduces an arbitrary HTML fragment to the retained schema:
//! paragraphs, lists, list items and line breaks, all attribute-free.
//!
//! The pipeline order matters: denylisted noise elements are removed wholesale
//! (descendants included) before anything is unwrapped, so noise content never
//! survives as bare text. Tags outside the retained schema are unwrapped
//! (content kept), retained tags are emitted without attributes, and any
//! retained element whose cleaned text is empty is dropped. Cleaning already
//! clean output is a no-op.

use ego_tree::NodeRef;
use scraper::{Html, Node};

/// Tags removed wholesale together with their content.
const REMOVE_TAGS: &[&str] = &["script", "style", "noscript", "nav", "header", "footer"];

/// Tags kept in the output schema (attribute-free).
const RETAIN_TAGS: &[&str] = &["p", "ul", "ol", "li", "br"];

/// Class/id markers that flag an element as page chrome rather than content.
const NOISE_MARKERS: &[&str] = &["banner", "cookie"];

/// Clean an HTML fragment down to the retained schema.
///
/// Never fails: malformed input parses to a best-effort tree and cleans to a
/// possibly empty string.
pub fn clean(html: &str) -> String {
    let fragment = Html::parse_fragment(html);
    let mut out = String::new();
    for child in fragment.root_element().children() {
        serialize_clean(child, &mut out);
    }
    out.trim().to_string()
}

fn serialize_clean(node: NodeRef<Node>, out: &mut String) {
    match node.value() {
        Node::Text(t) => out.push_str(&escape_text(t)),
        Node::Element(el) => {
            let name = el.name().to_lowercase();

            if REMOVE_TAGS.contains(&name.as_str()) || is_noise_element(node) {
                return;
            }

            if name == "br" {
                out.push_str("<br />");
                return;
            }

            if RETAIN_TAGS.contains(&name.as_str()) {
                if cleaned_text(node).trim().is_empty() {
                    return;
                }
                out.push('<');
                out.push_str(&name);
                out.push('>');
                for child in node.children() {
                    serialize_clean(child, out);
                }
                out.push_str("</");
                out.push_str(&name);
                out.push('>');
            } else {
                // Outside the schema: keep content, drop the tag.
                for child in node.children() {
                    serialize_clean(child, out);
                }
            }
        }
        // Comments and other node kinds are noise.
        _ => {}
    }
}

/// Text content of a node excluding removed subtrees, so emptiness is judged
/// on what would actually be emitted.
fn cleaned_text(node: NodeRef<Node>) -> String {
    let mut text = String::new();
    collect_cleaned_text(node, &mut text);
    text
}

fn collect_cleaned_text(node: NodeRef<Node>, text: &mut String) {
    match node.value() {
        Node::Text(t) => text.push_str(t),
        Node::Element(el) => {
            let name = el.name().to_lowercase();
            if REMOVE_TAGS.contains(&name.as_str()) || is_noise_element(node) {
                return;
            }
            for child in node.children() {
                collect_cleaned_text(child, text);
            }
        }
        _ => {}
    }
}

/// True if the element is page chrome (denylisted tag or banner/cookie
/// marker). Used by the standard variant to exclude blocks nested under
/// chrome without mutating the tree.
pub fn is_chrome_element(el: &scraper::ElementRef) -> bool {
    let name = el.value().name().to_lowercase();
    REMOVE_TAGS.contains(&name.as_str()) || is_noise_element(**el)
}

fn is_noise_element(node: NodeRef<Node>) -> bool {
    let Node::Element(el) = node.value() else {
        return false;
    };
    for attr in ["class", "id"] {
        if let Some(value) = el.attr(attr) {
            let lower = value.to_lowercase();
            if NOISE_MARKERS.iter().any(|m| lower.contains(m)) {
                return true;
            }
        }
    }
    false
}

/// Escape text content so that serialized output re-parses to the same tree.
fn escape_text(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
