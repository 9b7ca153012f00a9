// ABOUTME: Section state machine classifying block siblings into description/editors/stop.
// ABOUTME: Pure transition table plus an accumulator that routes block content per state.

//! Section state machine.
//!
//! A detail page is walked as a linear sequence of block elements. Each
//! block's flattened text is run through [`transition`], which either halts
//! the walk, switches the current section (the block itself is a heading and
//! is skipped), or lets the block be consumed by the accumulator for the
//! current section. The machine starts in `Description` because some journals
//! place the abstract before any deadline or editor heading.

use scraper::ElementRef;

use crate::dom::flatten_text;
use crate::extractors::fields::{extract_pure_name, is_metadata_line};

/// Safety bound on the number of blocks visited for one document.
pub const MAX_BLOCKS: usize = 512;

/// Heading length bound for section-switch triggers.
const HEADING_MAX_LEN: usize = 100;

/// Editor lines longer than this are affiliation paragraphs, not names.
const EDITOR_TEXT_MAX_LEN: usize = 300;

/// Minimum text length for a div block to count as description content.
const DIV_MIN_LEN: usize = 30;

/// Current section of the sibling walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Description,
    Editors,
    Stop,
}

/// Outcome of classifying one block's text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Terminal trigger; do not consume this block, end the walk.
    Halt,
    /// Section heading; switch state and skip the block.
    Enter(Section),
    /// Ordinary content; route to the current section's accumulator.
    Consume,
}

/// Classify a block's flattened text. Depends only on the text, so the
/// transition table is testable independently of the walk driver.
pub fn transition(text: &str) -> Step {
    let lower = text.to_lowercase();

    if lower.contains("manuscript submission") || lower.contains("keywords:") {
        return Step::Halt;
    }
    if lower.contains("guest editors") && text.len() < HEADING_MAX_LEN {
        return Step::Enter(Section::Editors);
    }
    if (lower.contains("special issue info") || lower.contains("aims and scope"))
        && text.len() < HEADING_MAX_LEN
    {
        return Step::Enter(Section::Description);
    }
    Step::Consume
}

/// Per-document extraction state: current section plus the accumulated
/// editor names and description fragments.
#[derive(Debug)]
pub struct SectionAccumulator {
    section: Section,
    editors: Vec<String>,
    description_parts: Vec<String>,
}

impl SectionAccumulator {
    pub fn new() -> Self {
        Self {
            section: Section::Description,
            editors: Vec::new(),
            description_parts: Vec::new(),
        }
    }

    pub fn section(&self) -> Section {
        self.section
    }

    /// Visit one block in document order. Returns false once the walk hit a
    /// terminal trigger and must stop.
    pub fn visit(&mut self, el: &ElementRef) -> bool {
        // Only leaf content blocks are collected; a block wrapping further
        // blocks would double-count its children.
        if has_nested_block(el) {
            return true;
        }

        let text = flatten_text(el);
        if text.len() < 3 {
            return true;
        }

        match transition(&text) {
            Step::Halt => {
                self.section = Section::Stop;
                false
            }
            Step::Enter(section) => {
                self.section = section;
                true
            }
            Step::Consume => {
                if text.to_lowercase().contains("science direct") {
                    return true;
                }
                match self.section {
                    Section::Editors => self.consume_editor(&text),
                    Section::Description => self.consume_description(el, &text),
                    Section::Stop => {}
                }
                true
            }
        }
    }

    fn consume_editor(&mut self, text: &str) {
        if text.len() >= EDITOR_TEXT_MAX_LEN {
            return;
        }
        let name = extract_pure_name(text);
        if name.len() > 2 && !name.contains('@') {
            self.editors.push(name);
        }
    }

    fn consume_description(&mut self, el: &ElementRef, text: &str) {
        if is_metadata_line(text) {
            return;
        }
        let tag = el.value().name().to_lowercase();
        if !matches!(tag.as_str(), "p" | "ul" | "ol" | "div") {
            return;
        }
        if tag == "div" && text.len() < DIV_MIN_LEN {
            return;
        }
        self.description_parts.push(render_block(el));
    }

    /// Consume the accumulator: unique editor names (first occurrence wins)
    /// and raw description fragments in document order.
    pub fn finish(self) -> (Vec<String>, Vec<String>) {
        let mut seen = std::collections::HashSet::new();
        let editors = self
            .editors
            .into_iter()
            .filter(|name| seen.insert(name.to_lowercase()))
            .collect();
        (editors, self.description_parts)
    }
}

impl Default for SectionAccumulator {
    fn default() -> Self {
        Self::new()
    }
}

/// True if the element wraps further block-level elements.
pub fn has_nested_block(el: &ElementRef) -> bool {
    el.descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .any(|child| {
            matches!(
                child.value().name().to_lowercase().as_str(),
                "p" | "div" | "ul" | "ol"
            )
        })
}

/// Serialize a consumed block, renaming div to p so the cleaner keeps it.
/// Attribute stripping and inline unwrapping happen in the final clean pass.
pub fn render_block(el: &ElementRef) -> String {
    let name = el.value().name().to_lowercase();
    let tag = if name == "div" { "p" } else { name.as_str() };
    format!("<{}>{}</{}>", tag, el.inner_html(), tag)
}
