// ABOUTME: Parser router mapping journal display names to extraction variants.
// ABOUTME: Ordered case-insensitive substring registry with a guaranteed default.

//! Parser router.
//!
//! Different journal platforms place the call-for-papers anchor in different
//! positions and favor different container tags, so each known journal family
//! is pinned to a variant. Unknown names always resolve to the standard
//! variant; selection never fails.

use tracing::debug;

use crate::dedupe::DedupeKey;

/// The extraction variant to run against a detail page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserKind {
    /// State-machine walk over a cleaned container. The default.
    Standard,
    /// Anchor-heading walk with OutlineElement editor blocks (Cities layout).
    Outline,
}

impl ParserKind {
    /// Dedup key for records produced by this variant. The outline layout's
    /// listing link text is frequently truncated, so it keys on URL.
    pub fn dedupe_key(self) -> DedupeKey {
        match self {
            ParserKind::Standard => DedupeKey::Title,
            ParserKind::Outline => DedupeKey::Url,
        }
    }
}

/// Name-pattern routes, evaluated top to bottom.
const ROUTES: &[(&str, ParserKind)] = &[
    ("cities", ParserKind::Outline),
    ("remote sensing", ParserKind::Standard),
    ("building and environment", ParserKind::Standard),
];

/// Select the parser variant for a journal display name.
pub fn select_parser(journal_name: &str) -> ParserKind {
    let lower = journal_name.to_lowercase();
    for (pattern, kind) in ROUTES {
        if lower.contains(pattern) {
            debug!(journal = journal_name, parser = ?kind, "parser selected");
            return *kind;
        }
    }
    debug!(journal = journal_name, "unrecognized journal, using standard parser");
    ParserKind::Standard
}
