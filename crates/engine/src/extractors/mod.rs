// ABOUTME: Extraction layer: field heuristics, section state machine, listing discovery,
// ABOUTME: per-journal variants and the router that selects between them.

pub mod fields;
pub mod listing;
pub mod router;
pub mod sections;
pub mod variants;

pub use listing::{listing_links, IssueLink};
pub use router::{select_parser, ParserKind};
pub use variants::{extract_fields, IssueFields};
