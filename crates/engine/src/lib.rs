// ABOUTME: Main library entry point for the call-for-papers scrape engine.
// ABOUTME: Re-exports the public API: Client, ClientBuilder, records, journals, ScrapeError, ErrorCode.

//! cfp-engine - A scraper for academic journal call-for-papers listings.
//!
//! This crate fetches journal landing pages, discovers open special-issue
//! calls, and extracts a `{title, url, deadline, guest_editors, description}`
//! record from each detail page. Extraction degrades to sentinel values
//! instead of failing, so a run always produces a complete artifact.
//!
//! # Example
//!
//! ```no_run
//! use cfp_engine::{Client, ScrapeError};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), ScrapeError> {
//!     let client = Client::builder().build();
//!     let run = client.scrape_all().await?;
//!     println!("{}", serde_json::to_string_pretty(&run).unwrap());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod dedupe;
pub mod dom;
pub mod error;
pub mod extractors;
pub mod journals;
pub mod options;
pub mod record;
pub mod resource;

pub use crate::client::Client;
pub use crate::dedupe::DedupeKey;
pub use crate::error::{ErrorCode, ScrapeError};
pub use crate::extractors::{extract_fields, listing_links, select_parser, IssueFields, IssueLink, ParserKind};
pub use crate::journals::{load_builtin_journals, parse_journals, Journal};
pub use crate::options::{ClientBuilder, Options};
pub use crate::record::{JournalResult, ScrapeRun, SpecialIssueRecord};
