// ABOUTME: Data model for scraped call-for-papers listings.
// ABOUTME: SpecialIssueRecord, JournalResult and ScrapeRun mirror the persisted JSON artifact.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Sentinel deadline for pages where no date token could be found.
pub const DEADLINE_SENTINEL: &str = "Check Link";

/// Sentinel guest-editor value for pages where no names survived filtering.
pub const EDITORS_SENTINEL: &str = "See website";

/// Sentinel description fragment for pages with no usable description blocks.
pub const DESCRIPTION_SENTINEL: &str = "<p>See the call for papers page for details.</p>";

/// One special issue (call for papers) extracted from a detail page.
///
/// Immutable once built. `title` is always non-empty and `url` is always a
/// syntactically absolute URL; unextractable fields carry sentinels instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecialIssueRecord {
    pub title: String,
    pub url: String,
    pub deadline: String,
    pub guest_editors: String,
    pub description: String,
    pub last_updated: String,
}

impl SpecialIssueRecord {
    /// Build a record carrying only sentinels, for detail pages whose markup
    /// did not match the selected parser or could not be fetched.
    pub fn fallback(title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            deadline: DEADLINE_SENTINEL.to_string(),
            guest_editors: EDITORS_SENTINEL.to_string(),
            description: DESCRIPTION_SENTINEL.to_string(),
            last_updated: date_stamp(),
        }
    }

    /// Returns true if every extractable field is a sentinel.
    pub fn is_all_sentinel(&self) -> bool {
        self.deadline == DEADLINE_SENTINEL
            && self.guest_editors == EDITORS_SENTINEL
            && self.description == DESCRIPTION_SENTINEL
    }
}

/// All special issues collected for one configured journal.
///
/// Present in the run output even when `special_issues` is empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JournalResult {
    pub name: String,
    pub url: String,
    pub special_issues: Vec<SpecialIssueRecord>,
}

impl JournalResult {
    /// Build an empty result for a journal whose landing page was unavailable.
    pub fn empty(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            special_issues: Vec::new(),
        }
    }
}

/// Root artifact of a scrape run, replaced wholesale on each run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScrapeRun {
    pub last_updated: String,
    pub journals: Vec<JournalResult>,
}

impl ScrapeRun {
    /// Create a run stamped with the current time, with no journals yet.
    pub fn new() -> Self {
        Self {
            last_updated: Utc::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            journals: Vec::new(),
        }
    }
}

impl Default for ScrapeRun {
    fn default() -> Self {
        Self::new()
    }
}

/// Date stamp used for per-record `last_updated`.
pub fn date_stamp() -> String {
    Utc::now().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn fallback_record_is_all_sentinel() {
        let rec = SpecialIssueRecord::fallback("T", "https://example.com/x");
        assert!(rec.is_all_sentinel());
        assert_eq!(rec.title, "T");
        assert_eq!(rec.url, "https://example.com/x");
    }

    #[test]
    fn artifact_uses_expected_key_names() {
        let run = ScrapeRun {
            last_updated: "2026-01-01 00:00:00".to_string(),
            journals: vec![JournalResult {
                name: "Cities".to_string(),
                url: "https://example.com/cfp".to_string(),
                special_issues: vec![SpecialIssueRecord {
                    title: "Urban Heat".to_string(),
                    url: "https://example.com/si/1".to_string(),
                    deadline: "14 March 2026".to_string(),
                    guest_editors: "Jane Doe".to_string(),
                    description: "<p>Scope.</p>".to_string(),
                    last_updated: "2026-01-01".to_string(),
                }],
            }],
        };

        let json = serde_json::to_value(&run).expect("serialize");
        assert!(json.get("last_updated").is_some());
        let journal = &json["journals"][0];
        assert!(journal.get("special_issues").is_some());
        let issue = &journal["special_issues"][0];
        for key in [
            "title",
            "url",
            "deadline",
            "guest_editors",
            "description",
            "last_updated",
        ] {
            assert!(issue.get(key).is_some(), "missing key {}", key);
        }
    }

    #[test]
    fn artifact_roundtrips() {
        let run = ScrapeRun {
            last_updated: "2026-01-01 00:00:00".to_string(),
            journals: vec![JournalResult::empty("J", "https://example.com")],
        };
        let json = serde_json::to_string(&run).expect("serialize");
        let parsed: ScrapeRun = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(parsed, run);
    }

    #[test]
    fn sentinels_are_distinguishable_from_content() {
        // A real deadline always contains a 4-digit year; a real editor list
        // never matches the sentinel phrasing.
        assert!(!DEADLINE_SENTINEL.chars().any(|c| c.is_ascii_digit()));
        assert!(DESCRIPTION_SENTINEL.starts_with("<p>"));
    }
}
