// ABOUTME: Order-preserving record deduplication keyed by normalized title or canonical URL.
// ABOUTME: O(n) with a seen-key set; first occurrence always wins.

use std::collections::HashSet;

use crate::record::SpecialIssueRecord;

/// Which field identifies a duplicate record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupeKey {
    /// Lower-cased, whitespace-collapsed title. The default.
    Title,
    /// Canonical URL, for layouts where link text is unreliable.
    Url,
}

/// Collapse repeated records, preserving first-seen order.
pub fn dedupe(records: Vec<SpecialIssueRecord>, key: DedupeKey) -> Vec<SpecialIssueRecord> {
    let mut seen = HashSet::new();
    records
        .into_iter()
        .filter(|record| {
            let k = match key {
                DedupeKey::Title => normalize_title(&record.title),
                DedupeKey::Url => record.url.trim().to_string(),
            };
            seen.insert(k)
        })
        .collect()
}

fn normalize_title(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn record(title: &str, url: &str) -> SpecialIssueRecord {
        SpecialIssueRecord::fallback(title, url)
    }

    #[test]
    fn title_key_collapses_case_and_whitespace() {
        let records = vec![
            record("Climate Risk", "https://example.com/a"),
            record("climate risk ", "https://example.com/b"),
        ];
        let unique = dedupe(records, DedupeKey::Title);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].title, "Climate Risk");
        assert_eq!(unique[0].url, "https://example.com/a");
    }

    #[test]
    fn url_key_keeps_distinct_urls_with_same_title() {
        let records = vec![
            record("Read more", "https://example.com/a"),
            record("Read more", "https://example.com/b"),
            record("Read more", "https://example.com/a"),
        ];
        let unique = dedupe(records, DedupeKey::Url);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].url, "https://example.com/a");
        assert_eq!(unique[1].url, "https://example.com/b");
    }

    #[test]
    fn empty_input_is_fine() {
        assert!(dedupe(Vec::new(), DedupeKey::Title).is_empty());
    }
}
