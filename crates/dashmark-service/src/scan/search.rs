//! Search filtering and counters over scan results.

use std::collections::HashSet;

use serde::Serialize;

use dashmark_entity::scan::ResultEntry;

/// Keep the entries whose title, URL, or folder path contains `term`,
/// ignoring case. A blank term keeps everything.
pub fn filter_entries(entries: &[ResultEntry], term: &str) -> Vec<ResultEntry> {
    let needle = term.trim().to_lowercase();
    if needle.is_empty() {
        return entries.to_vec();
    }

    entries
        .iter()
        .filter(|entry| {
            entry.title.to_lowercase().contains(&needle)
                || entry.url.to_lowercase().contains(&needle)
                || entry.folder_path.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}

/// Headline counters for a result list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct ScanSummary {
    /// Number of entries.
    pub total_urls: usize,
    /// Number of distinct URLs among the entries.
    pub distinct_urls: usize,
}

impl ScanSummary {
    /// Count entries and distinct URLs.
    pub fn from_entries(entries: &[ResultEntry]) -> Self {
        let distinct: HashSet<&str> = entries.iter().map(|e| e.url.as_str()).collect();
        Self {
            total_urls: entries.len(),
            distinct_urls: distinct.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dashmark_core::types::BookmarkId;

    fn entry(id: &str, title: &str, url: &str, folder_path: &str) -> ResultEntry {
        ResultEntry {
            id: BookmarkId::from(id),
            title: title.to_string(),
            url: url.to_string(),
            folder_path: folder_path.to_string(),
        }
    }

    #[test]
    fn test_filter_matches_any_field_case_insensitively() {
        let entries = vec![
            entry("1", "Rust Book", "https://doc.rust-lang.org/book", "Dev"),
            entry("2", "News", "https://lwn.net", "Reading -> Linux"),
            entry("3", "Weather", "https://weather.test", "Home"),
        ];

        let ids = |v: Vec<ResultEntry>| v.into_iter().map(|e| e.id.into_string()).collect::<Vec<_>>();
        assert_eq!(ids(filter_entries(&entries, "RUST")), vec!["1"]);
        assert_eq!(ids(filter_entries(&entries, "lwn.net")), vec!["2"]);
        assert_eq!(ids(filter_entries(&entries, "linux")), vec!["2"]);
        assert_eq!(filter_entries(&entries, "  ").len(), 3);
        assert!(filter_entries(&entries, "nothing").is_empty());
    }

    #[test]
    fn test_summary_counts_distinct_urls() {
        let entries = vec![
            entry("1", "a", "https://a.test", ""),
            entry("2", "a again", "https://a.test", "X"),
            entry("3", "b", "https://b.test", ""),
            entry("4", "b again", "https://b.test", "Y"),
        ];
        let summary = ScanSummary::from_entries(&entries);
        assert_eq!(summary.total_urls, 4);
        assert_eq!(summary.distinct_urls, 2);
    }
}
