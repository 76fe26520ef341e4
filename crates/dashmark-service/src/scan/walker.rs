//! Bookmark tree traversal and classification.
//!
//! A walk runs in two phases. The forest is first visited depth-first,
//! pre-order, with an explicit stack, collecting the nodes the mode cares
//! about. Folder paths for those nodes are then resolved with bounded
//! concurrency; `buffered` keeps results in traversal order, so output
//! order never depends on lookup timing.

use std::collections::HashSet;

use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, warn};

use dashmark_core::config::scan::ScanConfig;
use dashmark_core::result::AppResult;
use dashmark_core::types::BookmarkId;
use dashmark_entity::bookmark::BookmarkNode;
use dashmark_entity::scan::{QueryMode, ResultEntry};

use super::path::PathResolver;

/// A node left out of the result because its folder path could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedNode {
    /// Node id.
    pub id: BookmarkId,
    /// Why the node was skipped.
    pub reason: String,
}

/// Outcome of one walk.
#[derive(Debug, Clone, Default, Serialize)]
pub struct WalkReport {
    /// Ordered result entries.
    pub entries: Vec<ResultEntry>,
    /// Nodes dropped after a failed path lookup, in traversal order.
    pub skipped: Vec<SkippedNode>,
}

#[derive(Debug, Clone, Copy)]
enum Candidate<'a> {
    Bookmark(&'a BookmarkNode),
    EmptyFolder(&'a BookmarkNode),
}

impl<'a> Candidate<'a> {
    fn node(&self) -> &'a BookmarkNode {
        match self {
            Self::Bookmark(node) | Self::EmptyFolder(node) => node,
        }
    }
}

/// Walks a bookmark forest and classifies its nodes.
#[derive(Clone)]
pub struct TreeWalker {
    /// Resolver for folder paths.
    resolver: PathResolver,
    /// Walk settings.
    config: ScanConfig,
}

impl TreeWalker {
    /// Creates a new walker.
    pub fn new(resolver: PathResolver, config: ScanConfig) -> Self {
        Self { resolver, config }
    }

    /// Walk `forest` and produce the entries for `mode`.
    ///
    /// Every call owns its visited set and URL map, so walks may run
    /// concurrently. A failed path lookup drops only that node.
    pub async fn walk(&self, forest: &[BookmarkNode], mode: QueryMode) -> WalkReport {
        let candidates = collect_candidates(forest, mode);
        let total = candidates.len();

        let resolved: Vec<(Candidate<'_>, AppResult<String>)> = stream::iter(candidates)
            .map(|candidate| async move {
                let path = self.folder_path(candidate).await;
                (candidate, path)
            })
            .buffered(self.config.lookup_concurrency.max(1))
            .collect()
            .await;

        let mut by_url: IndexMap<String, Vec<ResultEntry>> = IndexMap::new();
        let mut empty_folders = Vec::new();
        let mut skipped = Vec::new();

        for (candidate, path) in resolved {
            let node = candidate.node();
            let path = match path {
                Ok(path) => path,
                Err(e) => {
                    warn!(node_id = %node.id, error = %e, "Skipping node: folder path lookup failed");
                    skipped.push(SkippedNode {
                        id: node.id.clone(),
                        reason: e.message,
                    });
                    continue;
                }
            };

            match candidate {
                Candidate::Bookmark(node) => {
                    if let Some(entry) = ResultEntry::from_bookmark(node, path) {
                        by_url.entry(entry.url.clone()).or_default().push(entry);
                    }
                }
                Candidate::EmptyFolder(node) => {
                    empty_folders.push(ResultEntry::empty_folder(node, path));
                }
            }
        }

        let entries: Vec<ResultEntry> = match mode {
            QueryMode::Duplicates => by_url
                .into_values()
                .filter(|group| group.len() > 1)
                .flatten()
                .collect(),
            QueryMode::AllBookmarks => by_url.into_values().flatten().collect(),
            QueryMode::EmptyFolders => empty_folders,
        };

        debug!(
            mode = %mode,
            candidates = total,
            results = entries.len(),
            skipped = skipped.len(),
            "Walk complete"
        );

        WalkReport { entries, skipped }
    }

    async fn folder_path(&self, candidate: Candidate<'_>) -> AppResult<String> {
        match candidate {
            Candidate::Bookmark(node) => self.resolver.resolve(node).await,
            Candidate::EmptyFolder(node) if self.config.top_level_fallback => {
                self.resolver.resolve_or_title(node).await
            }
            Candidate::EmptyFolder(node) => self.resolver.resolve(node).await,
        }
    }
}

/// Depth-first, pre-order collection of the nodes relevant to `mode`.
///
/// A folder's children are pushed at most once per id, which guarantees
/// termination on stores where an id reappears among its own descendants.
fn collect_candidates(forest: &[BookmarkNode], mode: QueryMode) -> Vec<Candidate<'_>> {
    let wants_bookmarks = matches!(mode, QueryMode::Duplicates | QueryMode::AllBookmarks);
    let wants_folders = mode == QueryMode::EmptyFolders;

    let mut candidates = Vec::new();
    let mut visited: HashSet<&BookmarkId> = HashSet::new();
    let mut stack: Vec<&BookmarkNode> = forest.iter().rev().collect();

    while let Some(node) = stack.pop() {
        if wants_bookmarks && node.is_bookmark() {
            candidates.push(Candidate::Bookmark(node));
        }

        let Some(children) = &node.children else {
            continue;
        };
        if children.is_empty() {
            if wants_folders {
                candidates.push(Candidate::EmptyFolder(node));
            }
        } else if visited.insert(&node.id) {
            stack.extend(children.iter().rev());
        }
    }

    candidates
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use dashmark_store::MemoryBookmarkStore;

    fn walker_over(forest: &[BookmarkNode], config: ScanConfig) -> TreeWalker {
        let store = Arc::new(MemoryBookmarkStore::new(forest.to_vec()));
        TreeWalker::new(PathResolver::new(store), config)
    }

    /// `[A(u1), X[B(u1), C(u2)], Y[]]` as top-level nodes.
    fn example_forest() -> Vec<BookmarkNode> {
        vec![
            BookmarkNode::bookmark("a", "A", "u1"),
            BookmarkNode::folder(
                "x",
                "X",
                vec![
                    BookmarkNode::bookmark("b", "B", "u1"),
                    BookmarkNode::bookmark("c", "C", "u2"),
                ],
            ),
            BookmarkNode::folder("y", "Y", vec![]),
        ]
    }

    fn ids(report: &WalkReport) -> Vec<&str> {
        report.entries.iter().map(|e| e.id.as_str()).collect()
    }

    #[tokio::test]
    async fn test_duplicates_example() {
        let forest = example_forest();
        let walker = walker_over(&forest, ScanConfig::default());

        let report = walker.walk(&forest, QueryMode::Duplicates).await;
        assert_eq!(ids(&report), vec!["a", "b"]);
        assert_eq!(report.entries[0].folder_path, "");
        assert_eq!(report.entries[1].folder_path, "X");
    }

    #[tokio::test]
    async fn test_all_bookmarks_example() {
        let forest = example_forest();
        let walker = walker_over(&forest, ScanConfig::default());

        let report = walker.walk(&forest, QueryMode::AllBookmarks).await;
        assert_eq!(ids(&report), vec!["a", "b", "c"]);
        let paths: Vec<&str> = report
            .entries
            .iter()
            .map(|e| e.folder_path.as_str())
            .collect();
        assert_eq!(paths, vec!["", "X", "X"]);
    }

    #[tokio::test]
    async fn test_empty_folders_example() {
        let forest = example_forest();

        let with_fallback = walker_over(&forest, ScanConfig::default());
        let report = with_fallback.walk(&forest, QueryMode::EmptyFolders).await;
        assert_eq!(report.entries.len(), 1);
        let entry = &report.entries[0];
        assert_eq!(entry.id.as_str(), "y");
        assert_eq!(entry.title, "Y");
        assert_eq!(entry.url, "");
        assert_eq!(entry.folder_path, "Y");

        let config = ScanConfig {
            top_level_fallback: false,
            ..ScanConfig::default()
        };
        let without_fallback = walker_over(&forest, config);
        let report = without_fallback.walk(&forest, QueryMode::EmptyFolders).await;
        assert_eq!(report.entries[0].folder_path, "");
    }

    #[tokio::test]
    async fn test_groups_follow_first_seen_url_order() {
        let forest = vec![BookmarkNode::folder(
            "root",
            "Root",
            vec![
                BookmarkNode::bookmark("1", "one", "https://b.test"),
                BookmarkNode::bookmark("2", "two", "https://a.test"),
                BookmarkNode::folder(
                    "f",
                    "F",
                    vec![
                        BookmarkNode::bookmark("3", "three", "https://a.test"),
                        BookmarkNode::bookmark("4", "four", "https://b.test"),
                    ],
                ),
                BookmarkNode::bookmark("5", "five", "https://b.test"),
            ],
        )];
        let walker = walker_over(&forest, ScanConfig::default());

        let report = walker.walk(&forest, QueryMode::Duplicates).await;
        assert_eq!(ids(&report), vec!["1", "4", "5", "2", "3"]);
        assert_eq!(report.entries[1].folder_path, "Root -> F");
    }

    #[tokio::test]
    async fn test_unique_urls_yield_no_duplicates() {
        let forest = vec![
            BookmarkNode::bookmark("1", "one", "https://one.test"),
            BookmarkNode::bookmark("2", "two", "https://two.test"),
        ];
        let walker = walker_over(&forest, ScanConfig::default());
        let report = walker.walk(&forest, QueryMode::Duplicates).await;
        assert!(report.entries.is_empty());
    }

    #[tokio::test]
    async fn test_empty_url_is_ignored() {
        let forest = vec![
            BookmarkNode::bookmark("1", "Blank", ""),
            BookmarkNode::bookmark("2", "Blank too", ""),
            BookmarkNode::bookmark("3", "Real", "https://real.test"),
        ];
        let walker = walker_over(&forest, ScanConfig::default());

        let all = walker.walk(&forest, QueryMode::AllBookmarks).await;
        assert_eq!(ids(&all), vec!["3"]);
        let duplicates = walker.walk(&forest, QueryMode::Duplicates).await;
        assert!(duplicates.entries.is_empty());
        let folders = walker.walk(&forest, QueryMode::EmptyFolders).await;
        assert!(folders.entries.is_empty());
    }

    #[tokio::test]
    async fn test_unfetched_children_are_not_empty() {
        let unfetched = BookmarkNode::folder("f", "Lazy", vec![]).shallow();
        let forest = vec![unfetched];
        let walker = walker_over(&forest, ScanConfig::default());
        let report = walker.walk(&forest, QueryMode::EmptyFolders).await;
        assert!(report.entries.is_empty());
    }

    #[tokio::test]
    async fn test_repeated_folder_id_is_descended_once() {
        let copy = BookmarkNode::folder(
            "loop",
            "Loop",
            vec![BookmarkNode::bookmark("inner", "Inner", "https://inner.test")],
        );
        let forest = vec![BookmarkNode::folder(
            "loop",
            "Loop",
            vec![
                BookmarkNode::bookmark("outer", "Outer", "https://outer.test"),
                copy,
            ],
        )];
        let walker = walker_over(&forest, ScanConfig::default());

        let report = walker.walk(&forest, QueryMode::AllBookmarks).await;
        assert_eq!(ids(&report), vec!["outer"]);
    }

    #[tokio::test]
    async fn test_broken_link_skips_only_that_node() {
        let orphan = BookmarkNode::bookmark("o", "Orphan", "https://dup.test").with_parent("gone");
        let forest = vec![
            BookmarkNode::bookmark("1", "one", "https://dup.test"),
            orphan,
            BookmarkNode::bookmark("2", "two", "https://dup.test"),
        ];
        let walker = walker_over(&forest, ScanConfig::default());

        let report = walker.walk(&forest, QueryMode::Duplicates).await;
        assert_eq!(ids(&report), vec!["1", "2"]);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].id.as_str(), "o");
    }

    #[tokio::test]
    async fn test_order_is_independent_of_concurrency() {
        let forest = example_forest();
        let sequential = walker_over(
            &forest,
            ScanConfig {
                lookup_concurrency: 1,
                ..ScanConfig::default()
            },
        );
        let parallel = walker_over(
            &forest,
            ScanConfig {
                lookup_concurrency: 32,
                ..ScanConfig::default()
            },
        );

        for mode in [
            QueryMode::Duplicates,
            QueryMode::AllBookmarks,
            QueryMode::EmptyFolders,
        ] {
            let a = sequential.walk(&forest, mode).await;
            let b = parallel.walk(&forest, mode).await;
            assert_eq!(a.entries, b.entries);
        }
    }

    #[test]
    fn test_deep_forest_does_not_recurse() {
        let mut node = BookmarkNode::bookmark("leaf", "Leaf", "https://deep.test");
        for depth in 0..20_000 {
            node = BookmarkNode::folder(format!("d{depth}"), "d", vec![node]);
        }
        let forest = vec![node];
        let candidates = collect_candidates(&forest, QueryMode::AllBookmarks);
        assert_eq!(candidates.len(), 1);
        // Dropping a chain this deep recurses once per level.
        std::mem::forget(forest);
    }
}
