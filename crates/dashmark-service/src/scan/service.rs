//! Scan service: the query interface over the tree walker.

use std::sync::Arc;

use tracing::{error, info};

use dashmark_core::config::scan::ScanConfig;
use dashmark_core::error::AppError;
use dashmark_core::result::AppResult;
use dashmark_core::traits::TreeStore;
use dashmark_entity::scan::{QueryMode, ResultEntry, ScanRequest, ScanResponse};
use dashmark_store::BookmarkStore;

use super::path::PathResolver;
use super::walker::{TreeWalker, WalkReport};

/// Answers scan queries against a bookmark store.
///
/// Every query re-reads the tree; nothing is cached between calls.
#[derive(Clone)]
pub struct ScanService {
    /// Bookmark store.
    store: Arc<dyn BookmarkStore>,
    /// Tree walker.
    walker: TreeWalker,
}

impl ScanService {
    /// Creates a new scan service.
    pub fn new(store: Arc<dyn BookmarkStore>, config: ScanConfig) -> Self {
        let resolver = PathResolver::new(Arc::clone(&store));
        Self {
            store,
            walker: TreeWalker::new(resolver, config),
        }
    }

    /// Runs one scan in the given mode.
    ///
    /// Only a failure to read the tree fails the query; per-node lookup
    /// failures end up in [`WalkReport::skipped`].
    pub async fn query(&self, mode: QueryMode) -> AppResult<WalkReport> {
        let forest = self.store.get_tree().await.map_err(|e| {
            error!(store = self.store.name(), error = %e, "Failed to read bookmark tree");
            AppError::with_source(
                e.kind,
                format!("Failed to read bookmark tree: {}", e.message),
                e,
            )
        })?;

        let report = self.walker.walk(&forest, mode).await;

        info!(
            store = self.store.name(),
            mode = %mode,
            results = report.entries.len(),
            skipped = report.skipped.len(),
            "Scan complete"
        );

        Ok(report)
    }

    /// Every bookmark whose URL is shared with another bookmark.
    pub async fn find_duplicates(&self) -> AppResult<Vec<ResultEntry>> {
        Ok(self.query(QueryMode::Duplicates).await?.entries)
    }

    /// Every folder with a known, empty children sequence.
    pub async fn find_empty_folders(&self) -> AppResult<Vec<ResultEntry>> {
        Ok(self.query(QueryMode::EmptyFolders).await?.entries)
    }

    /// Every bookmark.
    pub async fn list_bookmarks(&self) -> AppResult<Vec<ResultEntry>> {
        Ok(self.query(QueryMode::AllBookmarks).await?.entries)
    }

    /// Answers a request envelope; failures become `{ error }` responses.
    pub async fn handle(&self, request: ScanRequest) -> ScanResponse {
        match self.query(request.mode).await {
            Ok(report) => ScanResponse::Results {
                results: report.entries,
            },
            Err(e) => ScanResponse::error(e.message),
        }
    }
}
