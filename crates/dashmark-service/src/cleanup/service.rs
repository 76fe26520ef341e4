//! Cleanup service: turns scan results into removals.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{info, warn};

use dashmark_core::config::scan::ScanConfig;
use dashmark_core::result::AppResult;
use dashmark_core::traits::TreeStore;
use dashmark_core::types::BookmarkId;
use dashmark_entity::scan::ResultEntry;
use dashmark_store::BookmarkStore;

use super::report::{CleanupReport, FailedRemoval};
use crate::scan::ScanService;

/// Removes bookmarks and folders from a store.
#[derive(Clone)]
pub struct CleanupService {
    /// Bookmark store.
    store: Arc<dyn BookmarkStore>,
    /// Scan service used to plan removals.
    scan: ScanService,
}

impl CleanupService {
    /// Creates a new cleanup service.
    pub fn new(store: Arc<dyn BookmarkStore>, config: ScanConfig) -> Self {
        let scan = ScanService::new(Arc::clone(&store), config);
        Self { store, scan }
    }

    /// Remove each id independently.
    ///
    /// Unknown ids count as already gone. A failure is recorded for its id
    /// and the batch carries on. With `recursive`, folders go together with
    /// their contents; otherwise non-empty folders are refused.
    pub async fn delete(&self, ids: &[BookmarkId], recursive: bool) -> CleanupReport {
        let mut report = CleanupReport::default();

        for id in ids {
            let outcome = if recursive {
                self.store.remove_tree(id).await
            } else {
                self.store.remove(id).await
            };

            match outcome {
                Ok(true) => report.removed.push(id.clone()),
                Ok(false) => report.missing.push(id.clone()),
                Err(e) => {
                    warn!(node_id = %id, error = %e, "Failed to remove node");
                    report.failed.push(FailedRemoval {
                        id: id.clone(),
                        error: e.message,
                    });
                }
            }
        }

        info!(
            store = self.store.name(),
            removed = report.removed.len(),
            missing = report.missing.len(),
            failed = report.failed.len(),
            "Removal batch complete"
        );

        report
    }

    /// Duplicate entries that [`dedupe`](Self::dedupe) would remove: every
    /// occurrence of a URL after the first in traversal order.
    pub async fn plan_dedupe(&self) -> AppResult<Vec<ResultEntry>> {
        let duplicates = self.scan.find_duplicates().await?;
        let mut kept: HashSet<String> = HashSet::new();

        Ok(duplicates
            .into_iter()
            .filter(|entry| !kept.insert(entry.url.clone()))
            .collect())
    }

    /// Remove all but the first occurrence of every duplicated URL.
    pub async fn dedupe(&self) -> AppResult<CleanupReport> {
        let plan = self.plan_dedupe().await?;
        let ids: Vec<BookmarkId> = plan.into_iter().map(|e| e.id).collect();
        Ok(self.delete(&ids, false).await)
    }

    /// Empty folders that [`prune_empty_folders`](Self::prune_empty_folders)
    /// would remove. Top-level roots, meaning nodes without a parent or whose
    /// parent has none, are kept.
    pub async fn plan_prune(&self) -> AppResult<Vec<ResultEntry>> {
        let folders = self.scan.find_empty_folders().await?;
        let mut plan = Vec::with_capacity(folders.len());

        for entry in folders {
            if !self.is_top_level(&entry.id).await? {
                plan.push(entry);
            }
        }

        Ok(plan)
    }

    /// Remove every empty folder below the top-level roots.
    ///
    /// Single pass: a folder that only becomes empty through this call is
    /// left for the next one.
    pub async fn prune_empty_folders(&self) -> AppResult<CleanupReport> {
        let plan = self.plan_prune().await?;
        let ids: Vec<BookmarkId> = plan.into_iter().map(|e| e.id).collect();
        Ok(self.delete(&ids, false).await)
    }

    async fn is_top_level(&self, id: &BookmarkId) -> AppResult<bool> {
        let Some(node) = self.store.get(id).await? else {
            return Ok(true);
        };
        let Some(parent_id) = node.parent_id else {
            return Ok(true);
        };
        Ok(self
            .store
            .get(&parent_id)
            .await?
            .is_none_or(|parent| parent.parent_id.is_none()))
    }
}
