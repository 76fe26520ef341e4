//! Outcome of a removal batch.

use serde::Serialize;

use dashmark_core::types::BookmarkId;

/// A removal that failed, with its error message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedRemoval {
    /// Node id.
    pub id: BookmarkId,
    /// Error message.
    pub error: String,
}

/// Per-id outcome of a removal batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CleanupReport {
    /// Ids removed by this batch.
    pub removed: Vec<BookmarkId>,
    /// Ids that were already gone.
    pub missing: Vec<BookmarkId>,
    /// Ids whose removal failed.
    pub failed: Vec<FailedRemoval>,
}

impl CleanupReport {
    /// Whether every id is now absent from the store.
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }

    /// Number of ids handled in total.
    pub fn total(&self) -> usize {
        self.removed.len() + self.missing.len() + self.failed.len()
    }
}
