//! Store factory: opens the configured provider.

use std::path::Path;
use std::sync::Arc;

use tokio::fs;
use tracing::info;

use dashmark_core::config::store::{StoreConfig, StoreProvider};
use dashmark_core::error::{AppError, ErrorKind};
use dashmark_core::result::AppResult;
use dashmark_entity::bookmark::BookmarkNode;

use crate::BookmarkStore;
use crate::providers::chromium::{ChromiumBookmarkStore, default_bookmarks_path};
use crate::providers::memory::MemoryBookmarkStore;

/// Open the store described by `config`.
pub async fn open_store(config: &StoreConfig) -> AppResult<Arc<dyn BookmarkStore>> {
    match config.provider {
        StoreProvider::Chromium => {
            let path = match &config.bookmarks_file {
                Some(path) => path.clone(),
                None => default_bookmarks_path().ok_or_else(|| {
                    AppError::configuration(
                        "No bookmarks file configured and no default profile could be located",
                    )
                })?,
            };
            let store = ChromiumBookmarkStore::open(&path, config.backup).await?;
            Ok(Arc::new(store))
        }
        StoreProvider::Snapshot => {
            let path = config.bookmarks_file.as_deref().ok_or_else(|| {
                AppError::configuration("The snapshot provider requires store.bookmarks_file")
            })?;
            let store = load_snapshot(path).await?;
            Ok(Arc::new(store))
        }
    }
}

/// Load a JSON dump of the browser API tree into an in-memory store.
///
/// Accepts either the forest array returned by `getTree()` or a single
/// root node object.
pub async fn load_snapshot(path: &Path) -> AppResult<MemoryBookmarkStore> {
    let data = fs::read(path).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            AppError::not_found(format!("Snapshot file not found: {}", path.display()))
        } else {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to read snapshot: {}", path.display()),
                e,
            )
        }
    })?;

    let value: serde_json::Value = serde_json::from_slice(&data)?;
    let forest: Vec<BookmarkNode> = if value.is_array() {
        serde_json::from_value(value)?
    } else {
        vec![serde_json::from_value(value)?]
    };

    let store = MemoryBookmarkStore::new(forest);
    info!(path = %path.display(), nodes = store.len(), "Loaded bookmark snapshot");
    Ok(store)
}
