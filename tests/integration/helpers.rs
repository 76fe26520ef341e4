//! Shared test helpers for integration tests.

#![allow(dead_code)]

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tempfile::TempDir;

use dashmark_core::config::AppConfig;
use dashmark_core::config::scan::ScanConfig;
use dashmark_entity::scan::ResultEntry;
use dashmark_service::cleanup::CleanupService;
use dashmark_service::scan::ScanService;
use dashmark_store::{BookmarkStore, ChromiumBookmarkStore};

/// Path of a file under `tests/fixtures`.
pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// A Chromium profile copied into a scratch directory.
pub struct TestProfile {
    /// Keeps the directory alive for the duration of the test.
    pub dir: TempDir,
    /// Path of the copied `Bookmarks` file.
    pub path: PathBuf,
}

impl TestProfile {
    /// Copy the `Bookmarks` fixture into a fresh temp directory.
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("Bookmarks");
        std::fs::copy(fixture("Bookmarks"), &path).expect("Failed to copy fixture");
        Self { dir, path }
    }

    /// Open the copied file as a store.
    pub async fn open(&self) -> Arc<dyn BookmarkStore> {
        Arc::new(
            ChromiumBookmarkStore::open(&self.path, true)
                .await
                .expect("Failed to open bookmarks file"),
        )
    }

    /// Scan service over a freshly opened store.
    pub async fn scan(&self) -> ScanService {
        ScanService::new(self.open().await, ScanConfig::default())
    }

    /// Cleanup service over a freshly opened store.
    pub async fn cleanup(&self) -> CleanupService {
        CleanupService::new(self.open().await, ScanConfig::default())
    }

    /// Parsed contents of the file on disk.
    pub fn read_json(&self) -> serde_json::Value {
        let data = std::fs::read(&self.path).expect("Failed to read bookmarks file");
        serde_json::from_slice(&data).expect("Bookmarks file is not JSON")
    }
}

/// Load the integration test config.
pub fn test_config() -> AppConfig {
    let path = fixture("test_config.toml");
    let mut config =
        AppConfig::load(path.to_str().expect("utf-8 path")).expect("Failed to load test config");
    config.store.bookmarks_file = Some(fixture("snapshot.json"));
    config
}

/// `(id, folder_path)` pairs of a result list.
pub fn ids_and_paths(entries: &[ResultEntry]) -> Vec<(&str, &str)> {
    entries
        .iter()
        .map(|e| (e.id.as_str(), e.folder_path.as_str()))
        .collect()
}
