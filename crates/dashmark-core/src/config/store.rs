//! Bookmark store configuration.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Which store implementation to open.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    /// A Chromium-family profile `Bookmarks` file, edited in place.
    Chromium,
    /// A JSON dump of the browser API tree (`getTree()` output), held in memory.
    Snapshot,
}

impl fmt::Display for StoreProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chromium => write!(f, "chromium"),
            Self::Snapshot => write!(f, "snapshot"),
        }
    }
}

/// Bookmark store settings.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct StoreConfig {
    /// Store implementation.
    #[serde(default = "default_provider")]
    pub provider: StoreProvider,
    /// Path of the bookmarks file. For `chromium`, the default Chrome
    /// profile is used when unset.
    #[serde(default)]
    pub bookmarks_file: Option<PathBuf>,
    /// Write a `.bak` copy of the file before the first modification.
    #[serde(default = "default_backup")]
    pub backup: bool,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            bookmarks_file: None,
            backup: default_backup(),
        }
    }
}

fn default_provider() -> StoreProvider {
    StoreProvider::Chromium
}

fn default_backup() -> bool {
    true
}
