//! Traversal configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// Settings for the bookmark tree walker.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct ScanConfig {
    /// Maximum number of folder-path lookups in flight during one walk.
    ///
    /// `1` reproduces strictly sequential lookups. Result order does not
    /// depend on this value.
    #[serde(default = "default_lookup_concurrency")]
    #[validate(range(min = 1, max = 64))]
    pub lookup_concurrency: usize,
    /// Use a top-level empty folder's own title as its path when the
    /// computed breadcrumb is empty.
    #[serde(default = "default_true")]
    pub top_level_fallback: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            lookup_concurrency: default_lookup_concurrency(),
            top_level_fallback: default_true(),
        }
    }
}

fn default_lookup_concurrency() -> usize {
    8
}

fn default_true() -> bool {
    true
}
