//! Bookmark tree scanning: path resolution, traversal, and classification.

pub mod path;
pub mod search;
pub mod service;
pub mod walker;

pub use path::{PATH_SEPARATOR, PathResolver};
pub use search::{ScanSummary, filter_entries};
pub use service::ScanService;
pub use walker::{SkippedNode, TreeWalker, WalkReport};
