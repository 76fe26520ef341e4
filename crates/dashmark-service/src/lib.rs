//! # dashmark-service
//!
//! Service layer for Dashmark. [`scan`] walks the bookmark forest and
//! classifies nodes; [`cleanup`] turns scan results into removals.
//!
//! Services follow constructor injection: the store is handed in as an
//! `Arc<dyn BookmarkStore>` at construction time.

pub mod cleanup;
pub mod scan;

pub use cleanup::{CleanupReport, CleanupService};
pub use scan::{PathResolver, ScanService, ScanSummary, TreeWalker, WalkReport};
