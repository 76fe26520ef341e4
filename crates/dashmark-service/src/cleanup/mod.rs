//! Removal of duplicate bookmarks and empty folders.

pub mod report;
pub mod service;

pub use report::{CleanupReport, FailedRemoval};
pub use service::CleanupService;
