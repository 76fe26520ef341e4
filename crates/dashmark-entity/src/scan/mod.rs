//! Scan query modes, result records, and message envelopes.

pub mod entry;
pub mod message;
pub mod mode;

pub use entry::{EMPTY_FOLDER_URL, ResultEntry};
pub use message::{ScanRequest, ScanResponse};
pub use mode::QueryMode;
