//! Store provider implementations.

pub mod chromium;
pub mod memory;

pub use chromium::ChromiumBookmarkStore;
pub use memory::MemoryBookmarkStore;
