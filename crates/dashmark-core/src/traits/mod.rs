//! Core traits defined in `dashmark-core` and implemented by other crates.

pub mod tree_store;

pub use tree_store::TreeStore;
