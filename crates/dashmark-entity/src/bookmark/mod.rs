//! Bookmark domain entities.

pub mod model;

pub use model::BookmarkNode;
