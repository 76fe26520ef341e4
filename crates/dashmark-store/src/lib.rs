//! # dashmark-store
//!
//! Bookmark store implementations for Dashmark. The walker only sees the
//! [`BookmarkStore`] trait; providers decide where the forest comes from.

pub mod provider;
pub mod providers;

use dashmark_core::traits::TreeStore;
use dashmark_core::types::BookmarkId;
use dashmark_entity::bookmark::BookmarkNode;

pub use provider::{load_snapshot, open_store};
pub use providers::{ChromiumBookmarkStore, MemoryBookmarkStore};

/// A [`TreeStore`] over bookmark nodes.
pub trait BookmarkStore: TreeStore<BookmarkNode, BookmarkId> {}

impl<T> BookmarkStore for T where T: TreeStore<BookmarkNode, BookmarkId> {}
