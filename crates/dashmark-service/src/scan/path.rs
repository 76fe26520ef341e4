//! Folder path resolution by walking parent links.

use std::collections::HashSet;
use std::sync::Arc;

use dashmark_core::error::{AppError, ErrorKind};
use dashmark_core::result::AppResult;
use dashmark_core::traits::TreeStore;
use dashmark_entity::bookmark::BookmarkNode;
use dashmark_store::BookmarkStore;

/// Separator between breadcrumb segments.
pub const PATH_SEPARATOR: &str = " -> ";

/// Resolves the breadcrumb of ancestor titles for a node.
///
/// Holds no state besides the store handle; concurrent calls for
/// different nodes are independent.
#[derive(Clone)]
pub struct PathResolver {
    /// Store used for parent lookups.
    store: Arc<dyn BookmarkStore>,
}

impl PathResolver {
    /// Creates a new path resolver.
    pub fn new(store: Arc<dyn BookmarkStore>) -> Self {
        Self { store }
    }

    /// Ancestor titles from the top level down to the node's parent.
    ///
    /// Fails with a lookup error when a parent cannot be fetched, is
    /// missing, or the parent chain loops back on itself.
    pub async fn ancestors(&self, node: &BookmarkNode) -> AppResult<Vec<String>> {
        let mut titles = Vec::new();
        let mut seen = HashSet::new();
        let mut next = node.parent_id.clone();

        while let Some(parent_id) = next {
            if !seen.insert(parent_id.clone()) {
                return Err(AppError::lookup(format!(
                    "Parent chain of node {} loops at {parent_id}",
                    node.id
                )));
            }

            let parent = self
                .store
                .get(&parent_id)
                .await
                .map_err(|e| {
                    AppError::with_source(
                        ErrorKind::Lookup,
                        format!("Failed to fetch parent {parent_id} of node {}", node.id),
                        e,
                    )
                })?
                .ok_or_else(|| {
                    AppError::lookup(format!("Parent {parent_id} of node {} not found", node.id))
                })?;

            // A blank top-level title is the synthetic root; user folders
            // keep their title even when it is empty.
            if parent.parent_id.is_some() || !parent.title.is_empty() {
                titles.push(parent.title);
            }
            next = parent.parent_id;
        }

        titles.reverse();
        Ok(titles)
    }

    /// The joined breadcrumb; empty for top-level nodes.
    pub async fn resolve(&self, node: &BookmarkNode) -> AppResult<String> {
        let titles = self.ancestors(node).await?;
        Ok(join_path(&titles))
    }

    /// Like [`resolve`](Self::resolve), but falls back to the node's own
    /// title when the breadcrumb is empty.
    pub async fn resolve_or_title(&self, node: &BookmarkNode) -> AppResult<String> {
        let path = self.resolve(node).await?;
        if path.is_empty() {
            Ok(node.title.clone())
        } else {
            Ok(path)
        }
    }
}

/// Join ancestor titles root-first.
pub fn join_path(titles: &[String]) -> String {
    titles.join(PATH_SEPARATOR)
}
