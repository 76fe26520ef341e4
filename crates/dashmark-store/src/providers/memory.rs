//! In-memory bookmark store.
//!
//! Holds a forest verbatim, including corrupt data where an id appears
//! more than once, and keeps a flat id index for parent lookups.

use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::RwLock;
use tracing::debug;

use dashmark_core::error::AppError;
use dashmark_core::result::AppResult;
use dashmark_core::traits::TreeStore;
use dashmark_core::types::BookmarkId;
use dashmark_entity::bookmark::BookmarkNode;

/// Index entry: a shallow node plus the size of its children sequence.
#[derive(Debug, Clone)]
struct IndexedNode {
    node: BookmarkNode,
    child_count: Option<usize>,
}

/// In-memory store backed by an owned forest.
#[derive(Debug, Clone)]
pub struct MemoryBookmarkStore {
    /// Top-level nodes with their descendants.
    forest: Arc<RwLock<Vec<BookmarkNode>>>,
    /// Shallow node per id. The first occurrence in pre-order wins.
    index: Arc<DashMap<BookmarkId, IndexedNode>>,
}

impl MemoryBookmarkStore {
    /// Create a store over the given forest.
    pub fn new(forest: Vec<BookmarkNode>) -> Self {
        let index = Arc::new(DashMap::new());
        rebuild_index(&index, &forest);
        Self {
            forest: Arc::new(RwLock::new(forest)),
            index,
        }
    }

    /// Number of distinct node ids in the store.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Whether the store holds no nodes.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of children of a folder, `None` for bookmarks and unknown ids.
    pub fn child_count(&self, id: &BookmarkId) -> Option<usize> {
        self.index.get(id).and_then(|entry| entry.child_count)
    }

    /// Swap in a new forest and rebuild the index.
    pub async fn replace(&self, forest: Vec<BookmarkNode>) {
        let mut current = self.forest.write().await;
        rebuild_index(&self.index, &forest);
        *current = forest;
    }

    /// Detach the first node with `id` from the forest.
    ///
    /// Unless `recursive` is set, folders that still have children are
    /// refused. Returns the detached subtree.
    pub async fn detach(
        &self,
        id: &BookmarkId,
        recursive: bool,
    ) -> AppResult<Option<BookmarkNode>> {
        let mut forest = self.forest.write().await;

        let Some(path) = locate(&forest, id) else {
            return Ok(None);
        };
        let Some((&position, parents)) = path.split_last() else {
            return Ok(None);
        };
        let siblings = siblings_mut(&mut forest, parents)
            .ok_or_else(|| AppError::internal(format!("Lost track of node {id} while removing")))?;

        if !recursive
            && siblings[position]
                .children
                .as_ref()
                .is_some_and(|c| !c.is_empty())
        {
            return Err(AppError::validation(format!(
                "Folder {id} is not empty; remove its tree instead"
            )));
        }

        let removed = siblings.remove(position);
        for (i, sibling) in siblings.iter_mut().enumerate().skip(position) {
            if sibling.index.is_some() {
                sibling.index = Some(i as u32);
            }
        }

        rebuild_index(&self.index, &forest);
        debug!(node_id = %id, recursive, "Detached node from memory store");
        Ok(Some(removed))
    }
}

#[async_trait]
impl TreeStore<BookmarkNode, BookmarkId> for MemoryBookmarkStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    async fn get_tree(&self) -> AppResult<Vec<BookmarkNode>> {
        Ok(self.forest.read().await.clone())
    }

    async fn get(&self, id: &BookmarkId) -> AppResult<Option<BookmarkNode>> {
        Ok(self.index.get(id).map(|entry| entry.node.clone()))
    }

    async fn remove(&self, id: &BookmarkId) -> AppResult<bool> {
        Ok(self.detach(id, false).await?.is_some())
    }

    async fn remove_tree(&self, id: &BookmarkId) -> AppResult<bool> {
        Ok(self.detach(id, true).await?.is_some())
    }
}

/// Rebuild the id index with an explicit pre-order stack.
fn rebuild_index(index: &DashMap<BookmarkId, IndexedNode>, forest: &[BookmarkNode]) {
    index.clear();
    let mut stack: Vec<&BookmarkNode> = forest.iter().rev().collect();

    while let Some(node) = stack.pop() {
        index.entry(node.id.clone()).or_insert_with(|| IndexedNode {
            node: node.shallow(),
            child_count: node.children.as_ref().map(Vec::len),
        });
        if let Some(children) = &node.children {
            stack.extend(children.iter().rev());
        }
    }
}

/// Sibling-index path to the first node with `id`, in pre-order.
fn locate(forest: &[BookmarkNode], id: &BookmarkId) -> Option<Vec<usize>> {
    let mut stack: Vec<(Vec<usize>, &BookmarkNode)> = forest
        .iter()
        .enumerate()
        .rev()
        .map(|(i, node)| (vec![i], node))
        .collect();

    while let Some((path, node)) = stack.pop() {
        if &node.id == id {
            return Some(path);
        }
        if let Some(children) = &node.children {
            for (i, child) in children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child_path, child));
            }
        }
    }
    None
}

/// Follow a sibling-index path down to the sequence that holds its last step.
fn siblings_mut<'a>(
    forest: &'a mut Vec<BookmarkNode>,
    parents: &[usize],
) -> Option<&'a mut Vec<BookmarkNode>> {
    let mut siblings = forest;
    for &i in parents {
        siblings = siblings.get_mut(i)?.children.as_mut()?;
    }
    Some(siblings)
}
