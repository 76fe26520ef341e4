//! Generic read/remove access to a host-owned hierarchical store.

use async_trait::async_trait;

use crate::result::AppResult;

/// Access to a hierarchical store owned by the host (e.g. a browser's
/// bookmark database).
///
/// The trait is generic over the node and id types so the core crate does
/// not depend on entity definitions. Implementations must be safe to call
/// concurrently; the scan side only ever reads.
#[async_trait]
pub trait TreeStore<Node, Id>: Send + Sync + 'static
where
    Node: Send + Sync + 'static + serde::Serialize,
    Id: Send + Sync + 'static,
{
    /// Provider name used in logs.
    fn name(&self) -> &'static str;

    /// Fetch the full forest of top-level nodes with their descendants.
    async fn get_tree(&self) -> AppResult<Vec<Node>>;

    /// Fetch a single node without its children. `None` when the id is unknown.
    async fn get(&self, id: &Id) -> AppResult<Option<Node>>;

    /// Remove a leaf or an empty container. Returns `false` if the id is unknown.
    async fn remove(&self, id: &Id) -> AppResult<bool>;

    /// Remove a node together with its whole subtree. Returns `false` if the id is unknown.
    async fn remove_tree(&self, id: &Id) -> AppResult<bool>;
}
