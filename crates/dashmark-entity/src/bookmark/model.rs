//! Bookmark node model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use dashmark_core::types::BookmarkId;

/// A node of the host bookmark forest.
///
/// A non-empty `url` marks a bookmark; the presence of `children`
/// marks a folder. A folder fetched shallowly (e.g. by id) has
/// `children: None`, which is not the same as an empty folder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookmarkNode {
    /// Opaque unique identifier.
    pub id: BookmarkId,
    /// Display title, possibly empty.
    #[serde(default)]
    pub title: String,
    /// Target URL for bookmarks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Immediate ancestor; absent only for the synthetic root(s).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<BookmarkId>,
    /// Position among siblings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
    /// When the node was created (milliseconds since the Unix epoch on the wire).
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "chrono::serde::ts_milliseconds_option"
    )]
    pub date_added: Option<DateTime<Utc>>,
    /// Ordered child nodes, present for folders.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<BookmarkNode>>,
}

impl BookmarkNode {
    /// Create a bookmark (leaf) node.
    pub fn bookmark(id: impl Into<BookmarkId>, title: &str, url: &str) -> Self {
        Self {
            id: id.into(),
            title: title.to_string(),
            url: Some(url.to_string()),
            parent_id: None,
            index: None,
            date_added: None,
            children: None,
        }
    }

    /// Create a folder node, re-parenting the given children onto it.
    pub fn folder(id: impl Into<BookmarkId>, title: &str, children: Vec<BookmarkNode>) -> Self {
        let id = id.into();
        let children = children
            .into_iter()
            .enumerate()
            .map(|(i, mut child)| {
                child.parent_id = Some(id.clone());
                child.index = Some(i as u32);
                child
            })
            .collect();

        Self {
            id,
            title: title.to_string(),
            url: None,
            parent_id: None,
            index: None,
            date_added: None,
            children: Some(children),
        }
    }

    /// Set the parent id.
    pub fn with_parent(mut self, parent_id: impl Into<BookmarkId>) -> Self {
        self.parent_id = Some(parent_id.into());
        self
    }

    /// Whether this node is a bookmark (has a non-empty URL).
    pub fn is_bookmark(&self) -> bool {
        self.url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Whether this node carries a children sequence.
    pub fn is_folder(&self) -> bool {
        self.children.is_some()
    }

    /// Whether this is a folder whose children are known and empty.
    pub fn is_empty_folder(&self) -> bool {
        self.children.as_ref().is_some_and(|c| c.is_empty())
    }

    /// Whether this node has no parent.
    pub fn is_root(&self) -> bool {
        self.parent_id.is_none()
    }

    /// A copy of this node without its children, as returned by id lookups.
    pub fn shallow(&self) -> Self {
        Self {
            children: None,
            ..self.clone()
        }
    }
}
