//! Result records emitted by a scan.

use serde::{Deserialize, Serialize};

use dashmark_core::types::BookmarkId;

use crate::bookmark::BookmarkNode;

/// `url` value carried by empty-folder entries.
///
/// Real bookmarks never have an empty URL in a browser store, so the empty
/// string is enough to tell the two shapes apart.
pub const EMPTY_FOLDER_URL: &str = "";

/// One row of a scan result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultEntry {
    /// Node id.
    pub id: BookmarkId,
    /// Node title.
    pub title: String,
    /// Bookmark URL, or [`EMPTY_FOLDER_URL`] for folders.
    pub url: String,
    /// Breadcrumb of ancestor titles.
    pub folder_path: String,
}

impl ResultEntry {
    /// Entry for a bookmark node. `None` if the node has no URL or an
    /// empty one.
    pub fn from_bookmark(node: &BookmarkNode, folder_path: String) -> Option<Self> {
        if !node.is_bookmark() {
            return None;
        }
        let url = node.url.clone()?;
        Some(Self {
            id: node.id.clone(),
            title: node.title.clone(),
            url,
            folder_path,
        })
    }

    /// Entry for an empty folder node.
    pub fn empty_folder(node: &BookmarkNode, folder_path: String) -> Self {
        Self {
            id: node.id.clone(),
            title: node.title.clone(),
            url: EMPTY_FOLDER_URL.to_string(),
            folder_path,
        }
    }

    /// Whether this entry describes an empty folder.
    pub fn is_empty_folder(&self) -> bool {
        self.url == EMPTY_FOLDER_URL
    }
}
