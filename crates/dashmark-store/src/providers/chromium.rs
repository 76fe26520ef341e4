//! Chromium-family `Bookmarks` profile file store.
//!
//! The file is presented the way the browser bookmarks API presents it: a
//! synthetic root (`id "0"`, empty title) whose children are the root
//! folders. Removals edit the raw JSON so fields Dashmark does not model
//! survive a round trip.
//!
//! The browser owns the file and may rewrite it at any time. Every read and
//! removal first checks the file's modification time and length, and
//! re-parses it when either changed.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;
use tokio::fs;
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use dashmark_core::error::{AppError, ErrorKind};
use dashmark_core::result::AppResult;
use dashmark_core::traits::TreeStore;
use dashmark_core::types::BookmarkId;
use dashmark_entity::bookmark::BookmarkNode;

use super::memory::MemoryBookmarkStore;

/// Id of the synthetic root node.
pub const ROOT_ID: &str = "0";

/// Root folder keys in the order the browser lists them.
const KNOWN_ROOTS: [&str; 3] = ["bookmark_bar", "other", "synced"];

/// Microseconds between 1601-01-01 (WebKit epoch) and 1970-01-01.
const WEBKIT_EPOCH_OFFSET_MICROS: i64 = 11_644_473_600_000_000;

/// One node as stored in the profile file.
#[derive(Debug, Deserialize)]
struct RawNode {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    date_added: Option<String>,
    #[serde(default)]
    children: Option<Vec<RawNode>>,
}

/// Identity of one version of the file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FileStamp {
    modified: Option<SystemTime>,
    len: u64,
}

impl FileStamp {
    fn of(metadata: &std::fs::Metadata) -> Self {
        Self {
            modified: metadata.modified().ok(),
            len: metadata.len(),
        }
    }
}

/// The raw document together with the file version it was parsed from.
#[derive(Debug)]
struct Loaded {
    document: Value,
    stamp: FileStamp,
}

/// Store over a Chromium `Bookmarks` file.
#[derive(Debug)]
pub struct ChromiumBookmarkStore {
    /// Location of the profile file.
    path: PathBuf,
    /// Whether to copy the original file aside before the first write.
    backup: bool,
    /// Set once the backup has been written.
    backed_up: AtomicBool,
    /// Raw JSON document, the source of truth for writes.
    loaded: Mutex<Loaded>,
    /// Parsed forest used for reads, kept in step with `loaded`.
    inner: MemoryBookmarkStore,
}

impl ChromiumBookmarkStore {
    /// Open and parse a profile file.
    pub async fn open(path: impl AsRef<Path>, backup: bool) -> AppResult<Self> {
        let path = path.as_ref().to_path_buf();
        let stamp = stat(&path).await?;
        let document = read_document(&path).await?;
        let forest = parse_forest(&document)?;
        let inner = MemoryBookmarkStore::new(forest);

        info!(
            path = %path.display(),
            nodes = inner.len(),
            "Opened Chromium bookmarks file"
        );

        Ok(Self {
            path,
            backup,
            backed_up: AtomicBool::new(false),
            loaded: Mutex::new(Loaded { document, stamp }),
            inner,
        })
    }

    /// Location of the profile file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-parse the file if it changed since it was last read. The returned
    /// guard keeps other reads and removals out until the caller is done.
    async fn refresh(&self) -> AppResult<MutexGuard<'_, Loaded>> {
        let mut loaded = self.loaded.lock().await;

        // Stat before reading so a write racing the read is caught next time.
        let stamp = stat(&self.path).await?;
        if stamp != loaded.stamp {
            let document = read_document(&self.path).await?;
            let forest = parse_forest(&document)?;
            self.inner.replace(forest).await;
            *loaded = Loaded { document, stamp };
            debug!(
                path = %self.path.display(),
                nodes = self.inner.len(),
                "Reloaded changed bookmarks file"
            );
        }

        Ok(loaded)
    }

    async fn detach(&self, id: &BookmarkId, recursive: bool) -> AppResult<bool> {
        let mut loaded = self.refresh().await?;

        let Some(node) = self.inner.get(id).await? else {
            return Ok(false);
        };
        if id.as_str() == ROOT_ID || node.parent_id.as_ref().is_some_and(|p| p.as_str() == ROOT_ID)
        {
            return Err(AppError::validation(format!(
                "Cannot remove root folder '{}'",
                node.title
            )));
        }
        if !recursive && self.inner.child_count(id).is_some_and(|n| n > 0) {
            return Err(AppError::validation(format!(
                "Folder {id} is not empty; remove its tree instead"
            )));
        }

        let mut updated = loaded.document.clone();
        if !detach_raw(&mut updated, id.as_str()) {
            return Err(AppError::internal(format!(
                "Node {id} is indexed but missing from the bookmarks file"
            )));
        }
        // The browser recomputes the checksum; a stale one would make it
        // discard the edit.
        if let Some(object) = updated.as_object_mut() {
            object.shift_remove("checksum");
        }

        let stamp = self.persist(&updated).await?;
        *loaded = Loaded {
            document: updated,
            stamp,
        };
        self.inner.detach(id, recursive).await?;

        debug!(node_id = %id, recursive, "Removed node from bookmarks file");
        Ok(true)
    }

    /// Write `document` over the file and return the new file's stamp.
    async fn persist(&self, document: &Value) -> AppResult<FileStamp> {
        if self.backup && !self.backed_up.load(Ordering::SeqCst) {
            let backup_path = sibling_path(&self.path, "dashmark.bak");
            fs::copy(&self.path, &backup_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::Storage,
                    format!("Failed to write backup: {}", backup_path.display()),
                    e,
                )
            })?;
            self.backed_up.store(true, Ordering::SeqCst);
            info!(backup = %backup_path.display(), "Backed up bookmarks file");
        }

        let tmp_path = sibling_path(&self.path, "dashmark.tmp");
        let json = serde_json::to_vec_pretty(document)?;
        fs::write(&tmp_path, json).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to write file: {}", tmp_path.display()),
                e,
            )
        })?;
        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to replace file: {}", self.path.display()),
                e,
            )
        })?;
        stat(&self.path).await
    }
}

#[async_trait]
impl TreeStore<BookmarkNode, BookmarkId> for ChromiumBookmarkStore {
    fn name(&self) -> &'static str {
        "chromium"
    }

    async fn get_tree(&self) -> AppResult<Vec<BookmarkNode>> {
        let _loaded = self.refresh().await?;
        self.inner.get_tree().await
    }

    async fn get(&self, id: &BookmarkId) -> AppResult<Option<BookmarkNode>> {
        let _loaded = self.refresh().await?;
        self.inner.get(id).await
    }

    async fn remove(&self, id: &BookmarkId) -> AppResult<bool> {
        self.detach(id, false).await
    }

    async fn remove_tree(&self, id: &BookmarkId) -> AppResult<bool> {
        self.detach(id, true).await
    }
}

async fn stat(path: &Path) -> AppResult<FileStamp> {
    let metadata = fs::metadata(path).await.map_err(|e| io_error(path, e))?;
    Ok(FileStamp::of(&metadata))
}

async fn read_document(path: &Path) -> AppResult<Value> {
    let data = fs::read(path).await.map_err(|e| io_error(path, e))?;
    Ok(serde_json::from_slice(&data)?)
}

fn io_error(path: &Path, e: std::io::Error) -> AppError {
    if e.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found(format!("Bookmarks file not found: {}", path.display()))
    } else {
        AppError::with_source(
            ErrorKind::Storage,
            format!("Failed to read bookmarks file: {}", path.display()),
            e,
        )
    }
}

/// Default Chrome profile `Bookmarks` file for the current platform.
pub fn default_bookmarks_path() -> Option<PathBuf> {
    if cfg!(target_os = "windows") {
        let local = std::env::var_os("LOCALAPPDATA")?;
        Some(
            PathBuf::from(local)
                .join("Google")
                .join("Chrome")
                .join("User Data")
                .join("Default")
                .join("Bookmarks"),
        )
    } else if cfg!(target_os = "macos") {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join("Library")
                .join("Application Support")
                .join("Google")
                .join("Chrome")
                .join("Default")
                .join("Bookmarks"),
        )
    } else {
        let home = std::env::var_os("HOME")?;
        Some(
            PathBuf::from(home)
                .join(".config")
                .join("google-chrome")
                .join("Default")
                .join("Bookmarks"),
        )
    }
}

/// Build the API-shaped forest from a profile document.
fn parse_forest(document: &Value) -> AppResult<Vec<BookmarkNode>> {
    let roots = document
        .get("roots")
        .and_then(Value::as_object)
        .ok_or_else(|| AppError::validation("Bookmarks file has no 'roots' object"))?;

    let mut keys: Vec<&str> = KNOWN_ROOTS
        .iter()
        .copied()
        .filter(|k| roots.contains_key(*k))
        .collect();
    keys.extend(
        roots
            .keys()
            .map(String::as_str)
            .filter(|k| !KNOWN_ROOTS.contains(k)),
    );

    let root_id = BookmarkId::from(ROOT_ID);
    let mut children = Vec::with_capacity(keys.len());
    for key in keys {
        // serde_json limits nesting to 128 levels, which bounds `convert`.
        match RawNode::deserialize(&roots[key]) {
            Ok(raw) => {
                let index = children.len();
                children.push(convert(raw, &root_id, index));
            }
            Err(e) => warn!(root = %key, error = %e, "Skipping unreadable bookmark root"),
        }
    }

    Ok(vec![BookmarkNode {
        id: root_id,
        title: String::new(),
        url: None,
        parent_id: None,
        index: None,
        date_added: None,
        children: Some(children),
    }])
}

fn convert(raw: RawNode, parent_id: &BookmarkId, index: usize) -> BookmarkNode {
    let id = BookmarkId::new(raw.id);
    let children = raw.children.map(|children| {
        children
            .into_iter()
            .enumerate()
            .map(|(i, child)| convert(child, &id, i))
            .collect()
    });

    BookmarkNode {
        title: raw.name,
        url: raw.url,
        parent_id: Some(parent_id.clone()),
        index: Some(index as u32),
        date_added: raw.date_added.as_deref().and_then(webkit_to_utc),
        children,
        id,
    }
}

/// Convert a WebKit timestamp (microseconds since 1601, as a string).
fn webkit_to_utc(value: &str) -> Option<DateTime<Utc>> {
    let micros: i64 = value.parse().ok()?;
    if micros == 0 {
        return None;
    }
    DateTime::from_timestamp_micros(micros - WEBKIT_EPOCH_OFFSET_MICROS)
}

/// Remove the first node with `id` from the raw document.
fn detach_raw(document: &mut Value, id: &str) -> bool {
    let Some(roots) = document.get_mut("roots").and_then(Value::as_object_mut) else {
        return false;
    };

    for root in roots.values_mut() {
        let Some(path) = locate_raw(root, id) else {
            continue;
        };
        let Some((&position, parents)) = path.split_last() else {
            continue;
        };
        if let Some(siblings) = children_mut(root, parents) {
            if position < siblings.len() {
                siblings.remove(position);
                return true;
            }
        }
    }
    false
}

/// Children-index path from `root` to the first descendant with `id`.
fn locate_raw(root: &Value, id: &str) -> Option<Vec<usize>> {
    let mut stack: Vec<(Vec<usize>, &Value)> = Vec::new();
    if let Some(children) = root.get("children").and_then(Value::as_array) {
        stack.extend(
            children
                .iter()
                .enumerate()
                .rev()
                .map(|(i, child)| (vec![i], child)),
        );
    }

    while let Some((path, node)) = stack.pop() {
        if node.get("id").and_then(Value::as_str) == Some(id) {
            return Some(path);
        }
        if let Some(children) = node.get("children").and_then(Value::as_array) {
            for (i, child) in children.iter().enumerate().rev() {
                let mut child_path = path.clone();
                child_path.push(i);
                stack.push((child_path, child));
            }
        }
    }
    None
}

fn children_mut<'a>(mut node: &'a mut Value, parents: &[usize]) -> Option<&'a mut Vec<Value>> {
    for &i in parents {
        node = node.get_mut("children")?.as_array_mut()?.get_mut(i)?;
    }
    node.get_mut("children")?.as_array_mut()
}

fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".");
    name.push(suffix);
    path.with_file_name(name)
}
