//! Core type definitions used across the Dashmark workspace.

pub mod id;

pub use id::BookmarkId;
