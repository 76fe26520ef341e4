//! Query modes accepted by the walker.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// What a scan should report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryMode {
    /// Every bookmark whose URL is shared by at least one other bookmark.
    Duplicates,
    /// Every folder whose children are known and empty.
    EmptyFolders,
    /// Every bookmark.
    AllBookmarks,
}

impl QueryMode {
    /// Wire name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Duplicates => "duplicates",
            Self::EmptyFolders => "emptyFolders",
            Self::AllBookmarks => "allBookmarks",
        }
    }
}

impl fmt::Display for QueryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QueryMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "duplicates" => Ok(Self::Duplicates),
            "emptyFolders" => Ok(Self::EmptyFolders),
            "allBookmarks" => Ok(Self::AllBookmarks),
            other => Err(format!("Unknown query mode: {other}")),
        }
    }
}
