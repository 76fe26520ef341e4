//! Request/response envelopes exchanged with the caller shell.

use serde::{Deserialize, Serialize};

use super::entry::ResultEntry;
use super::mode::QueryMode;

/// A single scan request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRequest {
    /// Requested mode.
    pub mode: QueryMode,
}

/// Response to a [`ScanRequest`]: `{ "results": [...] }` or `{ "error": "..." }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ScanResponse {
    /// Successful scan.
    Results {
        /// Ordered result entries.
        results: Vec<ResultEntry>,
    },
    /// Failed scan with a human-readable message.
    Error {
        /// Error message; not a stable machine-readable code.
        error: String,
    },
}

impl ScanResponse {
    /// Build an error response.
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            error: message.into(),
        }
    }

    /// The result entries, if the scan succeeded.
    pub fn results(&self) -> Option<&[ResultEntry]> {
        match self {
            Self::Results { results } => Some(results),
            Self::Error { .. } => None,
        }
    }
}
