//! Convenience result type alias for Dashmark.

use crate::error::AppError;

/// A specialized `Result` type for Dashmark operations.
pub type AppResult<T> = Result<T, AppError>;
