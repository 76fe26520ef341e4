//! # dashmark-core
//!
//! Core crate for Dashmark. Contains the store trait, configuration
//! schemas, the bookmark identifier type, and the unified error system.
//!
//! This crate has **no** internal dependencies on other Dashmark crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;
pub mod types;

pub use error::AppError;
pub use result::AppResult;
