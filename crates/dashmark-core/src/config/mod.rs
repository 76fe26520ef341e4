//! Application configuration schemas.
//!
//! All configuration structs are deserialized from TOML files via the
//! `config` crate. Each sub-module represents a logical configuration
//! section. Every field has a default, so running without a file works.

pub mod logging;
pub mod scan;
pub mod store;

use serde::{Deserialize, Serialize};
use validator::Validate;

use self::logging::LoggingConfig;
use self::scan::ScanConfig;
use self::store::StoreConfig;

use crate::error::AppError;

/// Environment variable prefix for overrides (`DASHMARK__SCAN__LOOKUP_CONCURRENCY=4`).
pub const ENV_PREFIX: &str = "DASHMARK";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Bookmark store settings.
    #[serde(default)]
    #[validate(nested)]
    pub store: StoreConfig,
    /// Traversal settings.
    #[serde(default)]
    #[validate(nested)]
    pub scan: ScanConfig,
    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from an optional TOML file.
    ///
    /// The file is merged with environment variables prefixed with
    /// `DASHMARK` (sections separated by `__`). A missing file is not an
    /// error; the defaults apply.
    pub fn load(path: &str) -> Result<Self, AppError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name(path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| AppError::configuration(format!("Failed to build config: {e}")))?;

        let parsed: Self = config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))?;

        parsed.validate()?;
        Ok(parsed)
    }
}
