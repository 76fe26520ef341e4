//! CLI command definitions and dispatch.

pub mod cleanup;
pub mod config;
pub mod scan;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};

use crate::output::OutputFormat;
use dashmark_core::config::AppConfig;
use dashmark_core::error::AppError;
use dashmark_store::BookmarkStore;

/// Dashmark: find duplicate bookmarks and empty folders
#[derive(Debug, Parser)]
#[command(name = "dashmark", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Bookmarks file to use instead of the configured one
    #[arg(long, global = true)]
    pub file: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List bookmarks that share a URL with another bookmark
    Duplicates(scan::ScanArgs),
    /// List folders without children
    EmptyFolders(scan::ScanArgs),
    /// List every bookmark with its folder path
    List(scan::ScanArgs),
    /// Remove all but the first copy of every duplicated URL
    Dedupe(cleanup::ConfirmArgs),
    /// Remove empty folders below the top-level roots
    PruneEmpty(cleanup::ConfirmArgs),
    /// Remove bookmarks or folders by id
    Remove(cleanup::RemoveArgs),
    /// Configuration management
    Config(config::ConfigArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        let ctx = Context {
            config_path: &self.config,
            file: self.file.as_ref(),
            format: self.format,
        };

        match &self.command {
            Commands::Duplicates(args) => scan::duplicates(args, &ctx).await,
            Commands::EmptyFolders(args) => scan::empty_folders(args, &ctx).await,
            Commands::List(args) => scan::list(args, &ctx).await,
            Commands::Dedupe(args) => cleanup::dedupe(args, &ctx).await,
            Commands::PruneEmpty(args) => cleanup::prune_empty(args, &ctx).await,
            Commands::Remove(args) => cleanup::remove(args, &ctx).await,
            Commands::Config(args) => config::execute(args, &ctx).await,
        }
    }
}

/// Global options shared by every command.
#[derive(Debug, Clone, Copy)]
pub struct Context<'a> {
    /// Path to configuration file
    pub config_path: &'a str,
    /// Bookmarks file override
    pub file: Option<&'a PathBuf>,
    /// Output format
    pub format: OutputFormat,
}

impl Context<'_> {
    /// Load configuration, applying the `--file` override.
    pub fn load_config(&self) -> Result<AppConfig, AppError> {
        let mut config = AppConfig::load(self.config_path)?;
        if let Some(file) = self.file {
            config.store.bookmarks_file = Some(file.clone());
        }
        Ok(config)
    }

    /// Open the configured bookmark store.
    pub async fn open_store(&self, config: &AppConfig) -> Result<Arc<dyn BookmarkStore>, AppError> {
        dashmark_store::open_store(&config.store).await
    }
}
