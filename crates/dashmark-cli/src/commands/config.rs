//! Configuration management CLI commands.

use clap::{Args, Subcommand};

use crate::output;
use dashmark_core::error::AppError;

use super::Context;

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration
    Show,
    /// Validate configuration file
    Validate,
}

/// Execute config commands
pub async fn execute(args: &ConfigArgs, ctx: &Context<'_>) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = ctx.load_config()?;
            output::print_json(&config);
        }
        ConfigCommand::Validate => match ctx.load_config() {
            Ok(config) => {
                output::print_success(&format!("Configuration '{}' is valid", ctx.config_path));
                output::print_kv("Store", &config.store.provider.to_string());
                output::print_kv(
                    "Bookmarks file",
                    &config
                        .store
                        .bookmarks_file
                        .as_ref()
                        .map(|p| p.display().to_string())
                        .unwrap_or_else(|| "(browser default)".to_string()),
                );
                output::print_kv(
                    "Lookup concurrency",
                    &config.scan.lookup_concurrency.to_string(),
                );
                output::print_kv("Log level", &config.logging.level);
            }
            Err(e) => {
                output::print_error(&format!("Configuration invalid: {}", e));
                return Err(e);
            }
        },
    }

    Ok(())
}
