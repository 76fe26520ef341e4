//! Dashmark host: answers scan requests over stdin/stdout.

use tokio::io::{self, BufReader};
use tracing_subscriber::{EnvFilter, fmt};

use dashmark::host;
use dashmark_core::config::AppConfig;
use dashmark_core::error::AppError;
use dashmark_core::traits::TreeStore;
use dashmark_service::scan::ScanService;

#[tokio::main]
async fn main() {
    let config = match load_configuration() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Host error: {}", e);
        std::process::exit(1);
    }
}

/// Load configuration from file and environment
fn load_configuration() -> Result<AppConfig, AppError> {
    let config_path =
        std::env::var("DASHMARK_CONFIG").unwrap_or_else(|_| "config/default.toml".to_string());

    AppConfig::load(&config_path)
}

/// Initialize tracing/logging. Logs go to stderr; stdout carries responses.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
        _ => {
            fmt()
                .pretty()
                .with_env_filter(filter)
                .with_target(true)
                .with_writer(std::io::stderr)
                .init();
        }
    }
}

/// Open the store and serve requests until stdin closes
async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Dashmark host v{}", env!("CARGO_PKG_VERSION"));

    let store = dashmark_store::open_store(&config.store).await?;
    tracing::info!(
        provider = %config.store.provider,
        store = store.name(),
        "Bookmark store opened"
    );

    let service = ScanService::new(store, config.scan);
    let answered = host::serve(&service, BufReader::new(io::stdin()), io::stdout()).await?;

    tracing::info!(requests = answered, "Input closed, shutting down");
    Ok(())
}
