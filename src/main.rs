//! Dossier Server — multi-tenant case-record service.
//!
//! Main entry point: loads configuration, initializes logging, prepares
//! the database and hands off to the API layer.

use tracing_subscriber::{EnvFilter, fmt};

use dossier_core::config::AppConfig;
use dossier_core::error::AppError;

#[tokio::main]
async fn main() {
    let env = std::env::var("DOSSIER_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    if let Err(e) = run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}

/// Initialize tracing/logging
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt()
                .json()
                .with_env_filter(filter)
                .with_target(true)
                .init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}

async fn run(config: AppConfig) -> Result<(), AppError> {
    tracing::info!("Starting Dossier v{}", env!("CARGO_PKG_VERSION"));

    tracing::info!("Connecting to database...");
    let db_pool = dossier_database::connection::create_pool(&config.database).await?;

    tracing::info!("Running database migrations...");
    dossier_database::migration::run_migrations(&db_pool).await?;
    tracing::info!("Database migrations complete");

    dossier_api::run_server(config, db_pool).await
}
