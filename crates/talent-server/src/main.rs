//! Talent Management API server - main entry point

use anyhow::{Context, Result};
use talent_common::logging::{init_logging, LogConfig};
use tracing::info;

use talent_server::{api, config::Config, db};

#[tokio::main]
async fn main() -> Result<()> {
    // Environment variables take precedence over these defaults
    let log_config = LogConfig::builder()
        .log_file_prefix("talent-server")
        .filter_directives("talent_server=debug,tower_http=debug,sqlx=warn")
        .build()
        .merge_env()?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(&log_config)?;

    info!("Starting Talent Management API");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let pool = db::create_pool(&config.database)
        .await
        .context("Failed to connect to the database")?;

    db::migrate(&pool).await?;

    api::serve(config, pool).await
}
