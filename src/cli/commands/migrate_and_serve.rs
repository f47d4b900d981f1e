use anyhow::Result;
use tracing::{info, trace};

use super::initdb::run_migrations;
use super::serve::serve_state;
use crate::config::{AppConfig, initialize_app_state};

/// Migrates the configured database and serves it over the same connection pool.
pub async fn migrate_and_serve(config: &AppConfig) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");

    let state = initialize_app_state(config).await?;
    run_migrations(&state.db).await?;

    serve_state(state, &config.bind_address).await
}
