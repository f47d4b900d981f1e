use std::time::Duration;

use anyhow::Result;
use moka::future::Cache;
use sea_orm::Database;
use serde::Deserialize;
use tracing::{debug, info};

use crate::schemas::AppState;

pub const DEFAULT_DATABASE_URL: &str = "sqlite://gigbook.db?mode=rwc";
pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";

/// Runtime settings.
///
/// Read from `gigbook.toml` (optional) and `GIGBOOK_*` environment variables,
/// e.g. `GIGBOOK_REQUEST_TIMEOUT_SECS=10`. Command line flags win over both.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_address: String,
    pub request_timeout_secs: u64,
    pub token_cache_ttl_secs: u64,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let settings = ::config::Config::builder()
            .set_default("database_url", DEFAULT_DATABASE_URL)?
            .set_default("bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("request_timeout_secs", 30_i64)?
            .set_default("token_cache_ttl_secs", 300_i64)?
            .add_source(::config::File::with_name("gigbook").required(false))
            .add_source(::config::Environment::with_prefix("GIGBOOK"))
            .build()?;

        let config: AppConfig = settings.try_deserialize()?;
        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Replaces the connection settings with the ones given on the command line.
    pub fn with_overrides(mut self, database_url: Option<String>, bind_address: Option<String>) -> Self {
        if let Some(database_url) = database_url {
            self.database_url = database_url;
        }
        if let Some(bind_address) = bind_address {
            self.bind_address = bind_address;
        }
        self
    }
}

/// Connects to the database and builds the shared handler state.
pub async fn initialize_app_state(config: &AppConfig) -> Result<AppState> {
    info!("Connecting to database: {}", config.database_url);
    let db = Database::connect(&config.database_url).await?;

    let token_cache = Cache::builder()
        .max_capacity(10_000)
        .time_to_live(Duration::from_secs(config.token_cache_ttl_secs))
        .build();

    Ok(AppState {
        db,
        token_cache,
        request_timeout: Duration::from_secs(config.request_timeout_secs),
    })
}
