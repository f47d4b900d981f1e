use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{AppConfig, initialize_app_state};
use crate::router::create_router;
use crate::schemas::AppState;

pub async fn serve(config: &AppConfig) -> Result<()> {
    trace!("Entering serve function");
    let state = initialize_app_state(config).await.inspect_err(|e| {
        error!("Failed to initialize application state: {}", e);
    })?;
    serve_state(state, &config.bind_address).await
}

/// Binds the listener and runs the router until the server stops.
pub async fn serve_state(state: AppState, bind_address: &str) -> Result<()> {
    info!("Gigbook starting up");
    debug!("Request timeout: {:?}", state.request_timeout);

    let app = create_router(state);
    debug!("Router created successfully");

    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => listener,
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Gigbook API server running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
