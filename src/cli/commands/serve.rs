use anyhow::Result;
use tokio::net::TcpListener;
use tracing::{debug, error, info, trace};

use crate::config::{initialize_app_state, DataConfig};
use crate::router::create_router;

pub async fn serve(data: &DataConfig, bind_address: &str) -> Result<()> {
    trace!("Entering serve function");
    info!("Salesboard starting up");
    debug!("Bind address: {}", bind_address);

    // Load both CSV files once; handlers share them read-only
    trace!("Initializing application state");
    let state = match initialize_app_state(data) {
        Ok(state) => {
            info!(
                historical_rows = state.data.historical.records.len(),
                forecast_rows = state.data.forecast.records.len(),
                "Sales data loaded"
            );
            state
        }
        Err(e) => {
            error!("Failed to initialize application state: {:#}", e);
            return Err(e);
        }
    };

    trace!("Creating application router");
    let app = create_router(state);
    debug!("Router created successfully");

    info!("Starting server on {}", bind_address);
    let listener = match TcpListener::bind(bind_address).await {
        Ok(listener) => {
            debug!("Successfully bound to address: {}", bind_address);
            listener
        }
        Err(e) => {
            error!("Failed to bind to address {}: {}", bind_address, e);
            return Err(e.into());
        }
    };

    info!("Dashboard running on http://{}", bind_address);
    info!("Swagger UI available at http://{}/swagger-ui", bind_address);

    if let Err(e) = axum::serve(listener, app).await {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server shutdown gracefully");
    Ok(())
}
