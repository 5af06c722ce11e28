use anyhow::{Context, Result};
use config::{Config, Environment, File};
use model::loader::{DEFAULT_FORECAST_PATH, DEFAULT_HISTORICAL_PATH};
use model::{DataPaths, SalesDataset};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::schemas::AppState;

pub const DEFAULT_BIND_ADDRESS: &str = "0.0.0.0:3000";
pub const DEFAULT_LOG_FILTER: &str = "salesboard=info,model=info,compute=info,tower_http=info";

/// Layered application configuration.
///
/// Precedence, lowest first: built-in defaults, the optional TOML file,
/// `SALESBOARD__SECTION__KEY` environment variables, then CLI flags applied by
/// the individual commands.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub data: DataConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub bind_address: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub historical_path: PathBuf,
    pub forecast_path: PathBuf,
}

impl DataConfig {
    pub fn paths(&self) -> DataPaths {
        DataPaths::new(&self.historical_path, &self.forecast_path)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl AppConfig {
    pub fn load(config_file: Option<&Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut builder = Config::builder()
            .set_default("server.bind_address", DEFAULT_BIND_ADDRESS)?
            .set_default("data.historical_path", DEFAULT_HISTORICAL_PATH)?
            .set_default("data.forecast_path", DEFAULT_FORECAST_PATH)?
            .set_default("logging.filter", DEFAULT_LOG_FILTER)?;

        if let Some(path) = config_file {
            builder = builder.add_source(File::from(path).required(true));
        }

        let config = builder
            .add_source(Environment::with_prefix("SALESBOARD").separator("__"))
            .build()
            .context("Failed to build configuration")?
            .try_deserialize()
            .context("Invalid configuration")?;

        Ok(config)
    }
}

/// Loads both input files and wraps them for sharing across handlers.
pub fn initialize_app_state(data: &DataConfig) -> Result<AppState> {
    let paths = data.paths();
    tracing::info!(
        historical = %paths.historical.display(),
        forecast = %paths.forecast.display(),
        "Loading sales data"
    );
    let dataset = SalesDataset::load(&paths)?;
    Ok(AppState::new(Arc::new(dataset)))
}
