//! Record types for observed sales and pre-computed forecasts, and the CSV
//! loader that builds them.

pub mod error;
pub mod loader;
pub mod product;
pub mod records;

pub use error::LoadError;
pub use loader::{DataPaths, load_forecast, load_historical, parse_date};
pub use product::{ProductId, sort_product_ids};
pub use records::{ForecastRecord, ForecastTable, HistoricalRecord, HistoricalTable, SalesDataset};

// Re-export tracing for use in this crate
pub use tracing;
