#[cfg(test)]
pub mod test_utils {
    use crate::router::create_router;
    use crate::schemas::AppState;
    use axum::Router;
    use chrono::NaiveDate;
    use model::{ForecastRecord, ForecastTable, HistoricalRecord, HistoricalTable, SalesDataset};
    use std::sync::Arc;
    use tracing::Level;
    use tracing_subscriber::FmtSubscriber;

    pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Two products. P1 sold 10, 20, 30 on 2023-01-01..03 and is forecast with
    /// the given values on the same dates; P2 has a single forecast row and no
    /// history.
    pub fn test_dataset(forecasted: [f64; 3], with_bounds: bool) -> SalesDataset {
        let historical = [10.0, 20.0, 30.0]
            .into_iter()
            .zip(1..)
            .map(|(q, d)| HistoricalRecord::new("P1", date(2023, 1, d), q).with_actual_quantity(q))
            .collect();

        let mut forecast: Vec<ForecastRecord> = forecasted
            .into_iter()
            .zip(1..)
            .map(|(q, d)| ForecastRecord::new("P1", date(2023, 1, d), q).with_bounds(q - 2.0, q + 2.0))
            .collect();
        forecast.push(ForecastRecord::new("P2", date(2023, 2, 1), 5.0).with_bounds(4.0, 6.0));

        SalesDataset::new(
            HistoricalTable::new(historical, true),
            ForecastTable::new(forecast, with_bounds),
        )
    }

    /// Create AppState for testing
    pub fn setup_test_app_state(data: SalesDataset) -> AppState {
        AppState::new(Arc::new(data))
    }

    /// Initialize tracing for tests with output to STDERR.
    ///
    /// The log level is determined by the RUST_LOG environment variable,
    /// defaulting to WARN if not set.
    fn init_test_tracing() -> tracing::subscriber::DefaultGuard {
        let log_level = std::env::var("RUST_LOG")
            .ok()
            .and_then(|level| level.parse::<Level>().ok())
            .unwrap_or(Level::WARN);

        let subscriber = FmtSubscriber::builder()
            .with_max_level(log_level)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_default(subscriber)
    }

    /// Create axum app for testing over the default warning scenario
    pub fn setup_test_app() -> Router {
        setup_test_app_with(test_dataset([12.0, 18.0, 33.0], false))
    }

    pub fn setup_test_app_with(data: SalesDataset) -> Router {
        let _ = init_test_tracing();
        create_router(setup_test_app_state(data))
    }
}
