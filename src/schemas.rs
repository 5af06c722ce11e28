use axum::{http::StatusCode, response::Json};
use chrono::NaiveDate;
use common::{
    AccuracyReport, AlertLevel, ChartAxis, ChartFigure, ChartLayout, ChartTitle, ChartTrace,
    DashboardResponse, DashboardView, ForecastTableRow, LineStyle, ProductsResponse, TraceMode,
};
use compute::{ComputeError, Dashboard, SelectionRequest};
use model::SalesDataset;
use serde::{Deserialize, Deserializer, Serialize, de};
use std::{fmt, str::FromStr, sync::Arc};
use utoipa::{IntoParams, OpenApi, ToSchema};

pub use common::ApiResponse;

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Sales data loaded once at startup, read-only afterwards
    pub data: Arc<SalesDataset>,
}

impl AppState {
    pub fn new(data: Arc<SalesDataset>) -> Self {
        Self { data }
    }

    pub fn dashboard(&self) -> Dashboard<'_> {
        Dashboard::new(&self.data)
    }
}

/// Query parameters for the dashboard page and endpoint
///
/// Empty values are treated as unset so a plain HTML form can clear a field.
#[derive(Debug, Default, Deserialize, IntoParams, ToSchema)]
#[into_params(parameter_in = Query)]
pub struct DashboardQuery {
    /// Product to display; defaults to the first product
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub product_id: Option<String>,
    /// Start of the historical range (YYYY-MM-DD); defaults to the product's first date
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub start_date: Option<NaiveDate>,
    /// End of the historical range (YYYY-MM-DD); defaults to the product's last date
    #[serde(default, deserialize_with = "empty_string_as_none")]
    pub end_date: Option<NaiveDate>,
}

impl From<DashboardQuery> for SelectionRequest {
    fn from(query: DashboardQuery) -> Self {
        SelectionRequest {
            product_id: query.product_id,
            start_date: query.start_date,
            end_date: query.end_date,
        }
    }
}

fn empty_string_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let value = Option::<String>::deserialize(deserializer)?;
    match value.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<T>().map(Some).map_err(de::Error::custom),
    }
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

impl ErrorResponse {
    pub fn new(code: &str, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.to_string(),
            success: false,
        }
    }
}

pub type ApiError = (StatusCode, Json<ErrorResponse>);

/// Maps a render failure to an HTTP error.
pub fn compute_error(err: ComputeError) -> ApiError {
    let status = match err {
        ComputeError::UnknownProduct(_) | ComputeError::NoProducts => StatusCode::NOT_FOUND,
    };
    (status, Json(ErrorResponse::new(err.code(), err.to_string())))
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Number of historical rows loaded
    pub historical_rows: usize,
    /// Number of forecast rows loaded
    pub forecast_rows: usize,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::products::get_products,
        crate::handlers::dashboard::get_dashboard,
    ),
    components(
        schemas(
            DashboardResponse,
            ProductsResponse,
            DashboardView,
            ForecastTableRow,
            AccuracyReport,
            AlertLevel,
            ChartFigure,
            ChartTrace,
            ChartLayout,
            ChartTitle,
            ChartAxis,
            LineStyle,
            TraceMode,
            ErrorResponse,
            HealthResponse,
            DashboardQuery,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "products", description = "Product selector endpoints"),
        (name = "dashboard", description = "Dashboard render endpoints"),
    ),
    info(
        title = "Salesboard API",
        description = "Historical sales and pre-computed forecast overlay with accuracy metrics",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(query: serde_json::Value) -> Result<DashboardQuery, serde_json::Error> {
        serde_json::from_value(query)
    }

    #[test]
    fn empty_values_are_unset() {
        let query = parse(serde_json::json!({"product_id": "P1", "start_date": "", "end_date": ""})).unwrap();
        assert_eq!(query.product_id.as_deref(), Some("P1"));
        assert_eq!(query.start_date, None);
        assert_eq!(query.end_date, None);
    }

    #[test]
    fn dates_are_parsed() {
        let query = parse(serde_json::json!({"start_date": "2023-01-02", "end_date": "2023-01-31"})).unwrap();
        assert_eq!(query.product_id, None);
        assert_eq!(query.start_date, NaiveDate::from_ymd_opt(2023, 1, 2));
        assert_eq!(query.end_date, NaiveDate::from_ymd_opt(2023, 1, 31));
    }

    #[test]
    fn malformed_date_is_rejected() {
        assert!(parse(serde_json::json!({"start_date": "yesterday"})).is_err());
    }

    #[test]
    fn unknown_product_maps_to_not_found() {
        let (status, Json(body)) = compute_error(ComputeError::UnknownProduct("X".to_string()));
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.code, "UNKNOWN_PRODUCT");
        assert!(!body.success);
    }
}
