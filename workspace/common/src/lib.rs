//! Common transport-layer types shared by the HTTP API, the HTML page and the
//! command line. These describe what to render, not how to compute it.

pub mod chart;
pub mod converters;
mod dashboard;

pub use chart::{ChartAxis, ChartFigure, ChartLayout, ChartTitle, ChartTrace, LineStyle, TraceMode};
pub use dashboard::{AccuracyReport, AlertLevel, DashboardView, ForecastTableRow};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Generic API response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[aliases(
    DashboardResponse = ApiResponse<DashboardView>,
    ProductsResponse = ApiResponse<Vec<String>>
)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            data,
            message: message.into(),
            success: true,
        }
    }
}
