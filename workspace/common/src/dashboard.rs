use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::chart::ChartFigure;

/// Everything needed to draw the dashboard for one selection.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct DashboardView {
    /// Page title
    pub title: String,
    /// Currently selected product
    pub product_id: String,
    /// Sorted, de-duplicated selector options
    pub products: Vec<String>,
    /// Effective start of the historical range (`None` without history)
    pub start_date: Option<NaiveDate>,
    /// Effective end of the historical range (`None` without history)
    pub end_date: Option<NaiveDate>,
    /// Number of historical rows inside the range
    pub historical_points: usize,
    /// Chart description
    pub chart: ChartFigure,
    /// Forecast values of the selected product
    pub forecast_table: Vec<ForecastTableRow>,
    /// Present only when the historical data carries `actual_quantity`
    pub accuracy: Option<AccuracyReport>,
}

/// One row of the forecast listing. `index` is a display-only sequence.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ForecastTableRow {
    pub index: usize,
    pub date: NaiveDate,
    pub forecasted_quantity: f64,
}

/// Accuracy metric lines shown under the table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct AccuracyReport {
    /// Mean absolute percentage error; `None` when not finite
    pub mape: Option<f64>,
    /// `100 - mape`; `None` when not finite
    pub accuracy: Option<f64>,
    /// Number of aligned points the metric was computed over
    pub points: usize,
    /// Preformatted MAPE line
    pub mape_text: String,
    /// Preformatted accuracy line
    pub accuracy_text: String,
    pub level: AlertLevel,
    pub message: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AlertLevel {
    Success,
    Warning,
}

impl AlertLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Success => "success",
            AlertLevel::Warning => "warning",
        }
    }
}
