use common::{DashboardView, ForecastTableRow};
use model::{ForecastRecord, SalesDataset};
use tracing::{debug, instrument};

use crate::accuracy;
use crate::chart::build_figure;
use crate::error::Result;
use crate::selection::{SelectionRequest, filter_forecast, filter_historical, product_options, resolve};

pub const DASHBOARD_TITLE: &str = "📦 Product-Level Sales Forecast Dashboard";

/// Renders the dashboard for a selection.
///
/// Holds only a borrow of the loaded dataset; every call recomputes the views
/// from scratch, so rendering the same request twice gives the same result.
#[derive(Debug, Clone, Copy)]
pub struct Dashboard<'a> {
    data: &'a SalesDataset,
}

impl<'a> Dashboard<'a> {
    pub fn new(data: &'a SalesDataset) -> Self {
        Self { data }
    }

    /// Sorted product options as plain strings.
    pub fn products(&self) -> Vec<String> {
        product_options(&self.data.forecast.records)
            .into_iter()
            .map(|id| id.into_inner())
            .collect()
    }

    #[instrument(skip(self))]
    pub fn render(&self, request: &SelectionRequest) -> Result<DashboardView> {
        let selection = resolve(request, self.data)?;

        let hist = filter_historical(
            &self.data.historical.records,
            &selection.product_id,
            selection.start_date,
            selection.end_date,
        );
        let fut = filter_forecast(&self.data.forecast.records, &selection.product_id);
        debug!(historical = hist.len(), forecast = fut.len(), "Views filtered");

        let chart = build_figure(&hist, &fut, self.data.forecast.has_bounds);
        let forecast_table = forecast_table(&fut);

        let accuracy = self.data.historical.has_actual_quantity.then(|| {
            let actual: Vec<f64> = hist.iter().map(|r| r.quantity_sold).collect();
            let predicted: Vec<f64> = fut.iter().map(|r| r.forecasted_quantity).collect();
            accuracy::evaluate(&actual, &predicted).to_report()
        });

        Ok(DashboardView {
            title: DASHBOARD_TITLE.to_string(),
            product_id: selection.product_id.to_string(),
            products: self.products(),
            start_date: selection.start_date,
            end_date: selection.end_date,
            historical_points: hist.len(),
            chart,
            forecast_table,
            accuracy,
        })
    }
}

/// Projects the forecast view to `(date, forecasted_quantity)` with a fresh
/// 0-based index.
pub fn forecast_table(forecast: &[&ForecastRecord]) -> Vec<ForecastTableRow> {
    forecast
        .iter()
        .enumerate()
        .map(|(index, record)| ForecastTableRow {
            index,
            date: record.date,
            forecasted_quantity: record.forecasted_quantity,
        })
        .collect()
}
