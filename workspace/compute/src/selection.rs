//! Product / date-range selection and the filtered views it produces.
//!
//! Every function here borrows from the loaded collections and returns new
//! vectors of references; the source records are never touched.

use chrono::NaiveDate;
use model::{ForecastRecord, HistoricalRecord, ProductId, SalesDataset, sort_product_ids};
use std::collections::HashSet;
use tracing::{debug, instrument};

use crate::error::{ComputeError, Result};

/// Raw user input. Any field may be unset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionRequest {
    pub product_id: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl SelectionRequest {
    pub fn for_product(product_id: impl Into<String>) -> Self {
        Self {
            product_id: Some(product_id.into()),
            ..Self::default()
        }
    }

    pub fn with_range(mut self, start_date: NaiveDate, end_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self.end_date = Some(end_date);
        self
    }
}

/// Inclusive date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Selection after defaults are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub product_id: ProductId,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Sorted, de-duplicated product identifiers present in the forecast.
///
/// Products that only appear in the historical data are not selectable.
pub fn product_options(forecast: &[ForecastRecord]) -> Vec<ProductId> {
    let mut options: Vec<ProductId> = forecast
        .iter()
        .map(|record| &record.product_id)
        .collect::<HashSet<_>>()
        .into_iter()
        .cloned()
        .collect();
    sort_product_ids(&mut options);
    options
}

/// First and last historical date of a product, if it has any history.
pub fn default_date_range(historical: &[HistoricalRecord], product_id: &ProductId) -> Option<DateRange> {
    let mut dates = historical
        .iter()
        .filter(|record| &record.product_id == product_id)
        .map(|record| record.date);
    let first = dates.next()?;
    let (start, end) = dates.fold((first, first), |(lo, hi), date| (lo.min(date), hi.max(date)));
    Some(DateRange { start, end })
}

/// Applies defaults to a request and validates the product.
///
/// The product defaults to the first option. Each date bound falls back
/// independently to the product's historical range; no ordering check is made
/// between the two bounds.
#[instrument(skip(dataset))]
pub fn resolve(request: &SelectionRequest, dataset: &SalesDataset) -> Result<Selection> {
    let options = product_options(&dataset.forecast.records);

    let product_id = match request.product_id.as_deref() {
        Some(requested) => {
            let requested = ProductId::new(requested);
            if !options.contains(&requested) {
                return Err(ComputeError::UnknownProduct(requested.into_inner()));
            }
            requested
        }
        None => options.into_iter().next().ok_or(ComputeError::NoProducts)?,
    };

    let defaults = default_date_range(&dataset.historical.records, &product_id);
    let selection = Selection {
        start_date: request.start_date.or(defaults.map(|range| range.start)),
        end_date: request.end_date.or(defaults.map(|range| range.end)),
        product_id,
    };
    debug!(?selection, "Selection resolved");
    Ok(selection)
}

/// Historical rows of the product within `[start, end]`, ordered by date.
///
/// An unset bound leaves that side open. `start > end` yields an empty view.
pub fn filter_historical<'a>(
    records: &'a [HistoricalRecord],
    product_id: &ProductId,
    start: Option<NaiveDate>,
    end: Option<NaiveDate>,
) -> Vec<&'a HistoricalRecord> {
    let mut view: Vec<&HistoricalRecord> = records
        .iter()
        .filter(|record| &record.product_id == product_id)
        .filter(|record| start.is_none_or(|start| record.date >= start))
        .filter(|record| end.is_none_or(|end| record.date <= end))
        .collect();
    view.sort_by_key(|record| record.date);
    view
}

/// Forecast rows of the product, ordered by date. Never date-filtered.
pub fn filter_forecast<'a>(records: &'a [ForecastRecord], product_id: &ProductId) -> Vec<&'a ForecastRecord> {
    let mut view: Vec<&ForecastRecord> = records
        .iter()
        .filter(|record| &record.product_id == product_id)
        .collect();
    view.sort_by_key(|record| record.date);
    view
}
