use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::product::ProductId;

/// One observed sales row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRecord {
    pub product_id: ProductId,
    pub date: NaiveDate,
    pub quantity_sold: f64,
    pub actual_quantity: Option<f64>,
}

impl HistoricalRecord {
    pub fn new(product_id: impl Into<ProductId>, date: NaiveDate, quantity_sold: f64) -> Self {
        Self {
            product_id: product_id.into(),
            date,
            quantity_sold,
            actual_quantity: None,
        }
    }

    pub fn with_actual_quantity(mut self, actual_quantity: f64) -> Self {
        self.actual_quantity = Some(actual_quantity);
        self
    }
}

/// One pre-computed forecast row, optionally with an interval.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub product_id: ProductId,
    pub date: NaiveDate,
    pub forecasted_quantity: f64,
    pub lower_bound: Option<f64>,
    pub upper_bound: Option<f64>,
}

impl ForecastRecord {
    pub fn new(product_id: impl Into<ProductId>, date: NaiveDate, forecasted_quantity: f64) -> Self {
        Self {
            product_id: product_id.into(),
            date,
            forecasted_quantity,
            lower_bound: None,
            upper_bound: None,
        }
    }

    pub fn with_bounds(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = Some(lower_bound);
        self.upper_bound = Some(upper_bound);
        self
    }
}

/// Historical collection plus the column facts that change rendering.
#[derive(Debug, Clone, Default)]
pub struct HistoricalTable {
    pub records: Vec<HistoricalRecord>,
    /// Whether the source file carries an `actual_quantity` column at all.
    pub has_actual_quantity: bool,
}

impl HistoricalTable {
    pub fn new(records: Vec<HistoricalRecord>, has_actual_quantity: bool) -> Self {
        Self {
            records,
            has_actual_quantity,
        }
    }
}

/// Forecast collection plus the column facts that change rendering.
#[derive(Debug, Clone, Default)]
pub struct ForecastTable {
    pub records: Vec<ForecastRecord>,
    /// True only when both `lower_bound` and `upper_bound` columns exist.
    pub has_bounds: bool,
}

impl ForecastTable {
    pub fn new(records: Vec<ForecastRecord>, has_bounds: bool) -> Self {
        Self { records, has_bounds }
    }
}

/// Both collections, loaded once and read-only afterwards.
///
/// This is the data-access object handed to the dashboard on every render;
/// callers share it behind an `Arc` rather than through a global cache.
#[derive(Debug, Clone, Default)]
pub struct SalesDataset {
    pub historical: HistoricalTable,
    pub forecast: ForecastTable,
}

impl SalesDataset {
    pub fn new(historical: HistoricalTable, forecast: ForecastTable) -> Self {
        Self {
            historical,
            forecast,
        }
    }
}
