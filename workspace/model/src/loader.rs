//! CSV loading for the two input collections.
//!
//! Both files are read with polars with every column kept as text, then each
//! column is converted into typed records here. Parsing ourselves keeps the
//! date handling identical for both files regardless of what the CSV reader
//! would infer.

use chrono::{NaiveDate, NaiveDateTime};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, trace};

use crate::error::{LoadError, Result};
use crate::product::ProductId;
use crate::records::{
    ForecastRecord, ForecastTable, HistoricalRecord, HistoricalTable, SalesDataset,
};

pub const DEFAULT_HISTORICAL_PATH: &str = "Processed_Product_Sales.csv";
pub const DEFAULT_FORECAST_PATH: &str = "multi_month_forecast.csv";

pub const PRODUCT_ID: &str = "product_id";
pub const DATE: &str = "date";
pub const QUANTITY_SOLD: &str = "quantity_sold";
pub const ACTUAL_QUANTITY: &str = "actual_quantity";
pub const FORECASTED_QUANTITY: &str = "forecasted_quantity";
pub const LOWER_BOUND: &str = "lower_bound";
pub const UPPER_BOUND: &str = "upper_bound";

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y"];
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Locations of the historical and forecast files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataPaths {
    pub historical: PathBuf,
    pub forecast: PathBuf,
}

impl DataPaths {
    pub fn new(historical: impl Into<PathBuf>, forecast: impl Into<PathBuf>) -> Self {
        Self {
            historical: historical.into(),
            forecast: forecast.into(),
        }
    }
}

impl Default for DataPaths {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORICAL_PATH, DEFAULT_FORECAST_PATH)
    }
}

impl SalesDataset {
    /// Loads both files. Any failure is fatal for the caller.
    #[instrument]
    pub fn load(paths: &DataPaths) -> Result<Self> {
        let historical = load_historical(&paths.historical)?;
        let forecast = load_forecast(&paths.forecast)?;
        Ok(Self::new(historical, forecast))
    }
}

/// Loads the observed sales file.
pub fn load_historical(path: &Path) -> Result<HistoricalTable> {
    let frame = CsvFrame::read(path)?;

    let product_ids = frame.product_ids()?;
    let dates = frame.dates()?;
    let quantities = frame.required_numbers(QUANTITY_SOLD)?;
    let actual = frame.optional_numbers(ACTUAL_QUANTITY)?;
    let has_actual_quantity = actual.is_some();
    debug!(path = %path.display(), has_actual_quantity, "Historical columns detected");

    let records: Vec<HistoricalRecord> = product_ids
        .into_iter()
        .zip(dates)
        .zip(quantities)
        .enumerate()
        .map(|(idx, ((product_id, date), quantity_sold))| HistoricalRecord {
            product_id,
            date,
            quantity_sold,
            actual_quantity: actual.as_ref().and_then(|values| values[idx]),
        })
        .collect();

    info!(path = %path.display(), rows = records.len(), "Loaded historical sales");
    Ok(HistoricalTable::new(records, has_actual_quantity))
}

/// Loads the pre-computed forecast file.
pub fn load_forecast(path: &Path) -> Result<ForecastTable> {
    let frame = CsvFrame::read(path)?;

    let product_ids = frame.product_ids()?;
    let dates = frame.dates()?;
    let forecasted = frame.required_numbers(FORECASTED_QUANTITY)?;
    let lower = frame.optional_numbers(LOWER_BOUND)?;
    let upper = frame.optional_numbers(UPPER_BOUND)?;
    let has_bounds = lower.is_some() && upper.is_some();
    debug!(path = %path.display(), has_bounds, "Forecast columns detected");

    let records: Vec<ForecastRecord> = product_ids
        .into_iter()
        .zip(dates)
        .zip(forecasted)
        .enumerate()
        .map(|(idx, ((product_id, date), forecasted_quantity))| ForecastRecord {
            product_id,
            date,
            forecasted_quantity,
            lower_bound: lower.as_ref().and_then(|values| values[idx]),
            upper_bound: upper.as_ref().and_then(|values| values[idx]),
        })
        .collect();

    info!(path = %path.display(), rows = records.len(), "Loaded forecast");
    Ok(ForecastTable::new(records, has_bounds))
}

/// Parses a calendar date, dropping any time component.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
                .map(|datetime| datetime.date())
        })
}

struct CsvFrame<'a> {
    path: &'a Path,
    frame: DataFrame,
}

impl<'a> CsvFrame<'a> {
    fn read(path: &'a Path) -> Result<Self> {
        if !path.exists() {
            return Err(LoadError::FileNotFound(path.to_path_buf()));
        }

        trace!(path = %path.display(), "Reading CSV");
        // Zero inference rows reads every column as text.
        let frame = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .try_into_reader_with_file_path(Some(path.to_path_buf()))
            .map_err(|e| LoadError::read(path, e))?
            .finish()
            .map_err(|e| LoadError::read(path, e))?;

        debug!(path = %path.display(), height = frame.height(), width = frame.width(), "CSV read");
        Ok(Self { path, frame })
    }

    fn has_column(&self, name: &str) -> bool {
        self.frame
            .get_column_names()
            .iter()
            .any(|column| column.as_str() == name)
    }

    fn cells(&self, name: &str) -> Result<Vec<Option<String>>> {
        if !self.has_column(name) {
            return Err(LoadError::MissingColumn {
                path: self.path.to_path_buf(),
                column: name.to_string(),
            });
        }

        let series = self
            .frame
            .column(name)
            .map_err(|e| LoadError::read(self.path, e))?
            .as_materialized_series()
            .cast(&DataType::String)
            .map_err(|e| LoadError::read(self.path, e))?;
        let values = series.str().map_err(|e| LoadError::read(self.path, e))?;

        Ok(values
            .into_iter()
            .map(|value| value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()))
            .collect())
    }

    fn invalid_value(&self, column: &str, idx: usize) -> LoadError {
        LoadError::InvalidValue {
            path: self.path.to_path_buf(),
            column: column.to_string(),
            row: idx + 1,
        }
    }

    fn product_ids(&self) -> Result<Vec<ProductId>> {
        self.cells(PRODUCT_ID)?
            .into_iter()
            .enumerate()
            .map(|(idx, cell)| {
                cell.map(ProductId::new)
                    .ok_or_else(|| self.invalid_value(PRODUCT_ID, idx))
            })
            .collect()
    }

    fn dates(&self) -> Result<Vec<NaiveDate>> {
        self.cells(DATE)?
            .into_iter()
            .enumerate()
            .map(|(idx, cell)| {
                let raw = cell.unwrap_or_default();
                parse_date(&raw).ok_or_else(|| LoadError::InvalidDate {
                    path: self.path.to_path_buf(),
                    row: idx + 1,
                    value: raw,
                })
            })
            .collect()
    }

    /// Blank cells load as NaN and show up as gaps; non-numeric text is fatal.
    fn required_numbers(&self, name: &str) -> Result<Vec<f64>> {
        self.cells(name)?
            .into_iter()
            .enumerate()
            .map(|(idx, cell)| match cell {
                None => Ok(f64::NAN),
                Some(value) => value
                    .parse::<f64>()
                    .map_err(|_| self.invalid_value(name, idx)),
            })
            .collect()
    }

    /// `None` when the column is absent; unparsable cells become `None`.
    fn optional_numbers(&self, name: &str) -> Result<Option<Vec<Option<f64>>>> {
        if !self.has_column(name) {
            return Ok(None);
        }
        let values = self
            .cells(name)?
            .into_iter()
            .map(|cell| cell.and_then(|value| value.parse::<f64>().ok()))
            .collect();
        Ok(Some(values))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use temp_dir::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.child(name);
        std::fs::write(&path, contents).expect("write fixture");
        path
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parses_supported_date_shapes() {
        assert_eq!(parse_date("2023-01-05"), Some(date(2023, 1, 5)));
        assert_eq!(parse_date("2023/01/05"), Some(date(2023, 1, 5)));
        assert_eq!(parse_date("2023-01-05 13:45:00"), Some(date(2023, 1, 5)));
        assert_eq!(parse_date("2023-01-05T13:45:00.250"), Some(date(2023, 1, 5)));
        assert_eq!(parse_date(" 2023-01-05 "), Some(date(2023, 1, 5)));
        assert_eq!(parse_date("1/5/2023"), Some(date(2023, 1, 5)));
        assert_eq!(parse_date("01/05/2023 08:30"), Some(date(2023, 1, 5)));
        assert_eq!(parse_date("13/05/2023"), None);
        assert_eq!(parse_date("05.01.2023"), None);
        assert_eq!(parse_date(""), None);
    }

    #[test]
    fn loads_historical_with_actual_quantity() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "hist.csv",
            "product_id,date,quantity_sold,actual_quantity\n\
             P1,2023-01-01,10,11\n\
             P1,2023-01-02,20,\n\
             P2,2023-01-01 00:00:00,5,5\n",
        );

        let table = load_historical(&path).unwrap();
        assert!(table.has_actual_quantity);
        assert_eq!(table.records.len(), 3);
        assert_eq!(table.records[0].product_id.as_str(), "P1");
        assert_eq!(table.records[0].quantity_sold, 10.0);
        assert_eq!(table.records[0].actual_quantity, Some(11.0));
        assert_eq!(table.records[1].actual_quantity, None);
        assert_eq!(table.records[2].date, date(2023, 1, 1));
    }

    #[test]
    fn numeric_product_ids_are_kept_as_text() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "hist.csv",
            "product_id,date,quantity_sold\n101,2023-01-01,1.5\n",
        );

        let table = load_historical(&path).unwrap();
        assert!(!table.has_actual_quantity);
        assert_eq!(table.records[0].product_id.as_str(), "101");
        assert_eq!(table.records[0].quantity_sold, 1.5);
    }

    #[test]
    fn loads_forecast_bounds_only_when_both_columns_exist() {
        let dir = TempDir::new().unwrap();
        let both = write(
            &dir,
            "both.csv",
            "product_id,date,forecasted_quantity,lower_bound,upper_bound\n\
             P1,2023-02-01,12,10,14\n\
             P1,2023-03-01,13,,15\n",
        );
        let lower_only = write(
            &dir,
            "lower.csv",
            "product_id,date,forecasted_quantity,lower_bound\nP1,2023-02-01,12,10\n",
        );

        let table = load_forecast(&both).unwrap();
        assert!(table.has_bounds);
        assert_eq!(table.records[0].lower_bound, Some(10.0));
        assert_eq!(table.records[0].upper_bound, Some(14.0));
        assert_eq!(table.records[1].lower_bound, None);

        let table = load_forecast(&lower_only).unwrap();
        assert!(!table.has_bounds);
        assert_eq!(table.records[0].lower_bound, Some(10.0));
    }

    #[test]
    fn missing_file_is_fatal() {
        let result = load_historical(Path::new("definitely/not/here.csv"));
        assert!(matches!(result, Err(LoadError::FileNotFound(_))));
    }

    #[test]
    fn missing_date_column_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(&dir, "hist.csv", "product_id,quantity_sold\nP1,10\n");

        match load_historical(&path) {
            Err(LoadError::MissingColumn { column, .. }) => assert_eq!(column, "date"),
            other => panic!("expected missing column, got {other:?}"),
        }
    }

    #[test]
    fn unparsable_date_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "fc.csv",
            "product_id,date,forecasted_quantity\nP1,2023-01-01,1\nP1,soon,2\n",
        );

        match load_forecast(&path) {
            Err(LoadError::InvalidDate { row, value, .. }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "soon");
            }
            other => panic!("expected invalid date, got {other:?}"),
        }
    }

    #[test]
    fn empty_required_number_loads_as_nan() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "hist.csv",
            "product_id,date,quantity_sold\nP1,2023-01-01,\nP1,2023-01-02,4\n",
        );

        let table = load_historical(&path).unwrap();
        assert!(table.records[0].quantity_sold.is_nan());
        assert_eq!(table.records[1].quantity_sold, 4.0);
    }

    #[test]
    fn non_numeric_required_number_is_fatal() {
        let dir = TempDir::new().unwrap();
        let path = write(
            &dir,
            "forecast.csv",
            "product_id,date,forecasted_quantity\nP1,2023-02-01,12\nP1,2023-03-01,lots\n",
        );

        assert!(matches!(
            load_forecast(&path),
            Err(LoadError::InvalidValue { row: 2, .. })
        ));
    }

    #[test]
    fn dataset_load_reads_both_files() {
        let dir = TempDir::new().unwrap();
        let hist = write(
            &dir,
            "hist.csv",
            "product_id,date,quantity_sold\nP1,2023-01-01,10\n",
        );
        let fc = write(
            &dir,
            "fc.csv",
            "product_id,date,forecasted_quantity\nP1,2023-02-01,12\nP2,2023-02-01,3\n",
        );

        let dataset = SalesDataset::load(&DataPaths::new(hist, fc)).unwrap();
        assert_eq!(dataset.historical.records.len(), 1);
        assert_eq!(dataset.forecast.records.len(), 2);
        assert!(!dataset.forecast.has_bounds);
    }
}
