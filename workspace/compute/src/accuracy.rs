//! Forecast accuracy: mean absolute percentage error and its complement.
//!
//! Actual and predicted values are aligned by position, not by date. When the
//! two series have different lengths both are truncated to the shorter one.
//! Degenerate input never fails: a zero actual produces a non-finite MAPE and
//! an empty overlap produces NaN.

use common::converters::{finite, format_two_decimals};
use common::{AccuracyReport, AlertLevel};
use tracing::debug;

/// Accuracy below this percentage is reported as a warning.
pub const ACCURACY_THRESHOLD: f64 = 90.0;

pub const WARNING_MESSAGE: &str =
    "The forecast accuracy is below 90%. Consider reviewing the forecasting model or data.";
pub const SUCCESS_MESSAGE: &str = "The forecast accuracy is above 90%.";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyMetrics {
    pub mape: f64,
    pub accuracy: f64,
    /// Number of aligned points used.
    pub points: usize,
}

impl AccuracyMetrics {
    /// NaN compares false against the threshold and therefore reports success.
    pub fn level(&self) -> AlertLevel {
        if self.accuracy < ACCURACY_THRESHOLD {
            AlertLevel::Warning
        } else {
            AlertLevel::Success
        }
    }

    pub fn to_report(&self) -> AccuracyReport {
        let level = self.level();
        let message = match level {
            AlertLevel::Warning => WARNING_MESSAGE,
            AlertLevel::Success => SUCCESS_MESSAGE,
        };
        AccuracyReport {
            mape: finite(self.mape),
            accuracy: finite(self.accuracy),
            points: self.points,
            mape_text: format!(
                "Mean Absolute Percentage Error (MAPE): {}%",
                format_two_decimals(self.mape)
            ),
            accuracy_text: format!("Forecast Accuracy: {}%", format_two_decimals(self.accuracy)),
            level,
            message: message.to_string(),
        }
    }
}

/// Mean of `|actual - predicted| / actual` times 100 over the aligned prefix.
pub fn mean_absolute_percentage_error(actual: &[f64], predicted: &[f64]) -> f64 {
    let points = actual.len().min(predicted.len());
    let total: f64 = actual
        .iter()
        .zip(predicted)
        .map(|(a, p)| (a - p).abs() / a)
        .sum();
    // 0 / 0 is NaN, matching the mean of an empty series.
    total / points as f64 * 100.0
}

pub fn evaluate(actual: &[f64], predicted: &[f64]) -> AccuracyMetrics {
    let points = actual.len().min(predicted.len());
    if actual.len() != predicted.len() {
        debug!(
            actual = actual.len(),
            predicted = predicted.len(),
            "Series lengths differ, truncating to the shorter one"
        );
    }
    let mape = mean_absolute_percentage_error(actual, predicted);
    AccuracyMetrics {
        mape,
        accuracy: 100.0 - mape,
        points,
    }
}
