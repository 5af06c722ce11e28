use common::converters::finite;
use common::{ChartAxis, ChartFigure, ChartLayout, ChartTitle, ChartTrace, LineStyle, TraceMode};
use model::{ForecastRecord, HistoricalRecord};

pub const CHART_TITLE: &str = "Sales Forecast (Next 6 Months)";
pub const X_AXIS_TITLE: &str = "Date";
pub const Y_AXIS_TITLE: &str = "Quantity Sold";

pub const HISTORICAL: &str = "Historical";
pub const FORECAST: &str = "Forecast";
pub const LOWER_BOUND: &str = "Lower Bound";
pub const UPPER_BOUND: &str = "Upper Bound";

/// Builds the overlay chart for the filtered views.
///
/// Bound series are added when the forecast file has both bound columns,
/// even if the selected product has no bound values.
pub fn build_figure(
    historical: &[&HistoricalRecord],
    forecast: &[&ForecastRecord],
    include_bounds: bool,
) -> ChartFigure {
    let mut actual = ChartTrace::scatter(HISTORICAL, TraceMode::LinesMarkers, LineStyle::solid("blue"));
    for record in historical {
        actual.push(record.date, finite(record.quantity_sold));
    }

    let mut predicted = ChartTrace::scatter(FORECAST, TraceMode::LinesMarkers, LineStyle::dashed("orange"));
    for record in forecast {
        predicted.push(record.date, finite(record.forecasted_quantity));
    }

    let mut data = vec![actual, predicted];

    if include_bounds {
        let mut lower = ChartTrace::scatter(LOWER_BOUND, TraceMode::Lines, LineStyle::dashed("lightgray"));
        let mut upper = ChartTrace::scatter(UPPER_BOUND, TraceMode::Lines, LineStyle::dashed("lightgray"));
        for record in forecast {
            lower.push(record.date, record.lower_bound);
            upper.push(record.date, record.upper_bound);
        }
        data.push(lower);
        data.push(upper);
    }

    ChartFigure {
        data,
        layout: ChartLayout {
            title: ChartTitle {
                text: CHART_TITLE.to_string(),
            },
            xaxis: ChartAxis::titled(X_AXIS_TITLE),
            yaxis: ChartAxis::titled(Y_AXIS_TITLE),
            hovermode: "x unified".to_string(),
        },
    }
}
