use anyhow::Result;
use chrono::NaiveDate;
use common::DashboardView;
use compute::SelectionRequest;
use std::fmt::Write;

use crate::config::{initialize_app_state, DataConfig};

pub fn print_report(
    data: &DataConfig,
    product_id: Option<String>,
    start_date: Option<NaiveDate>,
    end_date: Option<NaiveDate>,
) -> Result<()> {
    let state = initialize_app_state(data)?;
    let request = SelectionRequest { product_id, start_date, end_date };
    let view = state.dashboard().render(&request)?;

    print!("{}", format_report(&view));
    Ok(())
}

/// Plain-text rendering of a dashboard view: header, range, forecast table
/// and accuracy lines.
pub fn format_report(view: &DashboardView) -> String {
    let mut out = String::new();
    let bound = |date: Option<NaiveDate>| date.map_or_else(|| "-".to_string(), |d| d.to_string());

    // Writing into a String cannot fail.
    let _ = writeln!(out, "{}", view.title);
    let _ = writeln!(out, "Product ID: {}", view.product_id);
    let _ = writeln!(
        out,
        "Range: {} .. {} ({} historical points)",
        bound(view.start_date),
        bound(view.end_date),
        view.historical_points
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "📊 Forecasted Quantities");
    let _ = writeln!(out, "{:>5}  {:<10}  {:>19}", "", "date", "forecasted_quantity");
    for row in &view.forecast_table {
        let _ = writeln!(out, "{:>5}  {:<10}  {:>19}", row.index, row.date, row.forecasted_quantity);
    }

    if let Some(report) = &view.accuracy {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", report.mape_text);
        let _ = writeln!(out, "{}", report.accuracy_text);
        let _ = writeln!(out, "[{}] {}", report.level.as_str(), report.message);
    }
    out
}
