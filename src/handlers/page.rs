use askama::Template;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use common::{AccuracyReport, DashboardView, ForecastTableRow};
use compute::SelectionRequest;
use tracing::{error, instrument, warn};
use crate::schemas::{AppState, DashboardQuery};

/// Browser dashboard. The form re-submits on every change, so each
/// interaction is one full render of the current selection.
#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardPage {
    pub title: String,
    pub product_id: String,
    pub products: Vec<ProductOption>,
    pub start_date: String,
    pub end_date: String,
    /// Chart description, already escaped for an inline script
    pub figure_json: String,
    pub forecast_table: Vec<ForecastTableRow>,
    pub accuracy: Option<AccuracyReport>,
    pub error: Option<String>,
}

pub struct ProductOption {
    pub id: String,
    pub selected: bool,
}

impl DashboardPage {
    pub fn from_view(view: DashboardView) -> serde_json::Result<Self> {
        let figure_json = script_safe_json(&view.chart)?;
        let products = view
            .products
            .into_iter()
            .map(|id| ProductOption {
                selected: id == view.product_id,
                id,
            })
            .collect();

        Ok(Self {
            title: view.title,
            product_id: view.product_id,
            products,
            start_date: view.start_date.map(|d| d.to_string()).unwrap_or_default(),
            end_date: view.end_date.map(|d| d.to_string()).unwrap_or_default(),
            figure_json,
            forecast_table: view.forecast_table,
            accuracy: view.accuracy,
            error: None,
        })
    }

    pub fn failed(title: &str, products: Vec<String>, message: String) -> Self {
        Self {
            title: title.to_string(),
            product_id: String::new(),
            products: products
                .into_iter()
                .map(|id| ProductOption { id, selected: false })
                .collect(),
            start_date: String::new(),
            end_date: String::new(),
            figure_json: "null".to_string(),
            forecast_table: Vec::new(),
            accuracy: None,
            error: Some(message),
        }
    }
}

/// Serializes for embedding inside `<script>`; `<` only occurs in strings,
/// where the unicode escape keeps the JSON value unchanged.
fn script_safe_json<T: serde::Serialize>(value: &T) -> serde_json::Result<String> {
    Ok(serde_json::to_string(value)?.replace('<', "\\u003c"))
}

#[instrument(skip(state))]
pub async fn dashboard_page(
    Query(query): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Response {
    let dashboard = state.dashboard();

    let (status, page) = match dashboard.render(&SelectionRequest::from(query)) {
        Ok(view) => match DashboardPage::from_view(view) {
            Ok(page) => (StatusCode::OK, page),
            Err(err) => {
                error!(%err, "Failed to serialize chart");
                return StatusCode::INTERNAL_SERVER_ERROR.into_response();
            }
        },
        Err(err) => {
            warn!(%err, "Dashboard render rejected");
            let page = DashboardPage::failed(
                compute::dashboard::DASHBOARD_TITLE,
                dashboard.products(),
                err.to_string(),
            );
            (StatusCode::NOT_FOUND, page)
        }
    };

    match page.render() {
        Ok(html) => (status, Html(html)).into_response(),
        Err(err) => {
            error!(%err, "Failed to render dashboard page");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use common::{ChartAxis, ChartFigure, ChartLayout, ChartTitle};

    fn view(product_id: &str) -> DashboardView {
        DashboardView {
            title: "Dashboard".to_string(),
            product_id: product_id.to_string(),
            products: vec!["P1".to_string(), "<b>P2</b>".to_string()],
            start_date: NaiveDate::from_ymd_opt(2023, 1, 1),
            end_date: None,
            historical_points: 0,
            chart: ChartFigure {
                data: Vec::new(),
                layout: ChartLayout {
                    title: ChartTitle {
                        text: "</script><script>alert(1)</script>".to_string(),
                    },
                    xaxis: ChartAxis::titled("Date"),
                    yaxis: ChartAxis::titled("Quantity Sold"),
                    hovermode: "x unified".to_string(),
                },
            },
            forecast_table: Vec::new(),
            accuracy: None,
        }
    }

    #[test]
    fn marks_selected_product_and_formats_dates() {
        let page = DashboardPage::from_view(view("P1")).unwrap();
        assert!(page.products[0].selected);
        assert!(!page.products[1].selected);
        assert_eq!(page.start_date, "2023-01-01");
        assert_eq!(page.end_date, "");
    }

    #[test]
    fn figure_json_cannot_close_the_script_tag() {
        let page = DashboardPage::from_view(view("P1")).unwrap();
        assert!(!page.figure_json.contains("</script>"));
        let parsed: serde_json::Value = serde_json::from_str(&page.figure_json).unwrap();
        assert_eq!(parsed["layout"]["title"]["text"], "</script><script>alert(1)</script>");
    }

    #[test]
    fn product_names_are_html_escaped() {
        let html = DashboardPage::from_view(view("P1")).unwrap().render().unwrap();
        assert!(!html.contains("<b>P2</b>"));
        assert!(html.contains("&lt;b&gt;P2&lt;/b&gt;"));
    }
}
