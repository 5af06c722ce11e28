use axum::{
    extract::{Query, State},
    response::Json,
};
use common::DashboardView;
use compute::SelectionRequest;
use tracing::{instrument, warn};
use crate::schemas::{compute_error, ApiError, ApiResponse, AppState, DashboardQuery};

// Referenced by the OpenAPI annotations below.
#[allow(unused_imports)]
use {common::DashboardResponse, crate::schemas::ErrorResponse};

/// Render the dashboard for a selection
///
/// Returns the chart description (Plotly JSON), the forecast table and, when
/// the historical data carries `actual_quantity`, the accuracy report.
#[utoipa::path(
    get,
    path = "/api/v1/dashboard",
    tag = "dashboard",
    params(DashboardQuery),
    responses(
        (status = 200, description = "Dashboard rendered successfully", body = DashboardResponse),
        (status = 400, description = "Malformed query parameters"),
        (status = 404, description = "Unknown product or no products available", body = ErrorResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_dashboard(
    Query(query): Query<DashboardQuery>,
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<DashboardView>>, ApiError> {
    let request = SelectionRequest::from(query);

    let view = state.dashboard().render(&request).map_err(|err| {
        warn!(%err, "Dashboard render rejected");
        compute_error(err)
    })?;

    Ok(Json(ApiResponse::ok(view, "Dashboard rendered successfully")))
}
