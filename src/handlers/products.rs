use axum::{extract::State, response::Json};
use tracing::{debug, instrument};
use crate::schemas::{ApiResponse, AppState};

#[allow(unused_imports)]
use common::ProductsResponse;

/// List the selectable products
///
/// Products come from the forecast data only, sorted and without duplicates.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    tag = "products",
    responses(
        (status = 200, description = "Products retrieved successfully", body = ProductsResponse)
    )
)]
#[instrument(skip(state))]
pub async fn get_products(State(state): State<AppState>) -> Json<ApiResponse<Vec<String>>> {
    let products = state.dashboard().products();
    debug!(count = products.len(), "Listing products");

    Json(ApiResponse::ok(products, "Products retrieved successfully"))
}
