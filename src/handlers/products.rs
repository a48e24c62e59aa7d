// src/handlers/products.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::{config::AppState, models::product::ProductCatalog};

// GET /api/products
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "Catálogo de produtos", body = ProductCatalog)
    )
)]
pub async fn get_catalog(State(app_state): State<AppState>) -> impl IntoResponse {
    (StatusCode::OK, Json(app_state.catalog.as_ref().clone()))
}
