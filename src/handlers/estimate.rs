// src/handlers/estimate.rs

use axum::{http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::{
    common::error::AppError,
    models::estimate::{Estimate, EstimateRequest},
    services::estimate::build_estimate,
};

// POST /api/estimate
#[utoipa::path(
    post,
    path = "/api/estimate",
    tag = "Estimate",
    request_body = EstimateRequest,
    responses(
        (status = 200, description = "Orçamento calculado", body = Estimate),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn create_estimate(
    Json(payload): Json<EstimateRequest>,
) -> Result<impl IntoResponse, AppError> {
    // Rejeição total: payload fora da faixa não produz orçamento parcial
    payload.validate()?;

    // Depois de válido, o motor nunca falha — é função pura da entrada
    let estimate = build_estimate(&payload);

    Ok((StatusCode::OK, Json(estimate)))
}
