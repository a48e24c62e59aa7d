// src/handlers/notes.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::AuthenticatedStaff,
    models::note::{CreateNotePayload, Note},
};

#[derive(Serialize, ToSchema)]
pub struct NoteResponse {
    pub note: Note,
}

// POST /api/crm/notes
#[utoipa::path(
    post,
    path = "/api/crm/notes",
    tag = "CRM",
    request_body = CreateNotePayload,
    responses(
        (status = 201, description = "Nota criada", body = NoteResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_note(
    State(app_state): State<AppState>,
    AuthenticatedStaff(staff): AuthenticatedStaff,
    Json(payload): Json<CreateNotePayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let note = app_state.crm_service.add_note(&payload, &staff.email).await?;

    Ok((StatusCode::CREATED, Json(NoteResponse { note })))
}
