// src/handlers/users.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::user::{CreateUserPayload, User},
};

#[derive(Serialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Serialize, ToSchema)]
pub struct UserListResponse {
    pub users: Vec<User>,
}

// GET /api/crm/users
#[utoipa::path(
    get,
    path = "/api/crm/users",
    tag = "CRM",
    responses(
        (status = 200, description = "Diretório da equipe", body = UserListResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_users(State(app_state): State<AppState>) -> Result<impl IntoResponse, AppError> {
    let users = app_state.crm_service.list_users().await?;

    Ok((StatusCode::OK, Json(UserListResponse { users })))
}

// POST /api/crm/users
#[utoipa::path(
    post,
    path = "/api/crm/users",
    tag = "CRM",
    request_body = CreateUserPayload,
    responses(
        (status = 201, description = "Usuário criado", body = UserResponse),
        (status = 400, description = "Dados inválidos")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_user(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateUserPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let user = app_state
        .crm_service
        .create_user(&payload.name, payload.email.as_deref())
        .await?;

    Ok((StatusCode::CREATED, Json(UserResponse { user })))
}
