// src/handlers/projects.rs

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use serde_json::json;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::lead::{Lead, SaveProjectPayload},
};

#[derive(Serialize, ToSchema)]
pub struct ProjectResponse {
    pub project: Lead,
}

#[derive(Serialize, ToSchema)]
pub struct ProjectListResponse {
    pub projects: Vec<Lead>,
}

// POST /api/projects
#[utoipa::path(
    post,
    path = "/api/projects",
    tag = "Projects",
    request_body = SaveProjectPayload,
    responses(
        (status = 201, description = "Projeto salvo (upsert)", body = ProjectResponse),
        (status = 400, description = "Dados inválidos")
    )
)]
pub async fn save_project(
    State(app_state): State<AppState>,
    Json(payload): Json<SaveProjectPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let project = app_state.project_service.save_project(&payload).await?;

    Ok((StatusCode::CREATED, Json(ProjectResponse { project })))
}

// GET /api/projects
#[utoipa::path(
    get,
    path = "/api/projects",
    tag = "Projects",
    responses(
        (status = 200, description = "Projetos salvos, mais recentes primeiro", body = ProjectListResponse)
    )
)]
pub async fn list_projects(
    State(app_state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let projects = app_state.project_service.list_projects().await?;

    Ok((StatusCode::OK, Json(ProjectListResponse { projects })))
}

// GET /api/projects/{id}
#[utoipa::path(
    get,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Projeto", body = ProjectResponse),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn get_project(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let project = app_state.project_service.get_project(id).await?;

    Ok((StatusCode::OK, Json(ProjectResponse { project })))
}

// DELETE /api/projects/{id}
#[utoipa::path(
    delete,
    path = "/api/projects/{id}",
    tag = "Projects",
    params(("id" = Uuid, Path, description = "ID do projeto")),
    responses(
        (status = 200, description = "Projeto excluído"),
        (status = 404, description = "Não encontrado")
    )
)]
pub async fn delete_project(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    app_state.project_service.delete_project(id).await?;

    Ok((StatusCode::OK, Json(json!({ "ok": true }))))
}
