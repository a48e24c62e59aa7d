// src/handlers/tasks.rs

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Serialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    common::error::AppError,
    config::AppState,
    models::task::{CompleteTaskPayload, CreateTaskPayload, Task},
};

#[derive(Serialize, ToSchema)]
pub struct TaskResponse {
    pub task: Task,
}

// POST /api/crm/tasks
#[utoipa::path(
    post,
    path = "/api/crm/tasks",
    tag = "CRM",
    request_body = CreateTaskPayload,
    responses(
        (status = 201, description = "Tarefa criada", body = TaskResponse),
        (status = 400, description = "Dados inválidos"),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn create_task(
    State(app_state): State<AppState>,
    Json(payload): Json<CreateTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    payload.validate()?;

    let task = app_state.crm_service.add_task(&payload).await?;

    Ok((StatusCode::CREATED, Json(TaskResponse { task })))
}

// PATCH /api/crm/tasks
#[utoipa::path(
    patch,
    path = "/api/crm/tasks",
    tag = "CRM",
    request_body = CompleteTaskPayload,
    responses(
        (status = 200, description = "Tarefa atualizada", body = TaskResponse),
        (status = 404, description = "Tarefa não encontrada")
    ),
    security(("api_jwt" = []))
)]
pub async fn complete_task(
    State(app_state): State<AppState>,
    Json(payload): Json<CompleteTaskPayload>,
) -> Result<impl IntoResponse, AppError> {
    let task = app_state
        .crm_service
        .complete_task(payload.id, payload.completed)
        .await?;

    Ok((StatusCode::OK, Json(TaskResponse { task })))
}
