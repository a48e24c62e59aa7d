// src/handlers/leads.rs

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    config::AppState,
    models::{
        lead::{Lead, LeadPatch, LeadQueryParams, LeadSummary},
        note::Note,
        task::Task,
    },
};

#[derive(Serialize, ToSchema)]
pub struct LeadListResponse {
    pub leads: Vec<LeadSummary>,
}

#[derive(Serialize, ToSchema)]
pub struct LeadResponse {
    pub lead: Lead,
}

#[derive(Serialize, ToSchema)]
pub struct LeadDetailResponse {
    pub lead: Lead,
    pub notes: Vec<Note>,
    pub tasks: Vec<Task>,
}

// GET /api/crm/leads
#[utoipa::path(
    get,
    path = "/api/crm/leads",
    tag = "CRM",
    params(
        ("q" = Option<String>, Query, description = "Busca livre: nome / e-mail / telefone"),
        ("status" = Option<String>, Query, description = "Filtro por status do funil"),
        ("limit" = Option<i64>, Query, description = "Padrão 200, máximo 500")
    ),
    responses(
        (status = 200, description = "Leads, mais recentes primeiro", body = LeadListResponse)
    ),
    security(("api_jwt" = []))
)]
pub async fn list_leads(
    State(app_state): State<AppState>,
    Query(params): Query<LeadQueryParams>,
) -> Result<impl IntoResponse, AppError> {
    let leads = app_state
        .crm_service
        .list_leads(params.q.as_deref(), params.status, params.limit)
        .await?;

    Ok((StatusCode::OK, Json(LeadListResponse { leads })))
}

// PATCH /api/crm/leads
#[utoipa::path(
    patch,
    path = "/api/crm/leads",
    tag = "CRM",
    request_body = LeadPatch,
    responses(
        (status = 200, description = "Lead atualizado (com follow-up automático quando couber)", body = LeadResponse),
        (status = 400, description = "Corpo sem o campo id"),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn update_lead(
    State(app_state): State<AppState>,
    Json(payload): Json<LeadPatch>,
) -> Result<impl IntoResponse, AppError> {
    // Sem id não há o que atualizar: 400 antes de qualquer acesso ao banco
    let id = payload.id.ok_or(AppError::MissingField("id"))?;

    let lead = app_state.crm_service.update_lead(id, &payload).await?;

    Ok((StatusCode::OK, Json(LeadResponse { lead })))
}

// GET /api/crm/leads/{id}
#[utoipa::path(
    get,
    path = "/api/crm/leads/{id}",
    tag = "CRM",
    params(("id" = Uuid, Path, description = "ID do lead")),
    responses(
        (status = 200, description = "Lead + notas + tarefas", body = LeadDetailResponse),
        (status = 404, description = "Lead não encontrado")
    ),
    security(("api_jwt" = []))
)]
pub async fn get_lead(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse, AppError> {
    let (lead, notes, tasks) = app_state.crm_service.lead_detail(id).await?;

    Ok((StatusCode::OK, Json(LeadDetailResponse { lead, notes, tasks })))
}
