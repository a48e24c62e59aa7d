// src/models/lead.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::estimate::{Estimate, ProjectType, Quality};
use crate::models::product::SelectedProduct;

// --- STATUS (as 7 colunas do Kanban) ---

// Não há grafo de transição: a equipe move o lead livremente. O status só
// alimenta o agrupamento das views e a política de follow-up automático.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum LeadStatus {
    #[default]
    New,
    Contacted,
    Qualified,
    #[serde(rename = "Estimate Sent")]
    EstimateSent,
    Scheduled,
    Won,
    Lost,
}

impl LeadStatus {
    pub const ALL: [LeadStatus; 7] = [
        LeadStatus::New,
        LeadStatus::Contacted,
        LeadStatus::Qualified,
        LeadStatus::EstimateSent,
        LeadStatus::Scheduled,
        LeadStatus::Won,
        LeadStatus::Lost,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LeadStatus::New => "New",
            LeadStatus::Contacted => "Contacted",
            LeadStatus::Qualified => "Qualified",
            LeadStatus::EstimateSent => "Estimate Sent",
            LeadStatus::Scheduled => "Scheduled",
            LeadStatus::Won => "Won",
            LeadStatus::Lost => "Lost",
        }
    }
}

impl TryFrom<String> for LeadStatus {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "New" => Ok(LeadStatus::New),
            "Contacted" => Ok(LeadStatus::Contacted),
            "Qualified" => Ok(LeadStatus::Qualified),
            "Estimate Sent" => Ok(LeadStatus::EstimateSent),
            "Scheduled" => Ok(LeadStatus::Scheduled),
            "Won" => Ok(LeadStatus::Won),
            "Lost" => Ok(LeadStatus::Lost),
            other => Err(format!("status desconhecido: {other}")),
        }
    }
}

// --- O REGISTRO COMPLETO ---

// A linha de `projects` inteira: o projeto salvo pelo cliente E o lead que o
// CRM gerencia são o mesmo registro.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    pub lead_name: Option<String>,
    pub lead_email: Option<String>,
    pub lead_phone: Option<String>,
    pub lead_address: Option<String>,
    pub lead_timeline: Option<String>,
    pub description: Option<String>,

    #[sqlx(try_from = "String")]
    pub project_type: ProjectType,
    pub style: Option<String>,
    #[sqlx(try_from = "String")]
    pub quality: Quality,
    pub room_size_sqft: i32,

    #[schema(value_type = Vec<SelectedProduct>)]
    pub selected_products: Json<Vec<SelectedProduct>>,
    #[schema(value_type = Vec<String>)]
    pub images: Json<Vec<String>>,
    #[schema(value_type = Vec<String>)]
    pub variants: Json<Vec<String>>,
    #[schema(value_type = Option<Estimate>)]
    pub estimate: Option<Json<Estimate>>,

    #[sqlx(try_from = "String")]
    pub status: LeadStatus,
    pub source: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub next_follow_up_at: Option<DateTime<Utc>>,
    pub last_contacted_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

// Projeção enxuta para a listagem do CRM (a view não precisa das mídias
// nem dos produtos selecionados).
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadSummary {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub lead_name: Option<String>,
    pub lead_email: Option<String>,
    pub lead_phone: Option<String>,
    pub lead_timeline: Option<String>,
    #[sqlx(try_from = "String")]
    pub project_type: ProjectType,
    pub style: Option<String>,
    #[sqlx(try_from = "String")]
    pub quality: Quality,
    pub room_size_sqft: i32,
    #[sqlx(try_from = "String")]
    pub status: LeadStatus,
    pub source: Option<String>,
    pub assigned_to: Option<Uuid>,
    pub next_follow_up_at: Option<DateTime<Utc>>,
    pub last_contacted_at: Option<DateTime<Utc>>,
    #[schema(value_type = Option<Estimate>)]
    pub estimate: Option<Json<Estimate>>,
}

// --- PAYLOADS ---

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadQueryParams {
    /// Busca livre sobre nome / e-mail / telefone.
    pub q: Option<String>,
    pub status: Option<LeadStatus>,
    /// Padrão 200, teto rígido 500.
    pub limit: Option<i64>,
}

// PATCH parcial: campo ausente = não mexe. O follow-up explícito sempre
// vence a automação (ver services/lifecycle.rs).
#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeadPatch {
    /// Obrigatório na prática; opcional aqui para o handler responder 400
    /// (e não o 422 genérico de desserialização) quando faltar.
    pub id: Option<Uuid>,
    pub status: Option<LeadStatus>,
    pub assigned_to: Option<Uuid>,
    pub next_follow_up_at: Option<DateTime<Utc>>,
    pub last_contacted_at: Option<DateTime<Utc>>,
    pub tags: Option<Vec<String>>,
}

// POST /api/projects — o visualizador salva (ou re-salva) o projeto inteiro.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SaveProjectPayload {
    /// Presente = upsert do mesmo projeto.
    pub id: Option<Uuid>,

    #[validate(length(min = 1, message = "required"))]
    pub name: String,
    #[validate(email(message = "invalid_email"))]
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub timeline: Option<String>,

    pub project_type: ProjectType,
    pub style: Option<String>,
    #[serde(default)]
    pub quality: Quality,
    #[validate(range(min = 1.0, max = 10000.0, message = "roomSizeSqft must be between 1 and 10000"))]
    pub room_size_sqft: f64,
    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub selected_products: Vec<SelectedProduct>,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub variants: Vec<String>,
    pub estimate: Option<Estimate>,
    pub source: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for st in LeadStatus::ALL {
            assert_eq!(LeadStatus::try_from(st.as_str().to_owned()).unwrap(), st);
        }
        assert!(LeadStatus::try_from("Archived".to_owned()).is_err());
    }

    #[test]
    fn estimate_sent_keeps_the_space_on_the_wire() {
        assert_eq!(
            serde_json::to_string(&LeadStatus::EstimateSent).unwrap(),
            "\"Estimate Sent\""
        );
        let st: LeadStatus = serde_json::from_str("\"Estimate Sent\"").unwrap();
        assert_eq!(st, LeadStatus::EstimateSent);
    }

    #[test]
    fn new_is_the_default_status() {
        assert_eq!(LeadStatus::default(), LeadStatus::New);
    }
}
