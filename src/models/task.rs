// src/models/task.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub title: String,
    pub notes: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskPayload {
    pub lead_id: Uuid,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Enviar proposta revisada")]
    pub title: String,

    pub notes: Option<String>,
    pub due_at: Option<DateTime<Utc>>,
}

// A única mutação permitida depois de criada é o flag de conclusão.
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CompleteTaskPayload {
    pub id: Uuid,
    #[serde(default)]
    pub completed: bool,
}
