// src/models/note.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

// Notas são append-only: depois de criadas, nunca mudam.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: Uuid,
    pub lead_id: Uuid,
    pub author: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateNotePayload {
    pub lead_id: Uuid,

    /// Ausente = usa o e-mail de quem está autenticado.
    pub author: Option<String>,

    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Ligou pedindo visita técnica na quinta.")]
    pub body: String,
}
