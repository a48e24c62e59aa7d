// src/db/note_repo.rs

use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::note::Note};

#[derive(Clone)]
pub struct NoteRepository {
    pool: PgPool,
}

impl NoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, lead_id: Uuid, author: &str, body: &str) -> Result<Note, AppError> {
        let note = sqlx::query_as::<_, Note>(
            "INSERT INTO notes (lead_id, author, body) VALUES ($1, $2, $3) RETURNING *",
        )
        .bind(lead_id)
        .bind(author)
        .bind(body)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            // Lead inexistente cai na FK
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Lead");
                }
            }
            e.into()
        })?;

        Ok(note)
    }

    /// Notas do lead, da mais recente para a mais antiga.
    pub async fn list_by_lead(&self, lead_id: Uuid) -> Result<Vec<Note>, AppError> {
        let notes = sqlx::query_as::<_, Note>(
            "SELECT * FROM notes WHERE lead_id = $1 ORDER BY created_at DESC",
        )
        .bind(lead_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(notes)
    }
}
