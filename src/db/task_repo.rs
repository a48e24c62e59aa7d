// src/db/task_repo.rs

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::{common::error::AppError, models::task::Task};

#[derive(Clone)]
pub struct TaskRepository {
    pool: PgPool,
}

impl TaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        lead_id: Uuid,
        title: &str,
        notes: Option<&str>,
        due_at: Option<DateTime<Utc>>,
    ) -> Result<Task, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "INSERT INTO tasks (lead_id, title, notes, due_at) VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(lead_id)
        .bind(title)
        .bind(notes)
        .bind(due_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_foreign_key_violation() {
                    return AppError::NotFound("Lead");
                }
            }
            e.into()
        })?;

        Ok(task)
    }

    /// Depois de criada, só o flag de conclusão muda.
    pub async fn set_completed(&self, id: Uuid, completed: bool) -> Result<Option<Task>, AppError> {
        let task = sqlx::query_as::<_, Task>(
            "UPDATE tasks SET completed = $2 WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(completed)
        .fetch_optional(&self.pool)
        .await?;

        Ok(task)
    }

    /// Tarefas do lead: pendentes primeiro, depois por vencimento.
    pub async fn list_by_lead(&self, lead_id: Uuid) -> Result<Vec<Task>, AppError> {
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT * FROM tasks WHERE lead_id = $1 ORDER BY completed ASC, due_at ASC NULLS LAST",
        )
        .bind(lead_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(tasks)
    }
}
