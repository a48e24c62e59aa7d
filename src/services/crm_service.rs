// src/services/crm_service.rs

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::{NoteRepository, ProjectRepository, TaskRepository, UserRepository},
    models::{
        lead::{Lead, LeadPatch, LeadStatus, LeadSummary},
        note::{CreateNotePayload, Note},
        task::{CreateTaskPayload, Task},
        user::User,
    },
    services::lifecycle,
};

const DEFAULT_LEAD_LIMIT: i64 = 200;
const MAX_LEAD_LIMIT: i64 = 500;

// Piso em 1: limit=0 (ou negativo) nunca chega ao SQL como LIMIT 0.
fn effective_lead_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LEAD_LIMIT).clamp(1, MAX_LEAD_LIMIT)
}

// A fachada do CRM: listagem/atualização de leads (com a automação de
// follow-up), notas, tarefas e o diretório de usuários.
#[derive(Clone)]
pub struct CrmService {
    projects: ProjectRepository,
    notes: NoteRepository,
    tasks: TaskRepository,
    users: UserRepository,
    pool: PgPool,
}

impl CrmService {
    pub fn new(
        projects: ProjectRepository,
        notes: NoteRepository,
        tasks: TaskRepository,
        users: UserRepository,
        pool: PgPool,
    ) -> Self {
        Self { projects, notes, tasks, users, pool }
    }

    // =========================================================================
    //  LEADS
    // =========================================================================

    pub async fn list_leads(
        &self,
        q: Option<&str>,
        status: Option<LeadStatus>,
        limit: Option<i64>,
    ) -> Result<Vec<LeadSummary>, AppError> {
        let limit = effective_lead_limit(limit);
        let q = q.map(str::trim).filter(|s| !s.is_empty());
        self.projects.list_leads(q, status, limit).await
    }

    /// PATCH parcial do lead. Lê o estado atual e grava na mesma transação:
    /// status e follow-up resolvido saem juntos, numa única escrita atômica.
    pub async fn update_lead(&self, id: Uuid, patch: &LeadPatch) -> Result<Lead, AppError> {
        let mut tx = self.pool.begin().await?;

        let (prev_status, prev_follow) = self
            .projects
            .lead_state(&mut *tx, id)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;

        // Transição real = veio status E é diferente do atual
        let status_changed = patch.status.is_some_and(|s| s != prev_status);
        let new_status = patch.status.unwrap_or(prev_status);

        // Hora de parede no momento em que a transição é processada
        let follow = lifecycle::resolve_next_follow_up(
            status_changed,
            patch.next_follow_up_at,
            prev_follow,
            new_status,
            Utc::now(),
        );

        let lead = self
            .projects
            .update_lead(&mut *tx, id, patch, follow)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;

        tx.commit().await?;

        Ok(lead)
    }

    /// Lead + notas (mais recentes primeiro) + tarefas (pendentes primeiro).
    pub async fn lead_detail(&self, id: Uuid) -> Result<(Lead, Vec<Note>, Vec<Task>), AppError> {
        let lead = self
            .projects
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Lead"))?;

        let notes = self.notes.list_by_lead(id).await?;
        let tasks = self.tasks.list_by_lead(id).await?;

        Ok((lead, notes, tasks))
    }

    // =========================================================================
    //  NOTAS E TAREFAS
    // =========================================================================

    /// Autor ausente = e-mail de quem está autenticado.
    pub async fn add_note(
        &self,
        payload: &CreateNotePayload,
        caller_email: &str,
    ) -> Result<Note, AppError> {
        let author = payload.author.as_deref().unwrap_or(caller_email);
        self.notes.create(payload.lead_id, author, &payload.body).await
    }

    pub async fn add_task(&self, payload: &CreateTaskPayload) -> Result<Task, AppError> {
        self.tasks
            .create(
                payload.lead_id,
                &payload.title,
                payload.notes.as_deref(),
                payload.due_at,
            )
            .await
    }

    pub async fn complete_task(&self, id: Uuid, completed: bool) -> Result<Task, AppError> {
        self.tasks
            .set_completed(id, completed)
            .await?
            .ok_or(AppError::NotFound("Tarefa"))
    }

    // =========================================================================
    //  DIRETÓRIO DE USUÁRIOS
    // =========================================================================

    pub async fn list_users(&self) -> Result<Vec<User>, AppError> {
        self.users.list().await
    }

    pub async fn create_user(&self, name: &str, email: Option<&str>) -> Result<User, AppError> {
        let email = email.map(str::trim).filter(|e| !e.is_empty());
        self.users.create(name.trim(), email).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lead_limit_defaults_to_200() {
        assert_eq!(effective_lead_limit(None), 200);
    }

    #[test]
    fn lead_limit_is_capped_at_500() {
        assert_eq!(effective_lead_limit(Some(500)), 500);
        assert_eq!(effective_lead_limit(Some(9999)), 500);
    }

    #[test]
    fn lead_limit_of_zero_or_less_is_promoted_to_one() {
        assert_eq!(effective_lead_limit(Some(0)), 1);
        assert_eq!(effective_lead_limit(Some(-7)), 1);
        assert_eq!(effective_lead_limit(Some(1)), 1);
    }
}
