// src/services/project_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::ProjectRepository,
    models::lead::{Lead, SaveProjectPayload},
};

const PROJECT_LIST_LIMIT: i64 = 100;

// O fluxo público do visualizador: salvar, listar, abrir e excluir projetos.
// Todo projeto salvo nasce como lead de status 'New' para o CRM.
#[derive(Clone)]
pub struct ProjectService {
    repo: ProjectRepository,
}

impl ProjectService {
    pub fn new(repo: ProjectRepository) -> Self {
        Self { repo }
    }

    pub async fn save_project(&self, payload: &SaveProjectPayload) -> Result<Lead, AppError> {
        self.repo.upsert_project(payload).await
    }

    pub async fn list_projects(&self) -> Result<Vec<Lead>, AppError> {
        self.repo.list_projects(PROJECT_LIST_LIMIT).await
    }

    pub async fn get_project(&self, id: Uuid) -> Result<Lead, AppError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or(AppError::NotFound("Projeto"))
    }

    pub async fn delete_project(&self, id: Uuid) -> Result<(), AppError> {
        let deleted = self.repo.delete(id).await?;
        if deleted == 0 {
            return Err(AppError::NotFound("Projeto"));
        }
        Ok(())
    }
}
