// src/db/project_repo.rs

use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::{
    common::error::AppError,
    models::lead::{Lead, LeadPatch, LeadStatus, LeadSummary, SaveProjectPayload},
};

// Colunas da projeção usada pela listagem do CRM
const SUMMARY_COLUMNS: &str = "id, created_at, lead_name, lead_email, lead_phone, lead_timeline, \
     project_type, style, quality, room_size_sqft, status, source, assigned_to, \
     next_follow_up_at, last_contacted_at, estimate";

// O repositório de projetos/leads — a tabela 'projects' serve aos dois fluxos:
// o visualizador público (salvar/listar/excluir) e o CRM (filtrar/atualizar).
#[derive(Clone)]
pub struct ProjectRepository {
    pool: PgPool,
}

impl ProjectRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    // =========================================================================
    //  FLUXO PÚBLICO (projetos salvos pelo visualizador)
    // =========================================================================

    /// Upsert do projeto inteiro. Id presente = re-salvar o mesmo projeto;
    /// os campos do CRM (status, atribuição, follow-up) não são tocados aqui.
    pub async fn upsert_project(&self, payload: &SaveProjectPayload) -> Result<Lead, AppError> {
        let id = payload.id.unwrap_or_else(Uuid::new_v4);
        let room_size = payload.room_size_sqft.round() as i32;

        let lead = sqlx::query_as::<_, Lead>(
            r#"
            INSERT INTO projects (
                id, lead_name, lead_email, lead_phone, lead_address, lead_timeline,
                project_type, style, quality, room_size_sqft, description,
                selected_products, images, variants, estimate, source
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (id) DO UPDATE SET
                updated_at = NOW(),
                lead_name = EXCLUDED.lead_name,
                lead_email = EXCLUDED.lead_email,
                lead_phone = EXCLUDED.lead_phone,
                lead_address = EXCLUDED.lead_address,
                lead_timeline = EXCLUDED.lead_timeline,
                project_type = EXCLUDED.project_type,
                style = EXCLUDED.style,
                quality = EXCLUDED.quality,
                room_size_sqft = EXCLUDED.room_size_sqft,
                description = EXCLUDED.description,
                selected_products = EXCLUDED.selected_products,
                images = EXCLUDED.images,
                variants = EXCLUDED.variants,
                estimate = EXCLUDED.estimate
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&payload.name)
        .bind(&payload.email)
        .bind(&payload.phone)
        .bind(&payload.address)
        .bind(&payload.timeline)
        .bind(payload.project_type.as_str())
        .bind(&payload.style)
        .bind(payload.quality.as_str())
        .bind(room_size)
        .bind(&payload.description)
        .bind(Json(&payload.selected_products))
        .bind(Json(&payload.images))
        .bind(Json(&payload.variants))
        .bind(payload.estimate.as_ref().map(Json))
        .bind(&payload.source)
        .fetch_one(&self.pool)
        .await?;

        Ok(lead)
    }

    pub async fn list_projects(&self, limit: i64) -> Result<Vec<Lead>, AppError> {
        let projects = sqlx::query_as::<_, Lead>(
            "SELECT * FROM projects ORDER BY created_at DESC LIMIT $1",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(projects)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Lead>, AppError> {
        let project = sqlx::query_as::<_, Lead>("SELECT * FROM projects WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(project)
    }

    /// Exclusão só existe no fluxo público; o CRM nunca apaga lead.
    pub async fn delete(&self, id: Uuid) -> Result<u64, AppError> {
        let result = sqlx::query("DELETE FROM projects WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    // =========================================================================
    //  FLUXO DO CRM
    // =========================================================================

    /// Listagem com filtro livre (nome/e-mail/telefone), filtro de status e
    /// limite — sempre do mais novo para o mais antigo.
    pub async fn list_leads(
        &self,
        q: Option<&str>,
        status: Option<LeadStatus>,
        limit: i64,
    ) -> Result<Vec<LeadSummary>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new(format!(
            "SELECT {SUMMARY_COLUMNS} FROM projects WHERE TRUE"
        ));

        if let Some(status) = status {
            qb.push(" AND status = ").push_bind(status.as_str());
        }
        if let Some(q) = q {
            let pattern = format!("%{q}%");
            qb.push(" AND (lead_name ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR lead_email ILIKE ")
                .push_bind(pattern.clone())
                .push(" OR lead_phone ILIKE ")
                .push_bind(pattern)
                .push(")");
        }
        qb.push(" ORDER BY created_at DESC LIMIT ").push_bind(limit);

        let leads = qb
            .build_query_as::<LeadSummary>()
            .fetch_all(&self.pool)
            .await?;

        Ok(leads)
    }

    /// Estado mínimo para a decisão de follow-up (dentro da transação do update).
    pub async fn lead_state(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
    ) -> Result<Option<(LeadStatus, Option<DateTime<Utc>>)>, AppError> {
        let row = sqlx::query_as::<_, (String, Option<DateTime<Utc>>)>(
            "SELECT status, next_follow_up_at FROM projects WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some((status, follow)) => {
                let status = LeadStatus::try_from(status)
                    .map_err(|e| AppError::InternalServerError(anyhow::anyhow!(e)))?;
                Ok(Some((status, follow)))
            }
            None => Ok(None),
        }
    }

    /// UPDATE parcial: só grava o que veio no patch (+ o follow-up resolvido).
    /// Uma única operação atômica — status e follow-up andam juntos.
    pub async fn update_lead(
        &self,
        conn: &mut PgConnection,
        id: Uuid,
        patch: &LeadPatch,
        follow: Option<DateTime<Utc>>,
    ) -> Result<Option<Lead>, AppError> {
        let mut qb = QueryBuilder::<Postgres>::new("UPDATE projects SET updated_at = NOW()");

        if let Some(status) = patch.status {
            qb.push(", status = ").push_bind(status.as_str());
        }
        if let Some(assigned_to) = patch.assigned_to {
            qb.push(", assigned_to = ").push_bind(assigned_to);
        }
        if let Some(follow) = follow {
            qb.push(", next_follow_up_at = ").push_bind(follow);
        }
        if let Some(last_contacted_at) = patch.last_contacted_at {
            qb.push(", last_contacted_at = ").push_bind(last_contacted_at);
        }
        if let Some(tags) = &patch.tags {
            qb.push(", tags = ").push_bind(tags.clone());
        }

        qb.push(" WHERE id = ").push_bind(id);
        qb.push(" RETURNING *");

        let lead = qb
            .build_query_as::<Lead>()
            .fetch_optional(&mut *conn)
            .await?;

        Ok(lead)
    }
}
