// src/docs.rs

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::OpenApi;

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Estimate ---
        handlers::estimate::create_estimate,

        // --- Products ---
        handlers::products::get_catalog,

        // --- Projects (fluxo público do visualizador) ---
        handlers::projects::save_project,
        handlers::projects::list_projects,
        handlers::projects::get_project,
        handlers::projects::delete_project,

        // --- CRM ---
        handlers::leads::list_leads,
        handlers::leads::update_lead,
        handlers::leads::get_lead,
        handlers::notes::create_note,
        handlers::tasks::create_task,
        handlers::tasks::complete_task,
        handlers::users::list_users,
        handlers::users::create_user,
    ),
    components(
        schemas(
            // --- Estimate ---
            models::estimate::ProjectType,
            models::estimate::Quality,
            models::estimate::EstimateRequest,
            models::estimate::LineItem,
            models::estimate::EstimateRange,
            models::estimate::Estimate,

            // --- Products ---
            models::product::Unit,
            models::product::ProductItem,
            models::product::ProductCategory,
            models::product::ProductCatalog,
            models::product::SelectedProduct,

            // --- Leads / Projects ---
            models::lead::LeadStatus,
            models::lead::Lead,
            models::lead::LeadSummary,
            models::lead::LeadPatch,
            models::lead::SaveProjectPayload,

            // --- Notas / Tarefas / Usuários ---
            models::note::Note,
            models::note::CreateNotePayload,
            models::task::Task,
            models::task::CreateTaskPayload,
            models::task::CompleteTaskPayload,
            models::user::User,
            models::user::CreateUserPayload,

            // --- Respostas ---
            handlers::projects::ProjectResponse,
            handlers::projects::ProjectListResponse,
            handlers::leads::LeadListResponse,
            handlers::leads::LeadResponse,
            handlers::leads::LeadDetailResponse,
            handlers::notes::NoteResponse,
            handlers::tasks::TaskResponse,
            handlers::users::UserResponse,
            handlers::users::UserListResponse,
        )
    ),
    tags(
        (name = "Estimate", description = "Orçamento por template"),
        (name = "Products", description = "Catálogo de produtos do visualizador"),
        (name = "Projects", description = "Projetos salvos pelos clientes"),
        (name = "CRM", description = "Gestão de leads, notas, tarefas e equipe")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
