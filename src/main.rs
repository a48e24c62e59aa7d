// src/main.rs

use axum::{
    middleware as axum_middleware,
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;

use crate::config::AppState;
use crate::middleware::auth::admin_guard;

#[tokio::main]
async fn main() {
    // Inicializa o logger antes de qualquer coisa
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Superfície pública: orçamento, catálogo e projetos salvos
    let public_routes = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route("/estimate", post(handlers::estimate::create_estimate))
        .route("/products", get(handlers::products::get_catalog))
        .route(
            "/projects",
            post(handlers::projects::save_project).get(handlers::projects::list_projects),
        )
        .route(
            "/projects/{id}",
            get(handlers::projects::get_project).delete(handlers::projects::delete_project),
        );

    // CRM: tudo atrás do guard de identidade + allowlist
    let crm_routes = Router::new()
        .route(
            "/leads",
            get(handlers::leads::list_leads).patch(handlers::leads::update_lead),
        )
        .route("/leads/{id}", get(handlers::leads::get_lead))
        .route("/notes", post(handlers::notes::create_note))
        .route(
            "/tasks",
            post(handlers::tasks::create_task).patch(handlers::tasks::complete_task),
        )
        .route(
            "/users",
            get(handlers::users::list_users).post(handlers::users::create_user),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.auth_service.clone(),
            admin_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()))
        .nest("/api", public_routes)
        .nest("/api/crm", crm_routes)
        .with_state(app_state);

    // Inicia o servidor
    let addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:3000".to_owned());
    let listener = TcpListener::bind(&addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app).await.expect("Erro no servidor Axum");
}
