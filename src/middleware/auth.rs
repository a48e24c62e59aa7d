// src/middleware/auth.rs

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::AppError,
    services::auth::{AuthService, StaffIdentity},
};

// Guarda das rotas do CRM: Bearer -> identidade -> allowlist. Quem não
// passa recebe 401/403 aqui e nunca chega ao handler.
pub async fn admin_guard(
    State(auth): State<AuthService>,
    bearer: Option<TypedHeader<Authorization<Bearer>>>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    let TypedHeader(Authorization(bearer)) = bearer.ok_or(AppError::InvalidToken)?;
    let identity = auth.validate_token(bearer.token())?;

    // Insere a identidade nos "extensions" da requisição
    request.extensions_mut().insert(identity);
    Ok(next.run(request).await)
}

// Extrator para obter a identidade autenticada diretamente nos handlers
pub struct AuthenticatedStaff(pub StaffIdentity);

impl<S> FromRequestParts<S> for AuthenticatedStaff
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<StaffIdentity>()
            .cloned()
            .map(AuthenticatedStaff)
            .ok_or(AppError::InvalidToken)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{
        atomic::{AtomicUsize, Ordering},
        Arc,
    };

    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode},
        middleware as axum_middleware,
        routing::get,
        Router,
    };
    use http_body_util::BodyExt as _;
    use tower::ServiceExt as _;

    use super::*;

    // Router mínimo: o contador faz o papel da lógica de negócio/do store —
    // requisição barrada não pode incrementá-lo.
    fn app(auth: AuthService, calls: Arc<AtomicUsize>) -> Router {
        Router::new()
            .route(
                "/api/crm/users",
                get(move || {
                    let calls = calls.clone();
                    async move {
                        calls.fetch_add(1, Ordering::SeqCst);
                        "ok"
                    }
                }),
            )
            .layer(axum_middleware::from_fn_with_state(auth, admin_guard))
    }

    fn auth_service() -> AuthService {
        AuthService::new(
            "segredo-de-teste".to_owned(),
            vec!["ana@empresa.com".to_owned()],
        )
    }

    #[tokio::test]
    async fn missing_token_is_rejected_before_business_logic() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = app(auth_service(), calls.clone());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/crm/users")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);

        // A recusa carrega o corpo de erro padrão, não uma resposta vazia
        let body = response.into_body().collect().await.unwrap().to_bytes();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["error"], "Token de autenticação inválido ou ausente.");
    }

    #[tokio::test]
    async fn invalid_token_is_rejected_before_business_logic() {
        let calls = Arc::new(AtomicUsize::new(0));
        let app = app(auth_service(), calls.clone());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/crm/users")
                    .header("Authorization", "Bearer lixo")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn off_allowlist_token_is_forbidden_before_business_logic() {
        let auth = auth_service();
        let token = auth.create_token("intruso@outra.com");
        let calls = Arc::new(AtomicUsize::new(0));
        let app = app(auth, calls.clone());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/crm/users")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn allowed_token_reaches_the_handler() {
        let auth = auth_service();
        let token = auth.create_token("ana@empresa.com");
        let calls = Arc::new(AtomicUsize::new(0));
        let app = app(auth, calls.clone());

        let response = app
            .oneshot(
                HttpRequest::builder()
                    .uri("/api/crm/users")
                    .header("Authorization", format!("Bearer {token}"))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
