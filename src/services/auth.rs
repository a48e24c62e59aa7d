// src/services/auth.rs
//
// Validação de identidade da equipe: token Bearer (JWT) -> e-mail, seguida
// da checagem na lista de permissão. Não toca no banco — o diretório de
// usuários do CRM é outra coisa (alvos de atribuição de lead).

use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::common::error::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// E-mail de quem está autenticado.
    pub sub: String,
    pub exp: usize,
    pub iat: usize,
}

/// Identidade já validada e autorizada, injetada nas extensions da requisição.
#[derive(Debug, Clone)]
pub struct StaffIdentity {
    pub email: String,
}

#[derive(Clone)]
pub struct AuthService {
    jwt_secret: String,
    // E-mails normalizados em minúsculas; vazia = qualquer identidade válida entra
    allowlist: Vec<String>,
}

impl AuthService {
    pub fn new(jwt_secret: String, allowlist: Vec<String>) -> Self {
        let allowlist = allowlist
            .into_iter()
            .map(|e| e.trim().to_lowercase())
            .filter(|e| !e.is_empty())
            .collect();
        Self { jwt_secret, allowlist }
    }

    /// Token -> identidade autorizada. Falha de assinatura/expiração = 401;
    /// identidade válida fora da lista = 403. Nada de banco aqui: quem não
    /// passa nunca chega à lógica de negócio.
    pub fn validate_token(&self, token: &str) -> Result<StaffIdentity, AppError> {
        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        let email = token_data.claims.sub.to_lowercase();

        if !self.allowlist.is_empty() && !self.allowlist.contains(&email) {
            return Err(AppError::EmailNotAllowed);
        }

        Ok(StaffIdentity { email })
    }

    #[cfg(test)]
    pub(crate) fn create_token(&self, email: &str) -> String {
        let now = chrono::Utc::now();
        let claims = Claims {
            sub: email.to_owned(),
            exp: (now + chrono::Duration::days(7)).timestamp() as usize,
            iat: now.timestamp() as usize,
        };
        jsonwebtoken::encode(
            &jsonwebtoken::Header::default(),
            &claims,
            &jsonwebtoken::EncodingKey::from_secret(self.jwt_secret.as_ref()),
        )
        .expect("token de teste")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn service(allowlist: &[&str]) -> AuthService {
        AuthService::new(
            "segredo-de-teste".to_owned(),
            allowlist.iter().map(|s| (*s).to_owned()).collect(),
        )
    }

    #[test]
    fn valid_token_on_allowlist_passes() {
        let svc = service(&["ana@empresa.com"]);
        let token = svc.create_token("Ana@Empresa.com");
        let identity = svc.validate_token(&token).unwrap();
        assert_eq!(identity.email, "ana@empresa.com");
    }

    #[test]
    fn valid_token_off_allowlist_is_forbidden() {
        let svc = service(&["ana@empresa.com"]);
        let token = svc.create_token("intruso@outra.com");
        assert!(matches!(
            svc.validate_token(&token),
            Err(AppError::EmailNotAllowed)
        ));
    }

    #[test]
    fn empty_allowlist_admits_any_valid_identity() {
        let svc = service(&[]);
        let token = svc.create_token("qualquer@um.com");
        assert!(svc.validate_token(&token).is_ok());
    }

    #[test]
    fn garbage_token_is_unauthorized() {
        let svc = service(&["ana@empresa.com"]);
        assert!(matches!(
            svc.validate_token("nao-e-um-jwt"),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let svc = service(&[]);
        let other = AuthService::new("outro-segredo".to_owned(), vec![]);
        let token = other.create_token("ana@empresa.com");
        assert!(matches!(
            svc.validate_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn allowlist_entries_are_normalized() {
        let svc = service(&["  ANA@Empresa.com ", ""]);
        let token = svc.create_token("ana@empresa.com");
        assert!(svc.validate_token(&token).is_ok());
    }
}
