// src/services/auth.rs

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};

use crate::{
    common::error::AppError,
    models::{auth::Claims, tenancy::Tenant, users::User},
};

const TOKEN_TTL_DAYS: i64 = 7;

#[derive(Clone)]
pub struct AuthService {
    // Sem segredo configurado o Authorization é ignorado (modo demonstração)
    jwt_secret: Option<String>,
}

impl AuthService {
    pub fn new(jwt_secret: Option<String>) -> Self {
        Self {
            jwt_secret: jwt_secret.filter(|s| !s.is_empty()),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.jwt_secret.is_some()
    }

    /// `Ok(None)` quando a autenticação está desligada.
    pub fn validate_token(&self, token: &str) -> Result<Option<Claims>, AppError> {
        let Some(secret) = &self.jwt_secret else {
            return Ok(None);
        };

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(secret.as_ref()),
            &Validation::default(),
        )
        .map_err(|_| AppError::InvalidToken)?;

        Ok(Some(token_data.claims))
    }

    pub fn create_token(
        &self,
        user: &User,
        tenant: Option<&Tenant>,
    ) -> Result<(String, DateTime<Utc>), AppError> {
        let secret = self
            .jwt_secret
            .as_ref()
            .ok_or_else(|| AppError::BadRequest("autenticação não configurada".into()))?;

        let now = Utc::now();
        let expires_at = now + Duration::days(TOKEN_TTL_DAYS);

        let claims = Claims {
            sub: user.id,
            name: user.name.clone(),
            avatar_url: user.avatar_url.clone(),
            tenant_id: tenant.map(|t| t.id.clone()),
            tenant_schema: tenant.map(|t| t.schema.clone()),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_ref()),
        )?;
        Ok((token, expires_at))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn user() -> User {
        User {
            id: Uuid::new_v4(),
            name: "Marcus Lee".into(),
            avatar_url: None,
        }
    }

    #[test]
    fn issued_token_round_trips_claims() {
        let auth = AuthService::new(Some("secret".into()));
        let tenant = Tenant::parse("acme", Some("acme_schema")).expect("tenant");
        let user = user();

        let (token, _) = auth.create_token(&user, Some(&tenant)).expect("token");
        let claims = auth.validate_token(&token).expect("valid").expect("claims");

        assert_eq!(claims.user(), user);
        assert_eq!(claims.tenant_id.as_deref(), Some("acme"));
        assert_eq!(claims.tenant_schema.as_deref(), Some("acme_schema"));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let issuer = AuthService::new(Some("one".into()));
        let verifier = AuthService::new(Some("two".into()));
        let (token, _) = issuer.create_token(&user(), None).expect("token");

        assert!(matches!(
            verifier.validate_token(&token),
            Err(AppError::InvalidToken)
        ));
    }

    #[test]
    fn disabled_auth_ignores_tokens() {
        let auth = AuthService::new(None);
        assert!(!auth.is_enabled());
        assert!(auth.validate_token("garbage").expect("ignored").is_none());
    }
}
