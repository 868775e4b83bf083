// src/middleware/auth.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
    RequestPartsExt,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};

use crate::{
    common::error::AppError,
    config::AppState,
    db::mock::fixtures::demo_user,
    models::{auth::Claims, users::User},
};

// Claims já validadas nesta requisição (SessionUser e TenantContext leem o
// mesmo token; validamos uma vez só).
#[derive(Clone)]
struct ResolvedClaims(Option<Claims>);

/// Claims do bearer token, se houver um token válido.
///
/// Sem `JWT_SECRET` configurado o cabeçalho é ignorado e o resultado é
/// sempre `None`. Token presente mas inválido => `INVALID_TOKEN`.
pub async fn session_claims<S>(parts: &mut Parts, state: &S) -> Result<Option<Claims>, AppError>
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    if let Some(resolved) = parts.extensions.get::<ResolvedClaims>() {
        return Ok(resolved.0.clone());
    }

    let app_state = AppState::from_ref(state);
    let claims = if app_state.auth_service.is_enabled() {
        let bearer = parts
            .extract::<Option<TypedHeader<Authorization<Bearer>>>>()
            .await
            .map_err(|_| AppError::InvalidToken)?;

        match bearer {
            Some(TypedHeader(Authorization(bearer))) => {
                app_state.auth_service.validate_token(bearer.token())?
            }
            None => None,
        }
    } else {
        None
    };

    parts.extensions.insert(ResolvedClaims(claims.clone()));
    Ok(claims)
}

// Extrator para obter o usuário da sessão diretamente nos handlers.
// Sem token, a sessão é a do usuário de demonstração.
#[derive(Debug, Clone)]
pub struct SessionUser(pub User);

impl<S> FromRequestParts<S> for SessionUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let user = session_claims(parts, state)
            .await?
            .map(|claims| claims.user())
            .unwrap_or_else(demo_user);

        Ok(SessionUser(user))
    }
}
