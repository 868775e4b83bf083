// src/middleware/tenancy.rs

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::{
    common::error::AppError,
    config::AppState,
    middleware::auth::session_claims,
    models::tenancy::Tenant,
};

// Os nomes dos nossos cabeçalhos HTTP customizados
pub const TENANT_ID_HEADER: &str = "x-tenant-id";
pub const TENANT_SCHEMA_HEADER: &str = "x-tenant-schema";

// O tenant da requisição. Resolvido a cada chamada, nunca guardado.
//
// Ordem: cabeçalho X-Tenant-ID; na falta dele, o tenant das claims do
// token. Se os dois existirem e divergirem, a requisição é recusada.
#[derive(Debug, Clone)]
pub struct TenantContext(pub Tenant);

impl<S> FromRequestParts<S> for TenantContext
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let header_id = header_value(parts, TENANT_ID_HEADER)?;
        let header_schema = header_value(parts, TENANT_SCHEMA_HEADER)?;
        let claims = session_claims(parts, state).await?;
        let claimed_id = claims.as_ref().and_then(|c| c.tenant_id.as_deref());

        let tenant = match (header_id.as_deref(), claimed_id) {
            (Some(id), claimed) => {
                let tenant = Tenant::parse(id, header_schema.as_deref())
                    .map_err(|e| AppError::InvalidTenant(e.to_string()))?;
                if claimed.is_some_and(|claimed| claimed != tenant.id) {
                    tracing::warn!("🚫 Tenant {} fora do escopo do token", tenant.id);
                    return Err(AppError::TenantForbidden(tenant.id));
                }
                tenant
            }
            (None, Some(claimed)) => {
                let schema = header_schema
                    .as_deref()
                    .or_else(|| claims.as_ref().and_then(|c| c.tenant_schema.as_deref()));
                Tenant::parse(claimed, schema).map_err(|e| AppError::InvalidTenant(e.to_string()))?
            }
            (None, None) => return Err(AppError::TenantRequired),
        };

        Ok(TenantContext(tenant))
    }
}

fn header_value(parts: &Parts, name: &str) -> Result<Option<String>, AppError> {
    match parts.headers.get(name) {
        None => Ok(None),
        Some(value) => value
            .to_str()
            .map(|s| Some(s.trim().to_string()).filter(|s| !s.is_empty()))
            .map_err(|_| AppError::InvalidTenant(format!("header {name} não é texto válido"))),
    }
}
