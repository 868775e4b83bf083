// src/common/error.rs

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::{json, Value};
use thiserror::Error;

// Nosso tipo de erro do servidor, com `thiserror` para melhor ergonomia.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Erro de validação")]
    ValidationError(#[from] validator::ValidationErrors),

    // --- Resolução de tenant ---
    #[error("Tenant não informado")]
    TenantRequired,

    #[error("Tenant inválido: {0}")]
    InvalidTenant(String),

    #[error("Token não vale para o tenant {0}")]
    TenantForbidden(String),

    // --- Sessão ---
    #[error("Token inválido")]
    InvalidToken,

    #[error("Não encontrado: {0}")]
    NotFound(String),

    #[error("Requisição inválida: {0}")]
    BadRequest(String),

    // Variante para erros de banco de dados
    #[error("Erro de banco de dados: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Erro de JWT: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    // Variante genérica para qualquer outro erro inesperado
    #[error("Erro interno do servidor: {0}")]
    InternalServerError(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::ValidationError(_) | AppError::InvalidTenant(_) | AppError::BadRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::TenantRequired | AppError::InvalidToken => StatusCode::UNAUTHORIZED,
            AppError::TenantForbidden(_) => StatusCode::FORBIDDEN,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::DatabaseError(_)
            | AppError::JwtError(_)
            | AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Código estável lido pelo gateway client (`ApiError::code`).
    pub fn code(&self) -> &'static str {
        match self {
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::TenantRequired => "TENANT_REQUIRED",
            AppError::InvalidTenant(_) => "INVALID_TENANT",
            AppError::TenantForbidden(_) => "TENANT_FORBIDDEN",
            AppError::InvalidToken => "INVALID_TOKEN",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::BadRequest(_) => "BAD_REQUEST",
            AppError::DatabaseError(_)
            | AppError::JwtError(_)
            | AppError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }

    fn details(&self) -> Option<Value> {
        match self {
            AppError::ValidationError(errors) => {
                let mut details = serde_json::Map::new();
                for (field, field_errors) in errors.field_errors() {
                    let messages: Vec<Value> = field_errors
                        .iter()
                        .map(|e| {
                            e.message
                                .as_ref()
                                .map(|m| m.to_string())
                                .unwrap_or_else(|| e.code.to_string())
                        })
                        .map(Value::String)
                        .collect();
                    details.insert(field.to_string(), Value::Array(messages));
                }
                Some(Value::Object(details))
            }
            _ => None,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Erros 5xx nunca vazam detalhes: loga e devolve o corpo genérico.
        if status.is_server_error() {
            tracing::error!("Erro Interno do Servidor: {}", self);
            let body = Json(json!({ "error": "Internal Server Error" }));
            return (status, body).into_response();
        }

        let message = self.to_string();
        let mut body = json!({
            "error": message,
            "code": self.code(),
            "message": message,
        });
        if let Some(details) = self.details() {
            body["details"] = details;
        }
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        serde_json::from_slice(&bytes).expect("json")
    }

    #[tokio::test]
    async fn server_errors_render_generic_body() {
        let response = AppError::InternalServerError(anyhow::anyhow!("boom")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({ "error": "Internal Server Error" })
        );
    }

    #[tokio::test]
    async fn missing_tenant_is_unauthorized_with_code() {
        let response = AppError::TenantRequired.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        let body = body_json(response).await;
        assert_eq!(body["code"], "TENANT_REQUIRED");
        assert_eq!(body["message"], "Tenant não informado");
        assert!(body.get("details").is_none());
    }
}
