// src/client/error.rs

use std::fmt::Display;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Erro normalizado de qualquer chamada do cliente.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[error("{code}: {message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
    pub details: Option<Value>,
}

impl ApiError {
    /// Resposta não-2xx. Usa `code`, `message` e `details` do corpo quando
    /// existirem; senão `HTTP_<status>` e `API Error: <reason phrase>`.
    pub fn from_response(status: StatusCode, body: &Value) -> Self {
        let text = |key: &str| body.get(key).and_then(Value::as_str).map(str::to_string);

        let code = text("code").unwrap_or_else(|| format!("HTTP_{}", status.as_u16()));
        let message = text("message").unwrap_or_else(|| {
            let reason = status.canonical_reason().unwrap_or(status.as_str());
            format!("API Error: {reason}")
        });
        let details = body.get("details").filter(|d| !d.is_null()).cloned();

        Self {
            code,
            message,
            details,
        }
    }

    pub fn network(err: reqwest::Error) -> Self {
        Self {
            code: "NETWORK_ERROR".into(),
            message: err.to_string(),
            details: None,
        }
    }

    pub fn decode(err: impl Display) -> Self {
        Self {
            code: "DECODE_ERROR".into(),
            message: format!("invalid response body: {err}"),
            details: None,
        }
    }

    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self {
            code: "INVALID_REQUEST".into(),
            message: message.into(),
            details: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_body_falls_back_to_status() {
        let err = ApiError::from_response(StatusCode::NOT_FOUND, &json!({}));
        assert_eq!(err.code, "HTTP_404");
        assert_eq!(err.message, "API Error: Not Found");
        assert_eq!(err.details, None);
    }

    #[test]
    fn body_fields_win() {
        let body = json!({
            "error": "Erro de validação",
            "code": "VALIDATION_ERROR",
            "message": "Erro de validação",
            "details": { "content": ["O conteúdo do post é obrigatório."] }
        });
        let err = ApiError::from_response(StatusCode::BAD_REQUEST, &body);
        assert_eq!(err.code, "VALIDATION_ERROR");
        assert_eq!(err.message, "Erro de validação");
        assert_eq!(err.details, Some(body["details"].clone()));
    }

    #[test]
    fn non_json_body_is_treated_as_empty() {
        let err = ApiError::from_response(StatusCode::BAD_GATEWAY, &Value::Null);
        assert_eq!(err.code, "HTTP_502");
        assert_eq!(err.message, "API Error: Bad Gateway");
    }
}
