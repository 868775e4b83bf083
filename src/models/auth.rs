// src/models/auth.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::models::users::User;

// Estrutura de dados ("claims") dentro do JWT
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid, // Subject (ID do usuário)
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
    // Tenant "de sessão", usado quando a requisição não traz X-Tenant-ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tenant_schema: Option<String>,
    pub exp: usize, // Expiration time
    pub iat: usize, // Issued At
}

impl Claims {
    pub fn user(&self) -> User {
        User {
            id: self.sub,
            name: self.name.clone(),
            avatar_url: self.avatar_url.clone(),
        }
    }
}

// POST /api/auth/session: login de demonstração a partir do diretório
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SessionResponse {
    pub token: String,
    pub user: User,
    pub expires_at: DateTime<Utc>,
}
