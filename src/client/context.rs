// src/client/context.rs

use std::{fmt, sync::Arc};

use async_trait::async_trait;

use crate::models::tenancy::Tenant;

/// De onde vem o access token da sessão. Pode não haver sessão.
#[async_trait]
pub trait SessionTokenSource: Send + Sync {
    async fn access_token(&self) -> Option<String>;
}

// Token fixo, ex.: o que `auth().create_session()` devolveu
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl SessionTokenSource for StaticToken {
    async fn access_token(&self) -> Option<String> {
        Some(self.0.clone())
    }
}

/// Tenant e sessão usados por todas as chamadas de um `ApiClient`.
/// Passado explicitamente; o cliente não lê estado global.
#[derive(Clone, Default)]
pub struct ClientContext {
    pub tenant: Option<Tenant>,
    pub session: Option<Arc<dyn SessionTokenSource>>,
}

impl ClientContext {
    pub fn new(tenant: Option<Tenant>, session: Option<Arc<dyn SessionTokenSource>>) -> Self {
        Self { tenant, session }
    }

    pub fn with_tenant(mut self, tenant: Tenant) -> Self {
        self.tenant = Some(tenant);
        self
    }

    pub fn with_session(mut self, session: Arc<dyn SessionTokenSource>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn with_token(self, token: impl Into<String>) -> Self {
        self.with_session(Arc::new(StaticToken::new(token)))
    }

    pub async fn access_token(&self) -> Option<String> {
        match &self.session {
            Some(session) => session.access_token().await,
            None => None,
        }
    }
}

// Nunca imprime o token
impl fmt::Debug for ClientContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientContext")
            .field("tenant", &self.tenant)
            .field("session", &self.session.as_ref().map(|_| "<token source>"))
            .finish()
    }
}
