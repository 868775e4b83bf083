// src/client.rs
//
// Cliente HTTP da API. Um único `request()` monta a URL, injeta os
// cabeçalhos de tenant e de sessão e normaliza erros em `ApiError`; os
// grupos por domínio (`feed()`, `chat()`, ...) só montam query/corpo.

use reqwest::{
    header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, Method,
};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;

mod analytics;
mod auth;
mod chat;
mod context;
mod docs;
mod error;
mod feed;
mod forms;
mod meetings;
mod support;
mod tasks;
mod users;

pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use chat::ChatApi;
pub use context::{ClientContext, SessionTokenSource, StaticToken};
pub use docs::DocsApi;
pub use error::ApiError;
pub use feed::FeedApi;
pub use forms::FormsApi;
pub use meetings::MeetingsApi;
pub use support::SupportApi;
pub use tasks::TasksApi;
pub use users::UsersApi;

pub const DEFAULT_BASE_URL: &str = "http://localhost:3000/api";
pub const TENANT_ID_HEADER: &str = "x-tenant-id";
pub const TENANT_SCHEMA_HEADER: &str = "x-tenant-schema";

/// Query string, corpo JSON e cabeçalhos extras de uma chamada.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub headers: Vec<(String, String)>,
}

impl RequestOptions {
    /// Serializa `params` em pares chave/valor, pulando os nulos.
    pub fn query<Q: Serialize>(params: &Q) -> Result<Self, ApiError> {
        Ok(Self {
            query: query_pairs(params)?,
            ..Self::default()
        })
    }

    pub fn json<B: Serialize>(body: &B) -> Result<Self, ApiError> {
        let body = serde_json::to_value(body)
            .map_err(|e| ApiError::invalid_request(format!("body is not serializable: {e}")))?;
        Ok(Self {
            body: Some(body),
            ..Self::default()
        })
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

fn query_pairs<Q: Serialize>(params: &Q) -> Result<Vec<(String, String)>, ApiError> {
    let value = serde_json::to_value(params)
        .map_err(|e| ApiError::invalid_request(format!("query is not serializable: {e}")))?;

    let Value::Object(map) = value else {
        return Err(ApiError::invalid_request("query must serialize to an object"));
    };

    Ok(map
        .into_iter()
        .filter_map(|(key, value)| match value {
            Value::Null => None,
            Value::String(s) => Some((key, s)),
            other => Some((key, other.to_string())),
        })
        .collect())
}

#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    context: ClientContext,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, context: ClientContext) -> Result<Self, ApiError> {
        let http = Client::builder().build().map_err(ApiError::network)?;
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Ok(Self {
            http,
            base_url,
            context,
        })
    }

    /// Lê `API_BASE_URL` (padrão: `http://localhost:3000/api`).
    pub fn from_env(context: ClientContext) -> Result<Self, ApiError> {
        let base_url = std::env::var("API_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        Self::new(base_url, context)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn context(&self) -> &ClientContext {
        &self.context
    }

    /// Mesmo cliente HTTP, outro contexto (ex.: depois de trocar de tenant).
    pub fn with_context(&self, context: ClientContext) -> Self {
        Self {
            http: self.http.clone(),
            base_url: self.base_url.clone(),
            context,
        }
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let token = self.context.access_token().await;
        let headers = self.build_headers(&options.headers, token.as_deref())?;

        let mut request = self.http.request(method.clone(), &url).headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = &options.body {
            request = request.body(body.to_string());
        }

        let response = request.send().await.map_err(ApiError::network)?;
        let status = response.status();
        let bytes = response.bytes().await.map_err(ApiError::network)?;

        if !status.is_success() {
            let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
            let error = ApiError::from_response(status, &body);
            tracing::debug!("{} {} falhou: {} {}", method, url, error.code, error.message);
            return Err(error);
        }

        serde_json::from_slice(&bytes).map_err(ApiError::decode)
    }

    /// Ordem: Content-Type padrão, cabeçalhos do chamador (sobrescrevem o
    /// padrão), tenant do contexto e, por fim, o bearer da sessão.
    fn build_headers(
        &self,
        extra: &[(String, String)],
        token: Option<&str>,
    ) -> Result<HeaderMap, ApiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in extra {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::invalid_request(format!("invalid header name {name}: {e}")))?;
            headers.insert(name, header_value(value)?);
        }

        if let Some(tenant) = &self.context.tenant {
            headers.insert(HeaderName::from_static(TENANT_ID_HEADER), header_value(&tenant.id)?);
            headers.insert(
                HeaderName::from_static(TENANT_SCHEMA_HEADER),
                header_value(&tenant.schema)?,
            );
        }

        if let Some(token) = token {
            headers.insert(AUTHORIZATION, header_value(&format!("Bearer {token}"))?);
        }

        Ok(headers)
    }

    // --- Grupos por domínio ---

    pub fn auth(&self) -> AuthApi<'_> {
        AuthApi::new(self)
    }

    pub fn feed(&self) -> FeedApi<'_> {
        FeedApi::new(self)
    }

    pub fn chat(&self) -> ChatApi<'_> {
        ChatApi::new(self)
    }

    pub fn docs(&self) -> DocsApi<'_> {
        DocsApi::new(self)
    }

    pub fn forms(&self) -> FormsApi<'_> {
        FormsApi::new(self)
    }

    pub fn tasks(&self) -> TasksApi<'_> {
        TasksApi::new(self)
    }

    pub fn meetings(&self) -> MeetingsApi<'_> {
        MeetingsApi::new(self)
    }

    pub fn users(&self) -> UsersApi<'_> {
        UsersApi::new(self)
    }

    pub fn analytics(&self) -> AnalyticsApi<'_> {
        AnalyticsApi::new(self)
    }

    pub fn support(&self) -> SupportApi<'_> {
        SupportApi::new(self)
    }
}

fn header_value(value: &str) -> Result<HeaderValue, ApiError> {
    HeaderValue::from_str(value)
        .map_err(|e| ApiError::invalid_request(format!("invalid header value: {e}")))
}
