// src/config.rs

use std::{env, net::SocketAddr, sync::Arc, time::Duration};

use anyhow::Context;
use sqlx::postgres::PgPoolOptions;

use crate::{
    db::{MockRepository, Repository, SqlRepository},
    services::{
        ai_service::{AiService, DisabledGenerator, OpenAiGenerator, TextGenerator},
        auth::AuthService,
        chat_service::ChatService,
        docs_service::DocsService,
        feed_service::FeedService,
    },
};

const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_AI_MODEL: &str = "gpt-4o-mini";
const DEFAULT_AI_TIMEOUT_SECS: u64 = 20;

// Configuração lida do ambiente (e do .env, se existir)
#[derive(Debug, Clone)]
pub struct Settings {
    pub bind_addr: SocketAddr,
    pub database_url: Option<String>,
    pub jwt_secret: Option<String>,
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub ai_model: String,
    pub ai_timeout: Duration,
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let bind_addr = optional("BIND_ADDR")
            .unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .context("BIND_ADDR deve ser um endereço host:porta válido")?;

        let ai_timeout = match optional("AI_TIMEOUT_SECS") {
            Some(secs) => secs
                .parse()
                .context("AI_TIMEOUT_SECS deve ser um número de segundos")?,
            None => DEFAULT_AI_TIMEOUT_SECS,
        };

        Ok(Self {
            bind_addr,
            database_url: optional("DATABASE_URL"),
            jwt_secret: optional("JWT_SECRET"),
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_base_url: optional("OPENAI_BASE_URL"),
            ai_model: optional("AI_MODEL").unwrap_or_else(|| DEFAULT_AI_MODEL.to_string()),
            ai_timeout: Duration::from_secs(ai_timeout),
        })
    }
}

// Variável vazia conta como ausente
fn optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

// O estado compartilhado que será acessível em toda a aplicação
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<dyn Repository>,
    pub auth_service: AuthService,
    pub feed_service: FeedService,
    pub chat_service: ChatService,
    pub docs_service: DocsService,
}

impl AppState {
    pub async fn new(settings: &Settings) -> anyhow::Result<Self> {
        // Mock ou SQL: decidido uma única vez aqui
        let repo: Arc<dyn Repository> = match &settings.database_url {
            Some(database_url) => {
                let pool = PgPoolOptions::new()
                    .max_connections(5)
                    .acquire_timeout(Duration::from_secs(3))
                    .connect(database_url)
                    .await
                    .context("Falha ao conectar ao banco de dados")?;
                tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

                sqlx::migrate!()
                    .run(&pool)
                    .await
                    .context("Falha ao rodar as migrações do banco de dados")?;
                tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

                Arc::new(SqlRepository::new(pool))
            }
            None => {
                tracing::warn!("⚠️ DATABASE_URL não definida: usando dados de demonstração em memória");
                Arc::new(MockRepository::new())
            }
        };

        let generator: Arc<dyn TextGenerator> = match &settings.openai_api_key {
            Some(api_key) => Arc::new(
                OpenAiGenerator::new(
                    api_key,
                    settings.openai_base_url.as_deref(),
                    settings.ai_model.clone(),
                    settings.ai_timeout,
                )
                .context("Falha ao configurar o cliente de IA")?,
            ),
            None => {
                tracing::warn!("⚠️ OPENAI_API_KEY não definida: recursos de IA usarão respostas padrão");
                Arc::new(DisabledGenerator)
            }
        };

        if settings.jwt_secret.is_none() {
            tracing::warn!("⚠️ JWT_SECRET não definido: cabeçalho Authorization será ignorado");
        }

        Ok(Self::from_parts(repo, generator, settings.jwt_secret.clone()))
    }

    /// Monta o grafo de dependências a partir de peças prontas (usado nos testes).
    pub fn from_parts(
        repo: Arc<dyn Repository>,
        generator: Arc<dyn TextGenerator>,
        jwt_secret: Option<String>,
    ) -> Self {
        let ai = AiService::new(generator);
        Self {
            feed_service: FeedService::new(repo.clone(), ai.clone()),
            chat_service: ChatService::new(repo.clone(), ai.clone()),
            docs_service: DocsService::new(repo.clone(), ai),
            auth_service: AuthService::new(jwt_secret),
            repo,
        }
    }
}
