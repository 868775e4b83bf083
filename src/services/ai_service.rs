// src/services/ai_service.rs
//
// Geração de texto "best effort": qualquer falha do provedor vira o texto
// de fallback e um `warn!`. Nada daqui derruba a requisição.

use std::{collections::HashSet, sync::Arc, time::Duration};

use async_trait::async_trait;
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client, StatusCode,
};
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;

pub const SMART_REPLY_FALLBACK: [&str; 3] = ["Thanks!", "Got it.", "Will do."];
pub const SUMMARY_FALLBACK: &str = "Summary unavailable.";

const MAX_TAGS: usize = 5;
const MAX_REPLIES: usize = 3;
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationOptions {
    pub temperature: f32,
    pub max_tokens: u32,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            max_tokens: 256,
        }
    }
}

#[derive(Debug, Error)]
pub enum AiError {
    #[error("text generation is not configured")]
    Unavailable,
    #[error("invalid AI configuration: {0}")]
    Config(String),
    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("AI provider returned {status}: {body}")]
    Provider { status: StatusCode, body: String },
    #[error("AI provider returned no text")]
    Empty,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String, AiError>;
}

/// Usado quando não há chave configurada.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledGenerator;

#[async_trait]
impl TextGenerator for DisabledGenerator {
    async fn generate(&self, _prompt: &str, _options: GenerationOptions) -> Result<String, AiError> {
        Err(AiError::Unavailable)
    }
}

// =============================================================================
//  PROVEDOR OPENAI (chat/completions)
// =============================================================================

pub struct OpenAiGenerator {
    client: Client,
    chat_url: String,
    model: String,
}

impl OpenAiGenerator {
    pub fn new(
        api_key: &str,
        base_url: Option<&str>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, AiError> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        let auth = format!("Bearer {api_key}");
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&auth)
                .map_err(|err| AiError::Config(format!("invalid api key: {err}")))?,
        );

        let client = Client::builder()
            .default_headers(headers)
            .timeout(timeout)
            .build()?;

        let base = base_url.unwrap_or(DEFAULT_BASE_URL).trim_end_matches('/');
        Ok(Self {
            client,
            chat_url: format!("{base}/chat/completions"),
            model: model.into(),
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletion {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

#[async_trait]
impl TextGenerator for OpenAiGenerator {
    async fn generate(&self, prompt: &str, options: GenerationOptions) -> Result<String, AiError> {
        let body = json!({
            "model": self.model,
            "messages": [{ "role": "user", "content": prompt }],
            "temperature": options.temperature,
            "max_tokens": options.max_tokens,
        });

        let response = self.client.post(&self.chat_url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Provider { status, body });
        }

        let completion: ChatCompletion = response.json().await?;
        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|text| text.trim().to_string())
            .filter(|text| !text.is_empty())
            .ok_or(AiError::Empty)
    }
}

// =============================================================================
//  AI SERVICE
// =============================================================================

#[derive(Clone)]
pub struct AiService {
    generator: Arc<dyn TextGenerator>,
}

impl AiService {
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn disabled() -> Self {
        Self::new(Arc::new(DisabledGenerator))
    }

    /// Até 5 tags em minúsculas para um post. Falha => nenhuma tag.
    pub async fn suggest_tags(&self, content: &str) -> Vec<String> {
        let prompt = format!(
            "Suggest up to {MAX_TAGS} short topic tags for this workplace post. \
             Reply only with a JSON array of lowercase strings.\n\nPost:\n{content}"
        );
        let options = GenerationOptions {
            temperature: 0.3,
            max_tokens: 60,
        };

        match self.generate_list(&prompt, options).await {
            Some(tags) => {
                let mut tags: Vec<String> = tags
                    .into_iter()
                    .map(|tag| tag.trim().trim_start_matches('#').to_lowercase())
                    .filter(|tag| !tag.is_empty())
                    .collect();
                // Mantém a primeira ocorrência de cada tag
                let mut seen = HashSet::new();
                tags.retain(|tag| seen.insert(tag.clone()));
                tags.truncate(MAX_TAGS);
                tags
            }
            None => vec![],
        }
    }

    /// Até 3 respostas curtas para uma mensagem de chat.
    pub async fn smart_replies(&self, message: &str) -> Vec<String> {
        let prompt = format!(
            "Suggest {MAX_REPLIES} short, friendly replies to this chat message. \
             Reply only with a JSON array of strings.\n\nMessage:\n{message}"
        );

        let replies = self
            .generate_list(&prompt, GenerationOptions::default())
            .await
            .map(|mut replies| {
                replies.retain(|r| !r.trim().is_empty());
                replies.truncate(MAX_REPLIES);
                replies
            })
            .filter(|replies| !replies.is_empty());

        replies.unwrap_or_else(|| SMART_REPLY_FALLBACK.iter().map(|s| s.to_string()).collect())
    }

    pub async fn summarize(&self, text: &str) -> String {
        let prompt = format!(
            "Summarize the following document in two or three sentences.\n\n{text}"
        );
        let options = GenerationOptions {
            temperature: 0.3,
            max_tokens: 200,
        };

        match self.generator.generate(&prompt, options).await {
            Ok(summary) => {
                let summary = strip_code_fences(&summary).trim().to_string();
                if summary.is_empty() {
                    SUMMARY_FALLBACK.to_string()
                } else {
                    summary
                }
            }
            Err(e) => {
                tracing::warn!("⚠️ Resumo por IA indisponível: {}", e);
                SUMMARY_FALLBACK.to_string()
            }
        }
    }

    async fn generate_list(&self, prompt: &str, options: GenerationOptions) -> Option<Vec<String>> {
        match self.generator.generate(prompt, options).await {
            Ok(text) => {
                let parsed = parse_string_list(&text);
                if parsed.is_none() {
                    tracing::warn!("⚠️ Resposta da IA não é uma lista JSON: {:?}", text);
                }
                parsed
            }
            Err(e) => {
                tracing::warn!("⚠️ Geração por IA falhou: {}", e);
                None
            }
        }
    }
}

/// Remove cercas ``` (com ou sem linguagem) ao redor da resposta.
fn strip_code_fences(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Pula o identificador de linguagem (```json)
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

/// Aceita `["a","b"]`, `{"tags": [...]}` ou `{"replies": [...]}`.
fn parse_string_list(text: &str) -> Option<Vec<String>> {
    let value: Value = serde_json::from_str(strip_code_fences(text)).ok()?;
    let items = match value {
        Value::Array(items) => items,
        Value::Object(mut map) => match map.remove("tags").or_else(|| map.remove("replies")) {
            Some(Value::Array(items)) => items,
            _ => return None,
        },
        _ => return None,
    };

    Some(
        items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Fixed(Result<&'static str, ()>);

    #[async_trait]
    impl TextGenerator for Fixed {
        async fn generate(&self, _prompt: &str, _options: GenerationOptions) -> Result<String, AiError> {
            self.0.map(str::to_string).map_err(|_| AiError::Empty)
        }
    }

    fn service(output: Result<&'static str, ()>) -> AiService {
        AiService::new(Arc::new(Fixed(output)))
    }

    #[test]
    fn strips_fences_with_language() {
        assert_eq!(strip_code_fences("```json\n[\"a\"]\n```"), "[\"a\"]");
        assert_eq!(strip_code_fences("  [\"a\"] "), "[\"a\"]");
    }

    #[test]
    fn parses_wrapped_lists() {
        assert_eq!(
            parse_string_list(r#"{"tags": ["x", 3, "y"]}"#),
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(parse_string_list("not json"), None);
    }

    #[tokio::test]
    async fn failing_generator_falls_back() {
        let ai = service(Err(()));
        assert_eq!(ai.smart_replies("ship it?").await, SMART_REPLY_FALLBACK);
        assert!(ai.suggest_tags("hello").await.is_empty());
        assert_eq!(ai.summarize("doc").await, SUMMARY_FALLBACK);
    }

    #[tokio::test]
    async fn disabled_generator_falls_back() {
        let ai = AiService::disabled();
        assert_eq!(ai.smart_replies("hi").await, SMART_REPLY_FALLBACK);
    }

    #[tokio::test]
    async fn tags_are_normalized_and_capped() {
        let ai = service(Ok("```json\n[\"#Design\", \"UI\", \"a\", \"b\", \"c\", \"d\"]\n```"));
        assert_eq!(ai.suggest_tags("post").await, vec!["design", "ui", "a", "b", "c"]);
    }

    #[tokio::test]
    async fn repeated_tags_are_kept_once_before_capping() {
        let ai = service(Ok(r##"["Design", "ui", "design", "#UI", "a", "b", "c", "d"]"##));
        assert_eq!(ai.suggest_tags("post").await, vec!["design", "ui", "a", "b", "c"]);
    }

    #[tokio::test]
    async fn unparseable_replies_fall_back() {
        let ai = service(Ok("Sure! Here are some replies"));
        assert_eq!(ai.smart_replies("hi").await, SMART_REPLY_FALLBACK);
    }
}
