//! Upstream chat-completions call (OpenRouter through async-openai).

use std::future::Future;

use async_openai::Client;
use async_openai::config::OpenAIConfig;
use serde_json::{Value, json};

use crate::core::config::{ConfigError, RelayConfig};

use super::error::{RelayError, map_api_error};

/// Sampling temperature sent upstream.
pub const TEMPERATURE: f32 = 0.7;
/// Reply length cap sent upstream.
pub const MAX_TOKENS: u32 = 1000;

/// Produces a reply for one user message.
pub trait Completion: Clone + Send + Sync + 'static {
    fn complete(&self, message: &str) -> impl Future<Output = Result<String, RelayError>> + Send;
}

/// Completion backed by the OpenRouter chat-completions endpoint.
#[derive(Clone)]
pub struct OpenRouter {
    /// `None` when no API key is configured.
    client: Option<Client<OpenAIConfig>>,
    model: String,
}

impl OpenRouter {
    pub fn new(config: &RelayConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            client: config.openai_config()?.map(Client::with_config),
            model: config.model_id.clone(),
        })
    }
}

impl Completion for OpenRouter {
    async fn complete(&self, message: &str) -> Result<String, RelayError> {
        let Some(client) = &self.client else {
            log::error!("OPENROUTER_API_KEY not found in environment variables");
            return Err(RelayError::MissingApiKey);
        };

        log::info!("Sending request to OpenRouter API...");
        let chat_api = client.chat();
        let data: Value = chat_api
            .create_byot(request_body(&self.model, message))
            .await
            .map_err(map_api_error)?;
        log::debug!("OpenRouter API response: {}", data);

        extract_reply(&data)
    }
}

fn request_body(model: &str, message: &str) -> Value {
    json!({
        "model": model,
        "messages": [{ "role": "user", "content": message }],
        "temperature": TEMPERATURE,
        "max_tokens": MAX_TOKENS,
    })
}

/// Pull the trimmed reply text out of a chat-completions response.
pub(crate) fn extract_reply(data: &Value) -> Result<String, RelayError> {
    if let Some(err) = data.get("error") {
        let msg = err
            .get("message")
            .and_then(|v| v.as_str())
            .unwrap_or("Unknown error");
        return Err(RelayError::ApiMessage(msg.to_string()));
    }
    match data
        .pointer("/choices/0/message/content")
        .and_then(|c| c.as_str())
    {
        Some(content) if !content.is_empty() => Ok(content.trim().to_string()),
        _ => {
            log::error!("Invalid response format: {}", data);
            Err(RelayError::InvalidResponse)
        }
    }
}
