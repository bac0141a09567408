//! Configuration from environment variables (a `.env` file is loaded at startup).

use std::env;

use async_openai::config::OpenAIConfig;
use async_openai::error::OpenAIError;

use crate::core::presentation::PresentationMode;

pub const DEFAULT_BASE_URL: &str = "https://openrouter.ai/api/v1";
pub const DEFAULT_MODEL: &str = "openai/gpt-3.5-turbo";
pub const DEFAULT_CLIENT_URL: &str = "http://localhost:3001";
pub const DEFAULT_PORT: u16 = 5000;
pub const DEFAULT_API_URL: &str = "http://localhost:5000";

/// Origins always accepted by the relay, in addition to `CLIENT_URL`.
pub const DEV_ORIGINS: &[&str] = &["http://localhost:3000", "http://localhost:3001"];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("PORT must be a port number, got {0:?}")]
    InvalidPort(String),
    #[error("HELPAI_THEME: {0}")]
    InvalidTheme(#[from] crate::core::presentation::ParseModeError),
    #[error("CLIENT_URL cannot be sent as a header: {0}")]
    InvalidHeader(#[from] OpenAIError),
}

/// Settings of the relay server.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    /// `None` keeps the server up but fails every chat request with a configuration error.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model_id: String,
    /// Production front-end origin.
    pub client_url: Option<String>,
    pub port: u16,
}

impl RelayConfig {
    /// Origins allowed to call the relay from a browser.
    pub fn allowed_origins(&self) -> Vec<String> {
        let mut origins: Vec<String> = DEV_ORIGINS.iter().map(|s| s.to_string()).collect();
        if let Some(url) = &self.client_url
            && !origins.contains(url)
        {
            origins.push(url.clone());
        }
        origins
    }

    /// Front-end URL reported at startup and sent upstream as `HTTP-Referer`.
    pub fn effective_client_url(&self) -> &str {
        self.client_url.as_deref().unwrap_or(DEFAULT_CLIENT_URL)
    }

    /// Client configuration for the upstream API, or `None` without a key.
    /// Carries the OpenRouter attribution headers.
    pub fn openai_config(&self) -> Result<Option<OpenAIConfig>, ConfigError> {
        let Some(key) = &self.api_key else {
            return Ok(None);
        };
        let config = OpenAIConfig::new()
            .with_api_base(self.base_url.clone())
            .with_api_key(key.clone())
            .with_header("HTTP-Referer", self.effective_client_url())?
            .with_header("X-Title", crate::core::app::TITLE)?;
        Ok(Some(config))
    }
}

/// Settings of the terminal client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the relay server.
    pub api_url: String,
    /// Identity shown in the profile menu.
    pub user_email: Option<String>,
    pub theme: PresentationMode,
}

fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_port(raw: Option<String>) -> Result<u16, ConfigError> {
    match raw {
        None => Ok(DEFAULT_PORT),
        Some(s) => s.parse().map_err(|_| ConfigError::InvalidPort(s)),
    }
}

/// Load relay settings. A missing API key is not an error here; see [`RelayConfig::api_key`].
pub fn load_relay() -> Result<RelayConfig, ConfigError> {
    let config = RelayConfig {
        api_key: non_empty_var("OPENROUTER_API_KEY"),
        base_url: non_empty_var("OPENROUTER_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
        model_id: non_empty_var("OPENROUTER_MODEL").unwrap_or_else(|| DEFAULT_MODEL.into()),
        client_url: non_empty_var("CLIENT_URL"),
        port: parse_port(non_empty_var("PORT"))?,
    };
    config.openai_config()?;
    Ok(config)
}

pub fn load_client() -> Result<ClientConfig, ConfigError> {
    let theme = match non_empty_var("HELPAI_THEME") {
        Some(s) => s.parse()?,
        None => PresentationMode::default(),
    };
    Ok(ClientConfig {
        api_url: non_empty_var("HELPAI_API_URL").unwrap_or_else(|| DEFAULT_API_URL.into()),
        user_email: non_empty_var("HELPAI_USER_EMAIL"),
        theme,
    })
}
