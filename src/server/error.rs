//! Relay errors and their HTTP representation.

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::{Value, json};

/// Errors from handling a chat request.
#[derive(Debug, thiserror::Error)]
pub enum RelayError {
    #[error("Message is required and must be a string")]
    InvalidMessage,
    /// No upstream API key configured.
    #[error("Server configuration error")]
    MissingApiKey,
    #[error("API error: {0}")]
    ApiMessage(String),
    #[error("Invalid response format from AI service")]
    InvalidResponse,
    #[error("{0}")]
    Other(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl RelayError {
    pub fn status(&self) -> StatusCode {
        match self {
            RelayError::InvalidMessage => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            RelayError::InvalidMessage | RelayError::MissingApiKey => {
                json!({ "error": self.to_string() })
            }
            _ => {
                log::error!("Chat error: {}", self);
                json!({
                    "error": "Failed to get AI response",
                    "details": self.to_string(),
                })
            }
        };
        (status, Json(body)).into_response()
    }
}

/// `error.message` of the first JSON object embedded in `text`.
fn embedded_api_message(text: &str) -> Option<String> {
    text.match_indices('{').find_map(|(idx, _)| {
        let value = serde_json::Deserializer::from_str(&text[idx..])
            .into_iter::<Value>()
            .next()?
            .ok()?;
        value
            .pointer("/error/message")
            .and_then(Value::as_str)
            .map(str::to_string)
    })
}

/// Map async-openai errors into RelayError, pulling out the API's own message when present.
pub fn map_api_error<E>(e: E) -> RelayError
where
    E: std::fmt::Display + Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
{
    match embedded_api_message(&e.to_string()) {
        Some(msg) => RelayError::ApiMessage(msg),
        None => RelayError::Other(e.into()),
    }
}
