//! `/api/chat` and `/api/health` handlers.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::RelayState;
use super::error::RelayError;
use super::upstream::Completion;

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Non-empty string `message` field of a request body.
fn message_field(body: &Value) -> Option<&str> {
    body.get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())
}

/// Forward one user message upstream and return the reply.
pub(super) async fn chat<C: Completion>(
    State(state): State<RelayState<C>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<ChatResponse>, RelayError> {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            log::debug!("unreadable chat request: {}", rejection);
            return Err(RelayError::InvalidMessage);
        }
    };
    let message = message_field(&body).ok_or(RelayError::InvalidMessage)?;
    let response = state.completion.complete(message).await?;
    Ok(Json(ChatResponse { response }))
}

pub(super) async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn message_field_requires_non_empty_string() {
        assert_eq!(message_field(&json!({"message": "hi"})), Some("hi"));
        assert_eq!(message_field(&json!({"message": ""})), None);
        assert_eq!(message_field(&json!({"message": 42})), None);
        assert_eq!(message_field(&json!({"text": "hi"})), None);
        assert_eq!(message_field(&json!(["hi"])), None);
    }
}
