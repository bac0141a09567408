//! HTTP client for the relay server's `/api/chat` endpoint.

use serde::Deserialize;
use serde_json::json;

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to relay failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("relay answered {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },
    #[error("relay reply has no response text")]
    MalformedReply,
    #[error("request ended without a reply")]
    Interrupted,
}

#[derive(Debug, Deserialize)]
struct ChatReply {
    response: Option<String>,
}

/// Sends one message at a time to the relay and returns its reply.
#[derive(Debug, Clone)]
pub struct RelayClient {
    http: reqwest::Client,
    chat_url: String,
}

impl RelayClient {
    pub fn new(api_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            chat_url: chat_url(api_url),
        }
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }

    pub async fn send(&self, message: &str) -> Result<String, ClientError> {
        log::debug!("POST {}", self.chat_url);
        let resp = self
            .http
            .post(&self.chat_url)
            .json(&json!({ "message": message }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(ClientError::Status { status, body });
        }

        let reply: ChatReply = resp.json().await?;
        reply.response.ok_or(ClientError::MalformedReply)
    }
}

fn chat_url(api_url: &str) -> String {
    format!("{}/api/chat", api_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::server::error::RelayError;
    use crate::server::{self, AllowList, Completion};

    #[test]
    fn chat_url_joins_without_double_slash() {
        assert_eq!(
            chat_url("http://localhost:5000"),
            "http://localhost:5000/api/chat"
        );
        assert_eq!(
            chat_url("https://relay.example.com/"),
            "https://relay.example.com/api/chat"
        );
    }

    #[derive(Clone)]
    struct Shout;

    impl Completion for Shout {
        async fn complete(&self, message: &str) -> Result<String, RelayError> {
            if message == "fail" {
                return Err(RelayError::InvalidResponse);
            }
            Ok(message.to_uppercase())
        }
    }

    async fn spawn_relay() -> String {
        let app = server::router(Shout, AllowList::new(vec![]));
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    #[tokio::test]
    async fn send_returns_relay_reply() {
        let client = RelayClient::new(&spawn_relay().await);
        assert_eq!(client.send("hello").await.unwrap(), "HELLO");
    }

    #[tokio::test]
    async fn send_surfaces_error_status() {
        let client = RelayClient::new(&spawn_relay().await);
        match client.send("fail").await {
            Err(ClientError::Status { status, body }) => {
                assert_eq!(status.as_u16(), 500);
                assert!(body.contains("Failed to get AI response"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn send_to_closed_port_is_transport_error() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let client = RelayClient::new(&format!("http://{}", addr));
        assert!(matches!(
            client.send("hi").await,
            Err(ClientError::Transport(_))
        ));
    }
}
