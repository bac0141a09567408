//! Relay server: forwards chat messages from the client to the upstream model API.
//!
//! Routes:
//!
//! | Method | Path          | Body                 | Reply                        |
//! |--------|---------------|----------------------|------------------------------|
//! | POST   | `/api/chat`   | `{"message": "..."}` | `{"response": "..."}`        |
//! | GET    | `/api/health` | —                    | `{"status": "ok"}`           |
//!
//! Failures reply with `{"error": "..."}` (400 or 500) and, for upstream failures,
//! a `details` field.

mod chat;
mod cors;
pub(crate) mod error;
mod upstream;

use std::net::SocketAddr;

use axum::Router;
use axum::middleware;
use axum::routing::{get, post};

use crate::core::config::RelayConfig;

pub use cors::AllowList;
pub use upstream::{Completion, OpenRouter};

/// State shared by the handlers.
#[derive(Clone)]
pub struct RelayState<C> {
    completion: C,
}

/// Build the relay router around `completion`, guarded by `allow_list`.
pub fn router<C: Completion>(completion: C, allow_list: AllowList) -> Router {
    let api = Router::new()
        .route("/chat", post(chat::chat::<C>))
        .route("/health", get(chat::health))
        .with_state(RelayState { completion });

    Router::new()
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            allow_list.clone(),
            cors::origin_guard,
        ))
        .layer(allow_list.cors_layer())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::warn!("could not listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    log::info!("shutting down");
}

/// Bind on all interfaces at `config.port` and serve until Ctrl+C.
pub async fn serve(config: RelayConfig) -> Result<(), Box<dyn std::error::Error>> {
    log::info!(
        "OPENROUTER_API_KEY: {}",
        if config.api_key.is_some() {
            "Set"
        } else {
            "Not set"
        }
    );
    log::info!("CLIENT_URL: {}", config.effective_client_url());

    let app = router(
        OpenRouter::new(&config)?,
        AllowList::new(config.allowed_origins()),
    );
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    log::info!("Server running on port {}", config.port);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::error::RelayError;
    use axum::body::Body;
    use axum::http::{Request, StatusCode, header};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    #[derive(Clone)]
    enum Canned {
        Echo,
        Fail(&'static str),
        NoKey,
    }

    impl Completion for Canned {
        async fn complete(&self, message: &str) -> Result<String, RelayError> {
            match self {
                Canned::Echo => Ok(format!("echo: {}", message)),
                Canned::Fail(msg) => Err(RelayError::ApiMessage(msg.to_string())),
                Canned::NoKey => Err(RelayError::MissingApiKey),
            }
        }
    }

    fn app(completion: Canned) -> Router {
        router(
            completion,
            AllowList::new(vec!["http://localhost:3000".into()]),
        )
    }

    fn post_chat(body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri("/api/chat")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: Router, req: Request<Body>) -> (StatusCode, Value) {
        let resp = app.oneshot(req).await.unwrap();
        let status = resp.status();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, body)
    }

    #[tokio::test]
    async fn chat_returns_reply() {
        let (status, body) = send(app(Canned::Echo), post_chat(r#"{"message":"hi"}"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"response": "echo: hi"}));
    }

    #[tokio::test]
    async fn chat_rejects_non_string_message() {
        let (status, body) = send(app(Canned::Echo), post_chat(r#"{"message":5}"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"error": "Message is required and must be a string"})
        );
    }

    #[tokio::test]
    async fn chat_rejects_missing_and_malformed_body() {
        let (status, _) = send(app(Canned::Echo), post_chat("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = send(app(Canned::Echo), post_chat("not json")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn chat_without_api_key_is_configuration_error() {
        let (status, body) = send(app(Canned::NoKey), post_chat(r#"{"message":"hi"}"#)).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Server configuration error"}));
    }

    #[tokio::test]
    async fn chat_upstream_failure_has_details() {
        let (status, body) = send(
            app(Canned::Fail("Rate limit exceeded")),
            post_chat(r#"{"message":"hi"}"#),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"], "Failed to get AI response");
        assert_eq!(body["details"], "API error: Rate limit exceeded");
    }

    #[tokio::test]
    async fn health_is_ok() {
        let req = Request::builder()
            .uri("/api/health")
            .body(Body::empty())
            .unwrap();
        let (status, body) = send(app(Canned::Echo), req).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn allowed_origin_gets_cors_headers() {
        let mut req = post_chat(r#"{"message":"hi"}"#);
        req.headers_mut()
            .insert(header::ORIGIN, "http://localhost:3000".parse().unwrap());
        let resp = app(Canned::Echo).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
            "http://localhost:3000"
        );
        assert_eq!(
            resp.headers()[header::ACCESS_CONTROL_ALLOW_CREDENTIALS],
            "true"
        );
    }

    #[tokio::test]
    async fn unlisted_origin_is_forbidden() {
        let mut req = post_chat(r#"{"message":"hi"}"#);
        req.headers_mut()
            .insert(header::ORIGIN, "https://evil.example".parse().unwrap());
        let resp = app(Canned::Echo).oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
        assert!(
            resp.headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .is_none()
        );
    }

    #[tokio::test]
    async fn unknown_route_is_not_found() {
        let req = Request::builder()
            .uri("/api/nope")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(app(Canned::Echo), req).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
