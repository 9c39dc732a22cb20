//! HTTP implementation of the [`ApiGateway`] port.
//!
//! Wraps `reqwest::Client` with the service base URL and bearer-token
//! injection. The token is read from the [`TokenStore`] for every outbound
//! request, so signing in or out takes effect immediately without
//! rebuilding the client.

use std::sync::Arc;

use async_trait::async_trait;
use habit_core::gateway::ApiGateway;
use habit_core::token::TokenStore;
use habit_core::{HabitError, Result};
use reqwest::{Client, Method, RequestBuilder, header};
use serde_json::Value;
use tracing::Instrument;
use url::Url;

/// Gateway to the habit service over HTTP.
///
/// No retries, no timeout policy and no cancellation: each call is one
/// request and the caller decides what happens next.
#[derive(Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    tokens: Arc<dyn TokenStore>,
}

impl HttpGateway {
    /// Creates a gateway with a default `reqwest::Client`.
    pub fn new(base_url: Url, tokens: Arc<dyn TokenStore>) -> Self {
        Self::with_client(Client::new(), base_url, tokens)
    }

    pub fn with_client(client: Client, base_url: Url, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            client,
            base_url,
            tokens,
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn url(&self, path: &str) -> Result<Url> {
        Ok(self.base_url.join(path.trim_start_matches('/'))?)
    }

    /// Attaches `Authorization: Bearer ...` if a token is stored right now.
    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match self.tokens.load() {
            Ok(Some(token)) => request.bearer_auth(token),
            Ok(None) => request,
            Err(e) => {
                tracing::warn!("Failed to read bearer token, sending unauthenticated: {}", e);
                request
            }
        }
    }

    async fn send(&self, method: Method, path: &str, body: Option<Value>) -> Result<Value> {
        let url = self.url(path)?;
        let span = tracing::debug_span!("http_request", http.method = %method, http.path = %path);

        async move {
            let mut request = self
                .client
                .request(method, url)
                .header(header::ACCEPT, "application/json")
                .header(header::CONTENT_TYPE, "application/json");
            if let Some(body) = body {
                request = request.json(&body);
            }
            let request = self.authorize(request);

            let response = request.send().await.inspect_err(|e| {
                tracing::debug!("Request could not be sent: {}", e);
            })?;

            let status = response.status();
            tracing::debug!(http.status = status.as_u16(), "Response received");

            if !status.is_success() {
                let text = response.text().await.unwrap_or_default();
                return Err(HabitError::request(
                    Some(status.as_u16()),
                    error_message(&text, status.canonical_reason()),
                ));
            }

            let bytes = response.bytes().await?;
            if bytes.iter().all(u8::is_ascii_whitespace) {
                return Ok(Value::Null);
            }
            Ok(serde_json::from_slice(&bytes)?)
        }
        .instrument(span)
        .await
    }
}

/// Extracts a readable message from an error body: a JSON `message` or
/// `error` field, the raw text, or the status reason.
fn error_message(body: &str, reason: Option<&str>) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        for key in ["message", "error"] {
            if let Some(msg) = value.get(key).and_then(Value::as_str) {
                return msg.to_string();
            }
        }
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        reason.unwrap_or("Unknown error").to_string()
    } else {
        trimmed.to_string()
    }
}

#[async_trait]
impl ApiGateway for HttpGateway {
    async fn fetch(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn create(&self, path: &str, body: Value) -> Result<Value> {
        self.send(Method::POST, path, Some(body)).await
    }

    async fn replace(&self, path: &str, body: Value) -> Result<Value> {
        self.send(Method::PUT, path, Some(body)).await
    }

    async fn remove(&self, path: &str) -> Result<Value> {
        self.send(Method::DELETE, path, None).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use habit_core::token::MemoryTokenStore;
    use httpmock::prelude::*;
    use serde_json::json;

    fn gateway(server: &MockServer, tokens: Arc<dyn TokenStore>) -> HttpGateway {
        let base = Url::parse(&server.url("/api/")).unwrap();
        HttpGateway::new(base, tokens)
    }

    #[tokio::test]
    async fn test_fetch_sends_bearer_token() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/users/me")
                    .header("authorization", "Bearer jwt-1");
                then.status(200).json_body(json!({ "_id": "u1" }));
            })
            .await;

        let gateway = gateway(&server, Arc::new(MemoryTokenStore::with_token("jwt-1")));
        let body = gateway.fetch("users/me").await.unwrap();

        mock.assert_async().await;
        assert_eq!(body["_id"], "u1");
    }

    #[tokio::test]
    async fn test_token_is_resolved_per_request() {
        let server = MockServer::start_async().await;
        let anonymous = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/auth/signout")
                    .header_missing("authorization");
                then.status(200);
            })
            .await;
        let authorized = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/users/me")
                    .header("authorization", "Bearer fresh");
                then.status(200).json_body(json!({}));
            })
            .await;

        let tokens = Arc::new(MemoryTokenStore::new());
        let gateway = gateway(&server, tokens.clone());

        gateway.fetch("auth/signout").await.unwrap();
        anonymous.assert_async().await;

        // token written after the gateway was built
        tokens.save("fresh").unwrap();
        gateway.fetch("/users/me").await.unwrap();
        authorized.assert_async().await;
    }

    #[tokio::test]
    async fn test_create_posts_json_body() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/goals/u1")
                    .json_body(json!({ "name": "Read 12 books" }));
                then.status(201).json_body(json!({ "_id": "g1" }));
            })
            .await;

        let gateway = gateway(&server, Arc::new(MemoryTokenStore::new()));
        let body = gateway
            .create("goals/u1", json!({ "name": "Read 12 books" }))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(body["_id"], "g1");
    }

    #[tokio::test]
    async fn test_replace_and_empty_body() {
        let server = MockServer::start_async().await;
        let put = server
            .mock_async(|when, then| {
                when.method(PUT)
                    .path("/api/tasks/update/t1")
                    .json_body(json!({ "completed": true }));
                then.status(204);
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE).path("/api/tasks/delete/t1");
                then.status(200).body("");
            })
            .await;

        let gateway = gateway(&server, Arc::new(MemoryTokenStore::new()));
        let updated = gateway
            .replace("tasks/update/t1", json!({ "completed": true }))
            .await
            .unwrap();
        let removed = gateway.remove("tasks/delete/t1").await.unwrap();

        put.assert_async().await;
        delete.assert_async().await;
        assert_eq!(updated, Value::Null);
        assert_eq!(removed, Value::Null);
    }

    #[tokio::test]
    async fn test_every_verb_declares_json_content_type() {
        let server = MockServer::start_async().await;
        let get = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/api/goals/g1")
                    .header("content-type", "application/json");
                then.status(200).json_body(json!({ "tasks": [] }));
            })
            .await;
        let delete = server
            .mock_async(|when, then| {
                when.method(DELETE)
                    .path("/api/goals/delete/g1")
                    .header("content-type", "application/json");
                then.status(204);
            })
            .await;
        let post = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/api/tasks/g1")
                    .header("content-type", "application/json");
                then.status(201);
            })
            .await;

        let gateway = gateway(&server, Arc::new(MemoryTokenStore::new()));
        gateway.fetch("goals/g1").await.unwrap();
        gateway.remove("goals/delete/g1").await.unwrap();
        gateway.create("tasks/g1", json!({ "name": "Read" })).await.unwrap();

        get.assert_async().await;
        delete.assert_async().await;
        post.assert_async().await;
    }

    #[tokio::test]
    async fn test_non_success_maps_to_request_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/goals/missing");
                then.status(404).json_body(json!({ "message": "Goal not found" }));
            })
            .await;

        let gateway = gateway(&server, Arc::new(MemoryTokenStore::new()));
        let err = gateway.fetch("goals/missing").await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert_eq!(err.to_string(), "Request failed (404): Goal not found");
    }

    #[tokio::test]
    async fn test_invalid_json_body_is_serialization_error() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/api/users/me");
                then.status(200).body("<html>");
            })
            .await;

        let gateway = gateway(&server, Arc::new(MemoryTokenStore::new()));
        let err = gateway.fetch("users/me").await.unwrap_err();
        assert!(matches!(err, HabitError::Serialization { .. }));
    }

    #[tokio::test]
    async fn test_unreachable_server() {
        let base = Url::parse("http://127.0.0.1:1/api/").unwrap();
        let gateway = HttpGateway::new(base, Arc::new(MemoryTokenStore::new()));

        let err = gateway.fetch("users/me").await.unwrap_err();
        assert!(err.is_request());
        assert_eq!(err.status(), None);
        assert!(matches!(err, HabitError::Request { ref message, .. } if !message.is_empty()));
    }

    #[test]
    fn test_error_message_fallbacks() {
        assert_eq!(error_message(r#"{"error":"bad"}"#, None), "bad");
        assert_eq!(error_message("plain text", None), "plain text");
        assert_eq!(error_message("", Some("Not Found")), "Not Found");
        assert_eq!(error_message("", None), "Unknown error");
    }
}
