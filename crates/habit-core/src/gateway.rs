//! API gateway port.
//!
//! Four verbs over JSON paths relative to the service base URL. The typed
//! endpoint layer lives in the application crate; implementations only move
//! bytes and attach credentials.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Outbound access to the remote service.
///
/// Implementations return the decoded body of a 2xx response (JSON `null`
/// for an empty body) and map every other outcome to
/// [`HabitError::Request`](crate::error::HabitError::Request). They do not
/// retry.
#[async_trait]
pub trait ApiGateway: Send + Sync {
    /// `GET {path}`
    async fn fetch(&self, path: &str) -> Result<Value>;

    /// `POST {path}` with a JSON body
    async fn create(&self, path: &str, body: Value) -> Result<Value>;

    /// `PUT {path}` with a JSON body
    async fn replace(&self, path: &str, body: Value) -> Result<Value>;

    /// `DELETE {path}`
    async fn remove(&self, path: &str) -> Result<Value>;
}
