use async_trait::async_trait;
use serde_json::Value;

use super::ApiError;

/// Generic VK method call; the per-endpoint bindings live outside this crate.
#[async_trait]
pub trait ApiClient: Send + Sync {
    /// Calls `method` with form parameters and returns the raw `response` member.
    async fn request(&self, method: &str, params: &[(&str, String)]) -> Result<Value, ApiError>;

    /// HTTP client shared with transports that talk to VK servers directly (long poll).
    fn http_client(&self) -> &reqwest::Client;
}
