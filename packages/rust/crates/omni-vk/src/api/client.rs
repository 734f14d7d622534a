use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Value;

use super::constants::{
    VK_API_DEFAULT_BASE_URL, VK_API_DEFAULT_VERSION, VK_HTTP_CONNECT_TIMEOUT_SECS,
};
use super::{ApiClient, ApiError};

#[derive(Debug, Clone, Default)]
pub struct HttpApiClientConfig {
    pub access_token: String,
    /// Defaults to `https://api.vk.com/method`.
    pub base_url: Option<String>,
    pub version: Option<String>,
    /// `lang` parameter; omitted when `None`.
    pub language: Option<String>,
    pub client: Option<reqwest::Client>,
}

/// Form-encoded POST to `<base_url>/<method>` carrying `access_token`, `v` and `lang`.
#[derive(Debug, Clone)]
pub struct HttpApiClient {
    base_url: String,
    access_token: String,
    version: String,
    language: Option<String>,
    client: reqwest::Client,
}

#[derive(Deserialize)]
struct MethodResponse {
    #[serde(default)]
    error: Option<MethodError>,
    #[serde(default)]
    response: Value,
}

#[derive(Deserialize)]
struct MethodError {
    #[serde(default)]
    error_code: i64,
    #[serde(default)]
    error_msg: String,
}

impl HttpApiClient {
    pub fn new(config: HttpApiClientConfig) -> Result<Self, ApiError> {
        let access_token = config.access_token.trim().to_string();
        if access_token.is_empty() {
            return Err(ApiError::MissingToken);
        }
        let client = match config.client {
            Some(client) => client,
            None => reqwest::Client::builder()
                .connect_timeout(Duration::from_secs(VK_HTTP_CONNECT_TIMEOUT_SECS))
                .build()?,
        };
        let base_url = config
            .base_url
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| VK_API_DEFAULT_BASE_URL.to_string());
        Ok(Self {
            base_url,
            access_token,
            version: config
                .version
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| VK_API_DEFAULT_VERSION.to_string()),
            language: config.language.filter(|lang| !lang.trim().is_empty()),
            client,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/{method}", self.base_url)
    }
}

#[async_trait]
impl ApiClient for HttpApiClient {
    async fn request(&self, method: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        let mut form: Vec<(&str, &str)> = params
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
            .collect();
        form.push(("access_token", &self.access_token));
        form.push(("v", &self.version));
        if let Some(lang) = self.language.as_deref() {
            form.push(("lang", lang));
        }

        let resp = self
            .client
            .post(self.method_url(method))
            .form(&form)
            .send()
            .await?;
        let status = resp.status();
        if status != StatusCode::OK {
            tracing::debug!(method, status = %status, "vk method call returned non-200");
            return Err(ApiError::Http { status });
        }

        let body = resp.bytes().await?;
        let decoded: MethodResponse = serde_json::from_slice(&body)?;
        if let Some(error) = decoded.error {
            return Err(ApiError::Api {
                code: error.error_code,
                message: error.error_msg,
            });
        }
        Ok(decoded.response)
    }

    fn http_client(&self) -> &reqwest::Client {
        &self.client
    }
}
