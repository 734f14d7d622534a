use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("access token is required")]
    MissingToken,

    /// Non-200 response from the method endpoint.
    #[error("vk http error (status={status})")]
    Http { status: StatusCode },

    /// `{"error": {"error_code": .., "error_msg": ..}}` envelope.
    #[error("vk api error {code}: {message}")]
    Api { code: i64, message: String },

    #[error("vk request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("vk response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    /// VK error code when the API itself rejected the call.
    pub fn api_code(&self) -> Option<i64> {
        match self {
            Self::Api { code, .. } => Some(*code),
            _ => None,
        }
    }
}
