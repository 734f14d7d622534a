use reqwest::StatusCode;
use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum LongPollError {
    /// The cancellation token fired mid-call. Not a transport failure; the session is untouched.
    #[error("long poll cancelled")]
    Cancelled,

    #[error("groups.getLongPollServer failed: {0}")]
    Api(#[from] ApiError),

    #[error("long poll request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("long poll server returned http status {status}")]
    Http { status: StatusCode },

    #[error("long poll server url `{server}` is invalid: {reason}")]
    InvalidServer { server: String, reason: String },

    #[error("long poll response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),

    /// `failed` outside 0..=3 is a protocol violation.
    #[error("long poll returned unknown `failed` value {0}")]
    UnknownFailure(i64),
}

impl LongPollError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
