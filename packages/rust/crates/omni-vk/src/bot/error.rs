use thiserror::Error;

use crate::api::ApiError;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("groups.getById failed: {0}")]
    Api(#[from] ApiError),

    /// `groups.getById` must resolve to exactly one community.
    #[error("groups.getById returned {returned} groups, expected exactly one")]
    IdentityMismatch { returned: usize },

    #[error("groups.getById response could not be decoded: {0}")]
    Decode(#[from] serde_json::Error),
}
