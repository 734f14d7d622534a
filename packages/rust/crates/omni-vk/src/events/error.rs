use thiserror::Error;

/// An inbound notification could not be decoded.
///
/// Every variant is the "malformed envelope" condition; transports log it and drop
/// the notification, it is never fatal.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The common envelope fields (`group_id`, `type`, ...) are missing or mistyped.
    #[error("malformed envelope: {0}")]
    Envelope(#[source] serde_json::Error),

    /// A known discriminator arrived without its `object`.
    #[error("malformed envelope `{kind}`: missing object")]
    MissingObject { kind: String },

    /// A known discriminator's `object` lacks a required field or has a mistyped one.
    #[error("malformed envelope `{kind}`: {source}")]
    Payload {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

impl DecodeError {
    /// Discriminator of the failed envelope, when it got far enough to read one.
    pub fn kind(&self) -> Option<&str> {
        match self {
            Self::Envelope(_) => None,
            Self::MissingObject { kind } | Self::Payload { kind, .. } => Some(kind),
        }
    }
}
