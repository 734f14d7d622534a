use std::str::FromStr;

use serde::Deserialize;
use thiserror::Error;

/// One community allowed to push to the endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CallbackSourceConfig {
    pub group_id: i64,
    /// Empty disables the secret check for this community.
    #[serde(default)]
    pub secret: String,
    /// Answer to the `confirmation` handshake.
    #[serde(default)]
    pub confirmation: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseSourceError {
    #[error("expected GROUP_ID:SECRET:CONFIRMATION, got `{0}`")]
    Shape(String),
    #[error("invalid group id `{0}`")]
    GroupId(String),
}

/// Parses `GROUP_ID:SECRET:CONFIRMATION`; the confirmation may itself contain `:`.
impl FromStr for CallbackSourceConfig {
    type Err = ParseSourceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let mut parts = raw.trim().splitn(3, ':');
        let (Some(group_id), Some(secret), Some(confirmation)) =
            (parts.next(), parts.next(), parts.next())
        else {
            return Err(ParseSourceError::Shape(raw.to_string()));
        };
        let group_id = group_id
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|id| *id > 0)
            .ok_or_else(|| ParseSourceError::GroupId(group_id.to_string()))?;
        Ok(Self {
            group_id,
            secret: secret.to_string(),
            confirmation: confirmation.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_cli_source_triplet() {
        let source: CallbackSourceConfig = "42:s3cr3t:abc:123".parse().expect("valid source");
        assert_eq!(source.group_id, 42);
        assert_eq!(source.secret, "s3cr3t");
        assert_eq!(source.confirmation, "abc:123");
    }

    #[test]
    fn rejects_bad_group_id_and_shape() {
        assert_eq!(
            "x:s:c".parse::<CallbackSourceConfig>(),
            Err(ParseSourceError::GroupId("x".to_string()))
        );
        assert!(matches!(
            "42:only".parse::<CallbackSourceConfig>(),
            Err(ParseSourceError::Shape(_))
        ));
    }
}
