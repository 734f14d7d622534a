use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `groups.getLongPollServer` result.
#[derive(Debug, Deserialize)]
pub(super) struct LongPollServerResponse {
    pub(super) key: String,
    pub(super) server: String,
    #[serde(deserialize_with = "cursor")]
    pub(super) ts: String,
}

/// `a_check` result. `ts` is absent on some failure codes.
#[derive(Debug, Deserialize)]
pub(super) struct LongPollResponse {
    #[serde(default, deserialize_with = "optional_cursor")]
    pub(super) ts: Option<String>,
    #[serde(default)]
    pub(super) failed: i64,
    #[serde(default)]
    pub(super) updates: Vec<Value>,
}

/// The cursor is documented as a string but `getLongPollServer` sends a number.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawCursor {
    Text(String),
    Number(i64),
}

impl RawCursor {
    fn into_string(self) -> String {
        match self {
            Self::Text(text) => text,
            Self::Number(number) => number.to_string(),
        }
    }
}

fn cursor<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    RawCursor::deserialize(deserializer).map(RawCursor::into_string)
}

fn optional_cursor<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<RawCursor>::deserialize(deserializer).map(|ts| ts.map(RawCursor::into_string))
}
