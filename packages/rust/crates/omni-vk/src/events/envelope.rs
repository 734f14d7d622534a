use serde::Deserialize;
use serde_json::Value;

use super::registry::decode_event;
use super::{DecodeError, Event};

/// One inbound notification: which community emitted it, the shared secret it carried,
/// and the decoded event.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope {
    pub group_id: i64,
    /// Empty when the sender did not include one (long-poll updates never do).
    pub secret: String,
    pub event: Event,
}

#[derive(Deserialize)]
struct RawEnvelope {
    group_id: i64,
    #[serde(default)]
    secret: Option<String>,
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    object: Option<Value>,
}

impl Envelope {
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DecodeError> {
        let raw: RawEnvelope = serde_json::from_slice(bytes).map_err(DecodeError::Envelope)?;
        Self::from_raw(raw)
    }

    pub fn from_value(value: Value) -> Result<Self, DecodeError> {
        let raw: RawEnvelope = serde_json::from_value(value).map_err(DecodeError::Envelope)?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawEnvelope) -> Result<Self, DecodeError> {
        // `"object": null` counts as absent.
        let object = raw.object.filter(|object| !object.is_null());
        let event = decode_event(&raw.kind, object)?;
        Ok(Self {
            group_id: raw.group_id,
            secret: raw.secret.unwrap_or_default(),
            event,
        })
    }

    pub fn is_recognized(&self) -> bool {
        self.event.is_recognized()
    }
}

/// Decodes `value` and drops it (`Ok(None)`) when its discriminator is not registered.
pub fn decode_recognized(value: Value) -> Result<Option<Envelope>, DecodeError> {
    let envelope = Envelope::from_value(value)?;
    if envelope.is_recognized() {
        Ok(Some(envelope))
    } else {
        tracing::debug!(
            group_id = envelope.group_id,
            kind = %envelope.event.kind(),
            "dropping envelope with unrecognized discriminator"
        );
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn null_object_on_known_kind_is_missing_object() {
        let err = Envelope::from_value(json!({
            "group_id": 1,
            "type": "message_deny",
            "object": null
        }))
        .expect_err("null object must fail");
        assert!(matches!(err, DecodeError::MissingObject { .. }));
        assert_eq!(err.kind(), Some("message_deny"));
    }

    #[test]
    fn confirmation_ignores_object_and_secret_defaults_empty() {
        let envelope = Envelope::from_value(json!({
            "group_id": 7,
            "type": "confirmation",
            "object": {"anything": true}
        }))
        .expect("confirmation decodes");
        assert_eq!(envelope.secret, "");
        assert!(envelope.event.is_confirmation());
    }

    #[test]
    fn unrecognized_is_dropped_by_decode_recognized() {
        let decoded = decode_recognized(json!({
            "group_id": 7,
            "type": "app_payload",
            "object": {}
        }))
        .expect("unknown kinds are not errors");
        assert!(decoded.is_none());
    }
}
