use serde_json::{Value, json};

pub(crate) fn sample_message_object(id: i64, text: &str) -> Value {
    json!({
        "id": id,
        "date": 1_700_000_000,
        "peer_id": 2_000_000_001,
        "from_id": 555,
        "text": text,
        "conversation_message_id": id,
        "attachments": [],
        "important": 0
    })
}

pub(crate) fn message_new_envelope(group_id: i64, secret: &str, id: i64, text: &str) -> Value {
    json!({
        "group_id": group_id,
        "secret": secret,
        "type": "message_new",
        "object": sample_message_object(id, text)
    })
}
