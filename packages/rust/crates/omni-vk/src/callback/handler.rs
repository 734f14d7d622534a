use axum::{
    body::{Body, Bytes},
    extract::State,
    http::StatusCode,
};

use crate::bot::{EventSink, SinkError};
use crate::events::Envelope;

use super::CALLBACK_ACK;
use super::state::CallbackState;

/// Same ceiling axum applies to its own body extractors.
const CALLBACK_BODY_LIMIT_BYTES: usize = 2 * 1024 * 1024;

type CallbackResponse = (StatusCode, String);

fn ack() -> CallbackResponse {
    (StatusCode::OK, CALLBACK_ACK.to_string())
}

/// Every outcome except the handshake answers the same acknowledgement, so callers
/// cannot tell an unknown community from a wrong secret.
pub(super) async fn callback_handler(
    State(state): State<CallbackState>,
    body: Body,
) -> CallbackResponse {
    let attachment = state.attachment.get();
    let read = axum::body::to_bytes(body, CALLBACK_BODY_LIMIT_BYTES);
    let body: Bytes = match attachment.as_ref() {
        Some(attachment) => tokio::select! {
            biased;
            () = attachment.stop.cancelled() => {
                tracing::warn!("vk callback request still incomplete after shutdown drain; dropped");
                return (StatusCode::SERVICE_UNAVAILABLE, String::new());
            }
            result = read => match result {
                Ok(bytes) => bytes,
                Err(error) => return unreadable_body(&error),
            },
        },
        None => match read.await {
            Ok(bytes) => bytes,
            Err(error) => return unreadable_body(&error),
        },
    };

    let envelope = match Envelope::from_slice(&body) {
        Ok(envelope) => envelope,
        Err(error) => {
            tracing::warn!(
                kind = ?error.kind(),
                error = %error,
                "dropping malformed vk callback envelope"
            );
            return ack();
        }
    };

    let Some(source) = state.sources.get(envelope.group_id) else {
        tracing::debug!(group_id = envelope.group_id, "vk callback from unregistered source");
        return ack();
    };
    if !source.secret.is_empty() && source.secret != envelope.secret {
        tracing::debug!(group_id = envelope.group_id, "vk callback secret mismatch");
        return ack();
    }

    if envelope.event.is_confirmation() {
        tracing::info!(group_id = envelope.group_id, "answering vk callback confirmation");
        return (StatusCode::OK, source.confirmation.clone());
    }
    if !envelope.is_recognized() {
        tracing::debug!(
            group_id = envelope.group_id,
            kind = %envelope.event.kind(),
            "dropping vk callback with unrecognized discriminator"
        );
        return ack();
    }

    match attachment {
        Some(attachment) => forward_envelope(&attachment.sink, envelope),
        None => tracing::warn!(
            group_id = envelope.group_id,
            kind = %envelope.event.kind(),
            "vk callback received while not polling; event lost"
        ),
    }
    ack()
}

fn unreadable_body(error: &axum::Error) -> CallbackResponse {
    tracing::warn!(error = %error, "vk callback body could not be read");
    (StatusCode::BAD_REQUEST, String::new())
}

/// Non-blocking enqueue first; on a full queue the send moves to a task bound to the
/// sink's cancellation token so the HTTP response is never held back.
fn forward_envelope(sink: &EventSink, envelope: Envelope) {
    let group_id = envelope.group_id;
    let kind = envelope.event.kind().to_string();
    match sink.try_send(envelope) {
        Ok(()) => tracing::debug!(group_id, kind = %kind, "vk callback event forwarded"),
        Err(SinkError::Full(envelope)) => {
            let sink = sink.clone();
            tokio::spawn(async move {
                match sink.send(*envelope).await {
                    Ok(()) => tracing::debug!(group_id, kind = %kind, "vk callback event forwarded"),
                    Err(error) => tracing::warn!(
                        group_id,
                        kind = %kind,
                        error = %error,
                        "vk callback event lost"
                    ),
                }
            });
        }
        Err(error) => tracing::warn!(
            group_id,
            kind = %kind,
            error = %error,
            "vk callback event lost"
        ),
    }
}
