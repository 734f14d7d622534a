use std::collections::HashMap;
use std::sync::LazyLock;

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{DecodeError, Event};

/// Discriminator of the Callback API handshake; it carries no `object`.
pub const CONFIRMATION_KIND: &str = "confirmation";

type DecodeFn = fn(Value) -> Result<Event, serde_json::Error>;

fn payload<T: DeserializeOwned>(object: Value) -> Result<T, serde_json::Error> {
    serde_json::from_value(object)
}

static DECODERS: LazyLock<HashMap<&'static str, DecodeFn>> = LazyLock::new(|| {
    let entries: [(&'static str, DecodeFn); 41] = [
        ("message_new", |o| payload(o).map(Event::MessageNew)),
        ("message_reply", |o| payload(o).map(Event::MessageReply)),
        ("message_edit", |o| payload(o).map(Event::MessageEdit)),
        ("message_allow", |o| payload(o).map(Event::MessageAllow)),
        ("message_deny", |o| payload(o).map(Event::MessageDeny)),
        ("message_typing_state", |o| {
            payload(o).map(Event::MessageTypingState)
        }),
        ("photo_new", |o| payload(o).map(Event::PhotoNew)),
        ("photo_comment_new", |o| payload(o).map(Event::PhotoCommentNew)),
        ("photo_comment_edit", |o| payload(o).map(Event::PhotoCommentEdit)),
        ("photo_comment_restore", |o| {
            payload(o).map(Event::PhotoCommentRestore)
        }),
        ("photo_comment_delete", |o| {
            payload(o).map(Event::PhotoCommentDelete)
        }),
        ("audio_new", |o| payload(o).map(Event::AudioNew)),
        ("video_new", |o| payload(o).map(Event::VideoNew)),
        ("video_comment_new", |o| payload(o).map(Event::VideoCommentNew)),
        ("video_comment_edit", |o| payload(o).map(Event::VideoCommentEdit)),
        ("video_comment_restore", |o| {
            payload(o).map(Event::VideoCommentRestore)
        }),
        ("video_comment_delete", |o| {
            payload(o).map(Event::VideoCommentDelete)
        }),
        ("wall_post_new", |o| payload(o).map(Event::WallPostNew)),
        ("wall_repost", |o| payload(o).map(Event::WallRepost)),
        ("wall_reply_new", |o| payload(o).map(Event::WallReplyNew)),
        ("wall_reply_edit", |o| payload(o).map(Event::WallReplyEdit)),
        ("wall_reply_restore", |o| payload(o).map(Event::WallReplyRestore)),
        ("wall_reply_delete", |o| payload(o).map(Event::WallReplyDelete)),
        ("board_post_new", |o| payload(o).map(Event::BoardPostNew)),
        ("board_post_edit", |o| payload(o).map(Event::BoardPostEdit)),
        ("board_post_restore", |o| payload(o).map(Event::BoardPostRestore)),
        ("board_post_delete", |o| payload(o).map(Event::BoardPostDelete)),
        ("market_comment_new", |o| payload(o).map(Event::MarketCommentNew)),
        ("market_comment_edit", |o| {
            payload(o).map(Event::MarketCommentEdit)
        }),
        ("market_comment_restore", |o| {
            payload(o).map(Event::MarketCommentRestore)
        }),
        ("market_comment_delete", |o| {
            payload(o).map(Event::MarketCommentDelete)
        }),
        ("group_leave", |o| payload(o).map(Event::GroupLeave)),
        ("group_join", |o| payload(o).map(Event::GroupJoin)),
        ("user_block", |o| payload(o).map(Event::UserBlock)),
        ("user_unblock", |o| payload(o).map(Event::UserUnblock)),
        ("poll_vote_new", |o| payload(o).map(Event::PollVoteNew)),
        ("group_officers_edit", |o| {
            payload(o).map(Event::GroupOfficersEdit)
        }),
        ("group_change_settings", |o| {
            payload(o).map(Event::GroupChangeSettings)
        }),
        ("group_change_photo", |o| payload(o).map(Event::GroupChangePhoto)),
        ("lead_forms_new", |o| Ok(Event::LeadFormsNew(o))),
        ("vkpay_transaction", |o| Ok(Event::VkPayTransaction(o))),
    ];
    HashMap::from(entries)
});

/// Whether `kind` decodes to a concrete variant (the handshake included).
pub fn is_known_kind(kind: &str) -> bool {
    kind == CONFIRMATION_KIND || DECODERS.contains_key(kind)
}

/// All discriminators with a registered decoder, handshake included, sorted.
pub fn known_kinds() -> Vec<&'static str> {
    let mut kinds: Vec<&'static str> = DECODERS.keys().copied().collect();
    kinds.push(CONFIRMATION_KIND);
    kinds.sort_unstable();
    kinds
}

/// Resolves `kind` and decodes `object` into the matching variant.
pub(super) fn decode_event(kind: &str, object: Option<Value>) -> Result<Event, DecodeError> {
    if kind == CONFIRMATION_KIND {
        return Ok(Event::Confirmation);
    }
    let Some(decode) = DECODERS.get(kind) else {
        return Ok(Event::Unrecognized(kind.to_string()));
    };
    let object = object.ok_or_else(|| DecodeError::MissingObject {
        kind: kind.to_string(),
    })?;
    decode(object).map_err(|source| DecodeError::Payload {
        kind: kind.to_string(),
        source,
    })
}
