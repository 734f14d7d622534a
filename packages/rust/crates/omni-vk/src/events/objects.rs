//! Shared VK object shapes embedded in event payloads.
//!
//! Identifier fields are required; everything else defaults when absent.

use serde::Deserialize;
use serde_json::{Map, Value};

use super::BoolInt;

/// Media attachment: the `type` tag plus the raw fields (the object lives under the
/// key named by `type`, e.g. `{"type": "photo", "photo": {...}}`).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Attachment {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Attachment {
    /// Returns the attached object keyed by the attachment type.
    pub fn object(&self) -> Option<&Value> {
        self.fields.get(&self.kind)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Message {
    pub id: i64,
    pub date: i64,
    pub peer_id: i64,
    pub from_id: i64,
    #[serde(default)]
    pub conversation_message_id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub random_id: i64,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub important: BoolInt,
    #[serde(default)]
    pub payload: String,
    /// Forwarded messages carry partial message records; kept raw.
    #[serde(default)]
    pub fwd_messages: Vec<Value>,
    #[serde(default)]
    pub action: Option<MessageAction>,
}

/// Service action attached to chat messages (`chat_invite_user`, `chat_title_update`, ...).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MessageAction {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub member_id: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub from_id: i64,
    pub date: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reply_to_user: i64,
    #[serde(default)]
    pub reply_to_comment: i64,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// Discussion-board comment; differs from [`Comment`] by carrying likes instead of reply targets.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardComment {
    pub id: i64,
    pub from_id: i64,
    pub date: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub likes: Likes,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Likes {
    #[serde(default)]
    pub count: i64,
    #[serde(default)]
    pub user_likes: BoolInt,
    #[serde(default)]
    pub can_like: BoolInt,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhotoSize {
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Photo {
    pub id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub album_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub sizes: Vec<PhotoSize>,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Audio {
    pub id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub artist: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub album_id: i64,
    #[serde(default)]
    pub genre_id: i64,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub no_search: BoolInt,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Video {
    pub id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub access_key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub duration: i64,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub adding_date: i64,
    #[serde(default)]
    pub views: i64,
    #[serde(default)]
    pub comments: i64,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub photo_320: String,
    #[serde(default)]
    pub photo_800: String,
    #[serde(default)]
    pub is_private: BoolInt,
    #[serde(default)]
    pub live: BoolInt,
}

/// Counter block used by posts (`comments`, `likes`, `reposts`, `views`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PostCounter {
    #[serde(default)]
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Post {
    pub id: i64,
    pub owner_id: i64,
    #[serde(default)]
    pub from_id: i64,
    #[serde(default)]
    pub created_by: i64,
    #[serde(default)]
    pub date: i64,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub reply_owner_id: i64,
    #[serde(default)]
    pub reply_post_id: i64,
    #[serde(default)]
    pub friends_only: BoolInt,
    #[serde(default)]
    pub post_type: String,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default)]
    pub signer_id: i64,
    #[serde(default)]
    pub copy_history: Vec<Post>,
    #[serde(default)]
    pub comments: Option<PostCounter>,
    #[serde(default)]
    pub likes: Option<PostCounter>,
    #[serde(default)]
    pub reposts: Option<PostCounter>,
    #[serde(default)]
    pub views: Option<PostCounter>,
    #[serde(default)]
    pub is_pinned: BoolInt,
    #[serde(default)]
    pub marked_as_ads: BoolInt,
}

/// Community record; the bot's self identity.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Group {
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub screen_name: String,
    /// 0 = open, 1 = closed, 2 = private.
    #[serde(default)]
    pub is_closed: i64,
    #[serde(default)]
    pub deactivated: String,
    #[serde(rename = "type", default)]
    pub kind: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub photo_50: String,
    #[serde(default)]
    pub photo_100: String,
    #[serde(default)]
    pub photo_200: String,
}
