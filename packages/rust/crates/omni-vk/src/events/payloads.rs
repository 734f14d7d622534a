//! Per-discriminator payload records.
//!
//! Comment-like payloads embed the shared record with `#[serde(flatten)]` and add the
//! owner/target identifiers that say what was commented on.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::Value;

use super::{BoardComment, BoolInt, Comment, Photo, Post};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageAllow {
    pub user_id: i64,
    /// Parameter passed to `messages.allowMessagesFromGroup`.
    #[serde(default)]
    pub key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageDeny {
    pub user_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MessageTypingState {
    /// Always `typing` at the moment.
    #[serde(default)]
    pub state: String,
    pub from_id: i64,
    pub to_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct PhotoComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub photo_id: i64,
    pub photo_owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PhotoCommentDelete {
    pub owner_id: i64,
    pub id: i64,
    pub photo_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub deleter_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VideoComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub video_id: i64,
    pub video_owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct VideoCommentDelete {
    pub owner_id: i64,
    pub id: i64,
    pub video_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub deleter_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WallPost {
    #[serde(flatten)]
    pub post: Post,
    /// Set when the post was published from the postponed queue.
    #[serde(default)]
    pub postponed_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct WallReply {
    #[serde(flatten)]
    pub comment: Comment,
    pub post_id: i64,
    pub post_owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WallReplyDelete {
    pub owner_id: i64,
    pub id: i64,
    pub post_id: i64,
    #[serde(default)]
    pub deleter_id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BoardPost {
    #[serde(flatten)]
    pub comment: BoardComment,
    pub topic_id: i64,
    pub topic_owner_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardPostDelete {
    pub topic_owner_id: i64,
    pub topic_id: i64,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct MarketComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub market_owner_id: i64,
    pub item_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MarketCommentDelete {
    pub owner_id: i64,
    pub id: i64,
    pub item_id: i64,
    #[serde(default)]
    pub user_id: i64,
    #[serde(default)]
    pub deleter_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupLeave {
    pub user_id: i64,
    /// `true` when the user left on their own, `false` when removed.
    #[serde(rename = "self", default)]
    pub by_self: BoolInt,
}

/// How a member got into the community.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GroupJoinType {
    #[default]
    Join,
    Unsure,
    Accepted,
    Approved,
    Request,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupJoin {
    pub user_id: i64,
    #[serde(default)]
    pub join_type: GroupJoinType,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum UserBlockReason {
    #[default]
    Other,
    Spam,
    VerbalAbuse,
    StrongLanguage,
    IrrelevantMessages,
}

impl From<i64> for UserBlockReason {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Spam,
            2 => Self::VerbalAbuse,
            3 => Self::StrongLanguage,
            4 => Self::IrrelevantMessages,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserBlock {
    pub user_id: i64,
    #[serde(default)]
    pub admin_id: i64,
    /// Unix time of the automatic unblock; `0` means permanent.
    #[serde(default)]
    pub unblock_date: i64,
    #[serde(default)]
    pub reason: UserBlockReason,
    #[serde(default)]
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserUnblock {
    pub user_id: i64,
    #[serde(default)]
    pub admin_id: i64,
    /// `true` when the block simply expired.
    #[serde(default)]
    pub by_end_date: BoolInt,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PollVoteNew {
    pub owner_id: i64,
    pub poll_id: i64,
    pub option_id: i64,
    pub user_id: i64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "i64")]
pub enum GroupOfficerRole {
    #[default]
    None,
    Moderator,
    Editor,
    Administrator,
}

impl From<i64> for GroupOfficerRole {
    fn from(value: i64) -> Self {
        match value {
            1 => Self::Moderator,
            2 => Self::Editor,
            3 => Self::Administrator,
            _ => Self::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GroupOfficersEdit {
    pub admin_id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub level_old: GroupOfficerRole,
    #[serde(default)]
    pub level_new: GroupOfficerRole,
}

/// One changed community setting; values stay raw because their type depends on the field.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingChange {
    #[serde(default)]
    pub old_value: Value,
    #[serde(default)]
    pub new_value: Value,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupChangeSettings {
    pub user_id: i64,
    /// Keyed by setting name (`title`, `description`, `access`, `age_limits`, ...).
    #[serde(default)]
    pub changes: BTreeMap<String, SettingChange>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct GroupChangePhoto {
    pub user_id: i64,
    pub photo: Photo,
}
