use serde_json::Value;

use super::{
    Audio, BoardPost, BoardPostDelete, GroupChangePhoto, GroupChangeSettings, GroupJoin,
    GroupLeave, GroupOfficersEdit, MarketComment, MarketCommentDelete, Message, MessageAllow,
    MessageDeny, MessageTypingState, Photo, PhotoComment, PhotoCommentDelete, PollVoteNew,
    UserBlock, UserUnblock, Video, VideoComment, VideoCommentDelete, WallPost, WallReply,
    WallReplyDelete,
};

/// Closed set of community events, one variant per discriminator.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// Callback API handshake; answered with the source's confirmation string.
    Confirmation,
    MessageNew(Message),
    MessageReply(Message),
    MessageEdit(Message),
    MessageAllow(MessageAllow),
    MessageDeny(MessageDeny),
    MessageTypingState(MessageTypingState),
    PhotoNew(Photo),
    PhotoCommentNew(PhotoComment),
    PhotoCommentEdit(PhotoComment),
    PhotoCommentRestore(PhotoComment),
    PhotoCommentDelete(PhotoCommentDelete),
    AudioNew(Audio),
    VideoNew(Video),
    VideoCommentNew(VideoComment),
    VideoCommentEdit(VideoComment),
    VideoCommentRestore(VideoComment),
    VideoCommentDelete(VideoCommentDelete),
    WallPostNew(WallPost),
    WallRepost(WallPost),
    WallReplyNew(WallReply),
    WallReplyEdit(WallReply),
    WallReplyRestore(WallReply),
    WallReplyDelete(WallReplyDelete),
    BoardPostNew(BoardPost),
    BoardPostEdit(BoardPost),
    BoardPostRestore(BoardPost),
    BoardPostDelete(BoardPostDelete),
    MarketCommentNew(MarketComment),
    MarketCommentEdit(MarketComment),
    MarketCommentRestore(MarketComment),
    MarketCommentDelete(MarketCommentDelete),
    GroupLeave(GroupLeave),
    GroupJoin(GroupJoin),
    UserBlock(UserBlock),
    UserUnblock(UserUnblock),
    PollVoteNew(PollVoteNew),
    GroupOfficersEdit(GroupOfficersEdit),
    GroupChangeSettings(GroupChangeSettings),
    GroupChangePhoto(GroupChangePhoto),
    /// Shape is not documented upstream; the object is kept raw.
    LeadFormsNew(Value),
    /// Shape is not documented upstream; the object is kept raw.
    VkPayTransaction(Value),
    /// Discriminator outside the registry. Never delivered to consumers.
    Unrecognized(String),
}

impl Event {
    /// Wire discriminator of this event (`message_new`, `confirmation`, ...).
    pub fn kind(&self) -> &str {
        match self {
            Self::Confirmation => "confirmation",
            Self::MessageNew(_) => "message_new",
            Self::MessageReply(_) => "message_reply",
            Self::MessageEdit(_) => "message_edit",
            Self::MessageAllow(_) => "message_allow",
            Self::MessageDeny(_) => "message_deny",
            Self::MessageTypingState(_) => "message_typing_state",
            Self::PhotoNew(_) => "photo_new",
            Self::PhotoCommentNew(_) => "photo_comment_new",
            Self::PhotoCommentEdit(_) => "photo_comment_edit",
            Self::PhotoCommentRestore(_) => "photo_comment_restore",
            Self::PhotoCommentDelete(_) => "photo_comment_delete",
            Self::AudioNew(_) => "audio_new",
            Self::VideoNew(_) => "video_new",
            Self::VideoCommentNew(_) => "video_comment_new",
            Self::VideoCommentEdit(_) => "video_comment_edit",
            Self::VideoCommentRestore(_) => "video_comment_restore",
            Self::VideoCommentDelete(_) => "video_comment_delete",
            Self::WallPostNew(_) => "wall_post_new",
            Self::WallRepost(_) => "wall_repost",
            Self::WallReplyNew(_) => "wall_reply_new",
            Self::WallReplyEdit(_) => "wall_reply_edit",
            Self::WallReplyRestore(_) => "wall_reply_restore",
            Self::WallReplyDelete(_) => "wall_reply_delete",
            Self::BoardPostNew(_) => "board_post_new",
            Self::BoardPostEdit(_) => "board_post_edit",
            Self::BoardPostRestore(_) => "board_post_restore",
            Self::BoardPostDelete(_) => "board_post_delete",
            Self::MarketCommentNew(_) => "market_comment_new",
            Self::MarketCommentEdit(_) => "market_comment_edit",
            Self::MarketCommentRestore(_) => "market_comment_restore",
            Self::MarketCommentDelete(_) => "market_comment_delete",
            Self::GroupLeave(_) => "group_leave",
            Self::GroupJoin(_) => "group_join",
            Self::UserBlock(_) => "user_block",
            Self::UserUnblock(_) => "user_unblock",
            Self::PollVoteNew(_) => "poll_vote_new",
            Self::GroupOfficersEdit(_) => "group_officers_edit",
            Self::GroupChangeSettings(_) => "group_change_settings",
            Self::GroupChangePhoto(_) => "group_change_photo",
            Self::LeadFormsNew(_) => "lead_forms_new",
            Self::VkPayTransaction(_) => "vkpay_transaction",
            Self::Unrecognized(kind) => kind,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, Self::Unrecognized(_))
    }

    pub fn is_confirmation(&self) -> bool {
        matches!(self, Self::Confirmation)
    }
}
