//! Event envelope decoding: one JSON notification → `Envelope { group_id, secret, event }`.
//!
//! The `type` discriminator is resolved through a static registry (see `registry.rs`);
//! unknown discriminators decode to [`Event::Unrecognized`] so new upstream event kinds
//! never break ingestion.

mod bool_int;
mod envelope;
mod error;
mod event;
mod objects;
mod payloads;
mod registry;

pub use bool_int::BoolInt;
pub use envelope::{Envelope, decode_recognized};
pub use error::DecodeError;
pub use event::Event;
pub use objects::{
    Attachment, Audio, BoardComment, Comment, Group, Likes, Message, MessageAction, Photo,
    PhotoSize, Post, PostCounter, Video,
};
pub use payloads::{
    BoardPost, BoardPostDelete, GroupChangePhoto, GroupChangeSettings, GroupJoin, GroupJoinType,
    GroupLeave, GroupOfficerRole, GroupOfficersEdit, MarketComment, MarketCommentDelete,
    MessageAllow, MessageDeny, MessageTypingState, PhotoComment, PhotoCommentDelete, PollVoteNew,
    SettingChange, UserBlock, UserBlockReason, UserUnblock, VideoComment, VideoCommentDelete,
    WallPost, WallReply, WallReplyDelete,
};
pub use registry::{CONFIRMATION_KIND, is_known_kind, known_kinds};
