//! VK community event ingestion.
//!
//! Two transports feed one stream: the Bots Long Poll API ([`LongPoller`]) and the
//! Callback API ([`CallbackPoller`]). Both implement [`Poller`]; a [`Bot`] resolves its
//! own identity, runs the configured poller and hands decoded [`Envelope`]s to the
//! consumer through one bounded channel that closes when the cancellation token fires.

#![allow(missing_docs)]

mod api;
mod bot;
mod callback;
mod config;
mod events;
mod longpoll;

pub use api::{
    ApiClient, ApiError, HttpApiClient, HttpApiClientConfig, VK_API_DEFAULT_BASE_URL,
    VK_API_DEFAULT_VERSION,
};
pub use bot::{
    Bot, BotConfig, BotError, BotHandle, DEFAULT_SHUTDOWN_GRACE_SECS, EventSink, Poller,
    SinkError,
};
pub use callback::{
    CALLBACK_ACK, CallbackApp, CallbackPoller, CallbackSourceConfig, DEFAULT_CALLBACK_PATH,
    ParseSourceError, SourceRegistry,
};
pub use config::{
    RuntimeSettings, VkRuntimeConfig, VkSettings, load_runtime_settings,
    load_runtime_settings_from_paths, runtime_settings_paths, set_config_home_override,
};
pub use events::{
    Attachment, Audio, BoardComment, BoardPost, BoardPostDelete, BoolInt, CONFIRMATION_KIND,
    Comment, DecodeError, Envelope, Event, Group, GroupChangePhoto, GroupChangeSettings,
    GroupJoin, GroupJoinType, GroupLeave, GroupOfficerRole, GroupOfficersEdit, Likes,
    MarketComment, MarketCommentDelete, Message, MessageAction, MessageAllow, MessageDeny,
    MessageTypingState, Photo, PhotoComment, PhotoCommentDelete, PhotoSize, PollVoteNew, Post,
    PostCounter, SettingChange, UserBlock, UserBlockReason, UserUnblock, Video, VideoComment,
    VideoCommentDelete, WallPost, WallReply, WallReplyDelete, decode_recognized, is_known_kind,
    known_kinds,
};
pub use longpoll::{
    AcquiredSession, DEFAULT_ERROR_RETRY_DELAY_MS, DEFAULT_LONG_POLL_WAIT_SECS, LongPollError,
    LongPollSession, LongPoller, PollOutcome,
};
