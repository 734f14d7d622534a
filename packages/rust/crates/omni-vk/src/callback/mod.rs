//! Callback API receiver: an axum endpoint VK pushes envelopes to.

mod app;
mod builder;
mod config;
mod handler;
mod path;
mod poller;
mod registry;
mod server;
mod state;

pub use app::CallbackApp;
pub use config::{CallbackSourceConfig, ParseSourceError};
pub use path::DEFAULT_CALLBACK_PATH;
pub use poller::CallbackPoller;
pub use registry::SourceRegistry;

/// Body VK expects for every delivered non-handshake notification.
pub const CALLBACK_ACK: &str = "ok";
