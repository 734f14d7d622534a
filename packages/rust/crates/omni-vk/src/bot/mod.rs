//! Orchestrator: self identity, the transport-agnostic `Poller` seam and the merged
//! consumer channel.

mod config;
mod error;
mod identity;
mod orchestrator;
mod poller;
mod polling;
mod sink;

pub use config::{BotConfig, DEFAULT_SHUTDOWN_GRACE_SECS};
pub use error::BotError;
pub use orchestrator::Bot;
pub use poller::{BotHandle, Poller};
pub use sink::{EventSink, SinkError};
