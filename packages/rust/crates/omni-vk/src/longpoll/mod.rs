//! Bots Long Poll API client: credential lifecycle, `a_check` requests, `failed` code
//! recovery and the poll loop.

mod constants;
mod error;
mod poller;
mod response;
mod run;
mod session;

pub use constants::{DEFAULT_ERROR_RETRY_DELAY_MS, DEFAULT_LONG_POLL_WAIT_SECS};
pub use error::LongPollError;
pub use poller::{LongPoller, PollOutcome};
pub use session::{AcquiredSession, LongPollSession};
