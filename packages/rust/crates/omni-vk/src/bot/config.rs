use std::time::Duration;

pub const DEFAULT_SHUTDOWN_GRACE_SECS: u64 = 5;

#[derive(Debug, Clone, Copy)]
pub struct BotConfig {
    /// Community the bot runs as. Optional with a community access token, which
    /// `groups.getById` resolves on its own.
    pub group_id: Option<i64>,
    /// How long the closer task waits for the poller to return after cancellation.
    pub shutdown_grace: Duration,
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            group_id: None,
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
        }
    }
}
