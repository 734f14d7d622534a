use std::sync::Arc;
use std::time::Duration;

use reqwest::Url;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;

use crate::bot::BotHandle;
use crate::events::{Envelope, decode_recognized};

use super::constants::{
    DEFAULT_ERROR_RETRY_DELAY_MS, DEFAULT_LONG_POLL_WAIT_SECS, LONG_POLL_FAILED_OK,
    LONG_POLL_REQUEST_TIMEOUT_SLACK_SECS,
};
use super::response::{LongPollResponse, LongPollServerResponse};
use super::{AcquiredSession, LongPollError, LongPollSession};

/// Result of one `a_check` round trip.
#[derive(Debug, Clone, PartialEq)]
pub enum PollOutcome {
    /// Decoded, recognized envelopes in server order plus the cursor to commit once they
    /// have been handed off.
    Batch { ts: String, envelopes: Vec<Envelope> },
    /// A recoverable `failed` code (1..=3) was applied to the session; poll again.
    Retry { failed: i64 },
}

/// Bots Long Poll API transport.
///
/// The session lives as long as the poller, and clones share it: a later `poll` call
/// resumes from the last committed cursor, so an undelivered batch is fetched again.
#[derive(Debug, Clone)]
pub struct LongPoller {
    pub(super) wait: Duration,
    pub(super) error_retry_delay: Duration,
    pub(super) session: Arc<Mutex<LongPollSession>>,
}

impl Default for LongPoller {
    fn default() -> Self {
        Self {
            wait: Duration::from_secs(DEFAULT_LONG_POLL_WAIT_SECS),
            error_retry_delay: Duration::from_millis(DEFAULT_ERROR_RETRY_DELAY_MS),
            session: Arc::default(),
        }
    }
}

impl LongPoller {
    /// `wait` is sent to the server as whole seconds.
    pub fn new(wait: Duration) -> Self {
        Self {
            wait,
            ..Self::default()
        }
    }

    /// Back-off after a failed iteration before polling again.
    #[must_use]
    pub fn with_error_retry_delay(mut self, delay: Duration) -> Self {
        self.error_retry_delay = delay;
        self
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn error_retry_delay(&self) -> Duration {
        self.error_retry_delay
    }

    /// Snapshot of the session; waits while a `poll` call holds it.
    pub async fn session(&self) -> LongPollSession {
        self.session.lock().await.clone()
    }

    /// Calls `groups.getLongPollServer` and installs the result into `session`.
    pub async fn acquire_session(
        &self,
        ctx: &CancellationToken,
        bot: &BotHandle,
        session: &mut LongPollSession,
    ) -> Result<(), LongPollError> {
        let params = [("group_id", bot.group_id.to_string())];
        let response = tokio::select! {
            biased;
            () = ctx.cancelled() => return Err(LongPollError::Cancelled),
            response = bot.api.request("groups.getLongPollServer", &params) => response?,
        };
        let acquired: LongPollServerResponse = serde_json::from_value(response)?;
        let server =
            Url::parse(&acquired.server).map_err(|error| LongPollError::InvalidServer {
                server: acquired.server.clone(),
                reason: error.to_string(),
            })?;
        tracing::debug!(
            group_id = bot.group_id,
            server = %server,
            ts = %acquired.ts,
            "vk long poll session acquired"
        );
        session.adopt(AcquiredSession {
            key: acquired.key,
            server,
            ts: acquired.ts,
        });
        Ok(())
    }

    /// One poll iteration. Acquires credentials first when the session is not active.
    ///
    /// The cursor is NOT committed on a batch; the caller commits after hand-off.
    pub async fn poll_once(
        &self,
        ctx: &CancellationToken,
        bot: &BotHandle,
        session: &mut LongPollSession,
    ) -> Result<PollOutcome, LongPollError> {
        if !session.is_active() {
            self.acquire_session(ctx, bot, session).await?;
        }
        let url = self.check_url(session)?;

        let request = bot
            .api
            .http_client()
            .get(url)
            .timeout(self.wait + Duration::from_secs(LONG_POLL_REQUEST_TIMEOUT_SLACK_SECS));
        let body = tokio::select! {
            biased;
            () = ctx.cancelled() => return Err(LongPollError::Cancelled),
            body = async {
                let resp = request.send().await?;
                let status = resp.status();
                if !status.is_success() {
                    return Err(LongPollError::Http { status });
                }
                Ok::<_, LongPollError>(resp.bytes().await?)
            } => body?,
        };
        let response: LongPollResponse = serde_json::from_slice(&body)?;

        if response.failed != LONG_POLL_FAILED_OK {
            session.apply_failure(response.failed, response.ts.as_deref())?;
            tracing::debug!(
                group_id = bot.group_id,
                failed = response.failed,
                "vk long poll recoverable failure applied"
            );
            return Ok(PollOutcome::Retry {
                failed: response.failed,
            });
        }

        let ts = response
            .ts
            .filter(|ts| !ts.is_empty())
            .unwrap_or_else(|| session.ts().to_string());
        let envelopes = decode_updates(bot.group_id, response.updates);
        Ok(PollOutcome::Batch { ts, envelopes })
    }

    fn check_url(&self, session: &LongPollSession) -> Result<Url, LongPollError> {
        let Some(server) = session.server() else {
            return Err(LongPollError::InvalidServer {
                server: String::new(),
                reason: "session has no server".to_string(),
            });
        };
        let mut url = server.clone();
        url.set_query(None);
        url.query_pairs_mut()
            .append_pair("act", "a_check")
            .append_pair("key", session.key())
            .append_pair("ts", session.ts())
            .append_pair("wait", &self.wait.as_secs().to_string());
        Ok(url)
    }
}

fn decode_updates(group_id: i64, updates: Vec<serde_json::Value>) -> Vec<Envelope> {
    let mut envelopes = Vec::with_capacity(updates.len());
    for update in updates {
        match decode_recognized(update) {
            Ok(Some(envelope)) => envelopes.push(envelope),
            Ok(None) => {}
            Err(error) => tracing::warn!(
                group_id,
                kind = ?error.kind(),
                error = %error,
                "dropping malformed long poll update"
            ),
        }
    }
    envelopes
}
