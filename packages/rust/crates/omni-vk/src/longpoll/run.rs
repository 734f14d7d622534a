use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::bot::{BotHandle, EventSink, Poller};

use super::{LongPollError, LongPoller, PollOutcome};

#[async_trait]
impl Poller for LongPoller {
    fn name(&self) -> &str {
        "longpoll"
    }

    async fn poll(&self, ctx: CancellationToken, bot: BotHandle, sink: EventSink) {
        // A previous run may still hold the session while its grace period runs out.
        let mut session = tokio::select! {
            biased;
            () = ctx.cancelled() => return,
            session = self.session.lock() => session,
        };
        tracing::info!(
            group_id = bot.group_id,
            wait_secs = self.wait.as_secs(),
            resume_ts = %session.ts(),
            "vk long poll listening for events"
        );
        'poll: loop {
            if ctx.is_cancelled() {
                break;
            }
            match self.poll_once(&ctx, &bot, &mut *session).await {
                Ok(PollOutcome::Retry { .. }) => {}
                Ok(PollOutcome::Batch { ts, envelopes }) => {
                    let total = envelopes.len();
                    for (index, envelope) in envelopes.into_iter().enumerate() {
                        if let Err(error) = sink.send(envelope).await {
                            tracing::warn!(
                                group_id = bot.group_id,
                                dropped = total - index,
                                error = %error,
                                "vk long poll batch not fully delivered; cursor not committed"
                            );
                            break 'poll;
                        }
                    }
                    session.commit(ts);
                }
                Err(LongPollError::Cancelled) => break,
                Err(error) => {
                    tracing::warn!(
                        group_id = bot.group_id,
                        error = %error,
                        retry_in_ms = self.error_retry_delay.as_millis(),
                        "vk long poll iteration failed"
                    );
                    tokio::select! {
                        () = ctx.cancelled() => break,
                        () = tokio::time::sleep(self.error_retry_delay) => {}
                    }
                }
            }
        }
        tracing::info!(group_id = bot.group_id, "vk long poll stopped");
    }
}
