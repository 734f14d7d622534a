use std::sync::Arc;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::api::ApiClient;

use super::EventSink;

/// What a poller sees of the bot it runs for.
#[derive(Clone)]
pub struct BotHandle {
    pub api: Arc<dyn ApiClient>,
    pub group_id: i64,
}

impl std::fmt::Debug for BotHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotHandle")
            .field("group_id", &self.group_id)
            .finish_non_exhaustive()
    }
}

/// Event transport: runs until `ctx` is cancelled, pushing decoded envelopes into `sink`.
///
/// Implementations must stop sending as soon as `ctx` is cancelled; the orchestrator
/// closes the channel behind the sink right after.
#[async_trait]
pub trait Poller: Send + Sync + 'static {
    /// Short transport label for logs (`longpoll`, `callback`).
    fn name(&self) -> &str;

    async fn poll(&self, ctx: CancellationToken, bot: BotHandle, sink: EventSink);
}
