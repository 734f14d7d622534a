use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::events::Envelope;

use super::{Bot, BotHandle, EventSink, Poller};

impl<P: Poller> Bot<P> {
    /// Starts the poller in the background and returns the consumer end of the channel.
    ///
    /// The channel closes once `ctx` is cancelled. A `capacity` of 0 is raised to 1.
    /// Must be called from within a tokio runtime.
    pub fn start_polling(&self, ctx: CancellationToken, capacity: usize) -> mpsc::Receiver<Envelope> {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let sink = EventSink::new(tx, ctx.clone());
        let handle = BotHandle {
            api: Arc::clone(&self.api),
            group_id: self.group_id(),
        };

        let poller = Arc::clone(&self.poller);
        let poller_name = poller.name().to_string();
        tracing::info!(
            poller = %poller_name,
            group_id = handle.group_id,
            capacity = capacity.max(1),
            "vk bot polling started"
        );
        let poll_task = {
            let ctx = ctx.clone();
            let sink = sink.clone();
            tokio::spawn(async move { poller.poll(ctx, handle, sink).await })
        };
        tokio::spawn(close_on_cancel(
            ctx,
            sink,
            poll_task,
            self.config.shutdown_grace,
            poller_name,
        ));
        rx
    }
}

async fn close_on_cancel(
    ctx: CancellationToken,
    sink: EventSink,
    mut poll_task: JoinHandle<()>,
    shutdown_grace: Duration,
    poller_name: String,
) {
    ctx.cancelled().await;
    sink.close().await;
    tracing::debug!(poller = %poller_name, "vk event channel closed");

    match tokio::time::timeout(shutdown_grace, &mut poll_task).await {
        Ok(Ok(())) => tracing::info!(poller = %poller_name, "vk poller stopped"),
        Ok(Err(error)) => {
            tracing::error!(poller = %poller_name, error = %error, "vk poller task failed");
        }
        Err(_) => {
            tracing::warn!(
                poller = %poller_name,
                grace_ms = shutdown_grace.as_millis(),
                "vk poller did not stop within shutdown grace; aborting"
            );
            poll_task.abort();
        }
    }
}
