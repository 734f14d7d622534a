use std::sync::Arc;

use thiserror::Error;
use tokio::sync::{RwLock, mpsc};
use tokio_util::sync::CancellationToken;

use crate::events::Envelope;

#[derive(Debug, Error)]
pub enum SinkError {
    /// Cancellation is in progress; the envelope is dropped.
    #[error("event sink cancelled; envelope dropped")]
    Cancelled,

    /// The channel was closed by the orchestrator or its receiver went away.
    #[error("event sink closed; envelope dropped")]
    Closed,

    /// Only returned by [`EventSink::try_send`]; hands the envelope back.
    #[error("event queue is full")]
    Full(Box<Envelope>),
}

/// Cancellation-aware writer shared by every producer task of one `start_polling` call.
///
/// Clones share one sender slot. [`EventSink::close`] empties the slot, which closes the
/// consumer channel once every in-flight send has observed cancellation.
#[derive(Clone)]
pub struct EventSink {
    tx: Arc<RwLock<Option<mpsc::Sender<Envelope>>>>,
    ctx: CancellationToken,
}

impl EventSink {
    pub(crate) fn new(tx: mpsc::Sender<Envelope>, ctx: CancellationToken) -> Self {
        Self {
            tx: Arc::new(RwLock::new(Some(tx))),
            ctx,
        }
    }

    /// Waits for queue capacity, giving up as soon as `ctx` is cancelled.
    pub async fn send(&self, envelope: Envelope) -> Result<(), SinkError> {
        if self.ctx.is_cancelled() {
            return Err(SinkError::Cancelled);
        }
        let guard = self.tx.read().await;
        let Some(tx) = guard.as_ref() else {
            return Err(SinkError::Closed);
        };
        tokio::select! {
            biased;
            () = self.ctx.cancelled() => Err(SinkError::Cancelled),
            result = tx.send(envelope) => result.map_err(|_| SinkError::Closed),
        }
    }

    /// Enqueues without waiting; a full queue returns the envelope in [`SinkError::Full`].
    pub fn try_send(&self, envelope: Envelope) -> Result<(), SinkError> {
        if self.ctx.is_cancelled() {
            return Err(SinkError::Cancelled);
        }
        // Lock contention only happens while `close` runs.
        let Ok(guard) = self.tx.try_read() else {
            return Err(SinkError::Closed);
        };
        let Some(tx) = guard.as_ref() else {
            return Err(SinkError::Closed);
        };
        tx.try_send(envelope).map_err(|error| match error {
            mpsc::error::TrySendError::Full(envelope) => SinkError::Full(Box::new(envelope)),
            mpsc::error::TrySendError::Closed(_) => SinkError::Closed,
        })
    }

    pub fn cancellation(&self) -> &CancellationToken {
        &self.ctx
    }

    pub async fn is_closed(&self) -> bool {
        self.tx.read().await.as_ref().is_none_or(mpsc::Sender::is_closed)
    }

    /// Drops the sender. Returns `false` when it was already closed.
    pub(crate) async fn close(&self) -> bool {
        self.tx.write().await.take().is_some()
    }
}

impl std::fmt::Debug for EventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventSink")
            .field("cancelled", &self.ctx.is_cancelled())
            .finish_non_exhaustive()
    }
}
