use std::net::SocketAddr;
use std::sync::{Arc, PoisonError, RwLock};

use tokio_util::sync::CancellationToken;

use crate::bot::EventSink;

use super::SourceRegistry;

/// What a running `poll` call lends the endpoint.
#[derive(Debug, Clone)]
pub(super) struct Attachment {
    pub(super) sink: EventSink,
    /// Fires once the drain window is over; requests still reading their body give up.
    pub(super) stop: CancellationToken,
    pub(super) local_addr: Option<SocketAddr>,
}

/// Attachment of the running `poll` call; empty while the poller is not running.
#[derive(Debug, Clone, Default)]
pub(super) struct AttachmentSlot(Arc<RwLock<Option<Attachment>>>);

impl AttachmentSlot {
    pub(super) fn get(&self) -> Option<Attachment> {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    pub(super) fn is_attached(&self) -> bool {
        self.0
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }

    /// Installs `attachment` and returns a guard that detaches it when dropped, including
    /// when the `poll` future is aborted.
    pub(super) fn attach(&self, attachment: Attachment) -> AttachGuard {
        let stop = attachment.stop.clone();
        *self.0.write().unwrap_or_else(PoisonError::into_inner) = Some(attachment);
        AttachGuard {
            slot: self.clone(),
            stop,
        }
    }

    pub(super) fn set_local_addr(&self, addr: SocketAddr) {
        if let Some(attachment) = self
            .0
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .as_mut()
        {
            attachment.local_addr = Some(addr);
        }
    }

    fn detach(&self) {
        self.0.write().unwrap_or_else(PoisonError::into_inner).take();
    }
}

pub(super) struct AttachGuard {
    slot: AttachmentSlot,
    stop: CancellationToken,
}

impl Drop for AttachGuard {
    fn drop(&mut self) {
        self.slot.detach();
        self.stop.cancel();
    }
}

#[derive(Clone)]
pub(super) struct CallbackState {
    pub(super) sources: Arc<SourceRegistry>,
    pub(super) attachment: AttachmentSlot,
}
