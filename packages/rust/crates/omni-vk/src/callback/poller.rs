use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::bot::{BotHandle, DEFAULT_SHUTDOWN_GRACE_SECS, EventSink, Poller};

use super::app::CallbackApp;
use super::builder::build_callback_app;
use super::server::{log_server_exit, start_callback_server, stop_callback_server};
use super::state::{Attachment, AttachmentSlot};
use super::{CallbackSourceConfig, DEFAULT_CALLBACK_PATH, SourceRegistry};

/// Callback API transport.
///
/// With a `listen` address the poller binds and serves its own endpoint. Without one,
/// mount [`CallbackPoller::app`] into an existing server; requests are forwarded only
/// while `poll` runs.
#[derive(Clone)]
pub struct CallbackPoller {
    listen: Option<String>,
    path: String,
    sources: Arc<SourceRegistry>,
    shutdown_grace: Duration,
    attachment: AttachmentSlot,
}

impl CallbackPoller {
    pub fn new(sources: impl IntoIterator<Item = CallbackSourceConfig>) -> Self {
        Self {
            listen: None,
            path: DEFAULT_CALLBACK_PATH.to_string(),
            sources: Arc::new(SourceRegistry::new(sources)),
            shutdown_grace: Duration::from_secs(DEFAULT_SHUTDOWN_GRACE_SECS),
            attachment: AttachmentSlot::default(),
        }
    }

    #[must_use]
    pub fn with_listen(mut self, addr: impl Into<String>) -> Self {
        self.listen = Some(addr.into());
        self
    }

    #[must_use]
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = path.into();
        self
    }

    /// How long in-flight requests may drain after cancellation. The bot's own
    /// `shutdown_grace` still caps the whole `poll` call.
    #[must_use]
    pub fn with_shutdown_grace(mut self, grace: Duration) -> Self {
        self.shutdown_grace = grace;
        self
    }

    pub fn listen(&self) -> Option<&str> {
        self.listen.as_deref()
    }

    pub fn sources(&self) -> &SourceRegistry {
        &self.sources
    }

    /// Whether a running `poll` call is attached, i.e. events are being forwarded.
    pub fn is_receiving(&self) -> bool {
        self.attachment.is_attached()
    }

    /// Address the poller's own server is bound to, once it is listening.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.attachment.get().and_then(|attachment| attachment.local_addr)
    }

    /// Router bound to this poller; cheap to build, every copy shares the same attachment.
    pub fn app(&self) -> CallbackApp {
        build_callback_app(
            Arc::clone(&self.sources),
            &self.path,
            self.attachment.clone(),
        )
    }
}

#[async_trait]
impl Poller for CallbackPoller {
    fn name(&self) -> &str {
        "callback"
    }

    async fn poll(&self, ctx: CancellationToken, bot: BotHandle, sink: EventSink) {
        // Detaches and cuts off unfinished requests on every exit, abort included.
        let _attached = self.attachment.attach(Attachment {
            sink,
            stop: CancellationToken::new(),
            local_addr: None,
        });
        let callback = self.app();
        tracing::info!(
            group_id = bot.group_id,
            sources = self.sources.len(),
            path = %callback.path,
            listen = ?self.listen,
            "vk callback receiver ready"
        );

        let Some(listen) = self.listen.as_deref() else {
            ctx.cancelled().await;
            return;
        };
        match start_callback_server(listen, callback.app, ctx.clone()).await {
            Ok(mut server) => {
                self.attachment.set_local_addr(server.local_addr);
                tracing::info!(addr = %server.local_addr, "vk callback server listening");
                let exited_early = tokio::select! {
                    () = ctx.cancelled() => None,
                    result = &mut server.task => Some(result),
                };
                match exited_early {
                    None => stop_callback_server(server, self.shutdown_grace).await,
                    Some(result) => log_server_exit(server.local_addr, result),
                }
            }
            Err(error) => {
                tracing::error!(addr = %listen, error = %error, "vk callback server bind failed");
            }
        }
    }
}
