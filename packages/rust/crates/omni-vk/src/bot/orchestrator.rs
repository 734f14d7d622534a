use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use crate::api::{ApiClient, ApiError};
use crate::events::Group;

use super::identity::fetch_identity;
use super::{BotConfig, BotError, Poller};

/// A community bot: resolved identity, the configured poller and the API it calls through.
///
/// `Bot` is itself an [`ApiClient`], so endpoint helpers can be driven through it.
pub struct Bot<P: Poller> {
    pub(super) api: Arc<dyn ApiClient>,
    pub(super) poller: Arc<P>,
    pub(super) config: BotConfig,
    pub(super) group_id: AtomicI64,
    me: RwLock<Group>,
}

impl<P: Poller> Bot<P> {
    /// Resolves self identity through `groups.getById` before returning.
    pub async fn new(
        api: Arc<dyn ApiClient>,
        poller: P,
        config: BotConfig,
    ) -> Result<Self, BotError> {
        let me = fetch_identity(api.as_ref(), config.group_id).await?;
        tracing::info!(
            group_id = me.id,
            name = %me.name,
            poller = poller.name(),
            "vk bot identity resolved"
        );
        Ok(Self {
            api,
            poller: Arc::new(poller),
            config,
            group_id: AtomicI64::new(me.id),
            me: RwLock::new(me),
        })
    }

    /// Cached identity; never hits the network.
    pub async fn me(&self) -> Group {
        self.me.read().await.clone()
    }

    /// Re-fetches identity and replaces the cache. Concurrent refreshes are serialized.
    pub async fn refresh_me(&self) -> Result<Group, BotError> {
        let mut me = self.me.write().await;
        let fresh = fetch_identity(self.api.as_ref(), Some(me.id)).await?;
        if fresh.id != me.id {
            tracing::warn!(
                previous = me.id,
                current = fresh.id,
                "vk bot identity changed on refresh"
            );
        }
        self.group_id.store(fresh.id, Ordering::Release);
        *me = fresh.clone();
        Ok(fresh)
    }

    pub fn group_id(&self) -> i64 {
        self.group_id.load(Ordering::Acquire)
    }

    pub fn api(&self) -> &Arc<dyn ApiClient> {
        &self.api
    }

    pub fn poller(&self) -> &P {
        &self.poller
    }

    pub fn config(&self) -> &BotConfig {
        &self.config
    }
}

#[async_trait]
impl<P: Poller> ApiClient for Bot<P> {
    async fn request(&self, method: &str, params: &[(&str, String)]) -> Result<Value, ApiError> {
        self.api.request(method, params).await
    }

    fn http_client(&self) -> &reqwest::Client {
        self.api.http_client()
    }
}
