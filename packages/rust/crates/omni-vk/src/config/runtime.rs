//! VK ingestion runtime knobs (queueing, long-poll wait, shutdown grace, error back-off).

use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use crate::bot::DEFAULT_SHUTDOWN_GRACE_SECS;
use crate::longpoll::{DEFAULT_ERROR_RETRY_DELAY_MS, DEFAULT_LONG_POLL_WAIT_SECS};

use super::{VkSettings, load_runtime_settings};

const DEFAULT_EVENT_QUEUE_CAPACITY: usize = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VkRuntimeConfig {
    pub event_queue_capacity: usize,
    pub long_poll_wait_secs: u64,
    pub shutdown_grace_secs: u64,
    pub error_retry_delay_ms: u64,
}

impl Default for VkRuntimeConfig {
    fn default() -> Self {
        Self {
            event_queue_capacity: DEFAULT_EVENT_QUEUE_CAPACITY,
            long_poll_wait_secs: DEFAULT_LONG_POLL_WAIT_SECS,
            shutdown_grace_secs: DEFAULT_SHUTDOWN_GRACE_SECS,
            error_retry_delay_ms: DEFAULT_ERROR_RETRY_DELAY_MS,
        }
    }
}

impl VkRuntimeConfig {
    pub fn from_env() -> Self {
        let settings = load_runtime_settings();
        Self::from_lookup(|name| std::env::var(name).ok(), Some(&settings.vk))
    }

    /// Resolves against already loaded settings (the binary loads them once).
    pub fn from_settings(settings: &VkSettings) -> Self {
        Self::from_lookup(|name| std::env::var(name).ok(), Some(settings))
    }

    #[doc(hidden)]
    pub fn from_lookup_for_test<F>(lookup: F, settings: Option<&VkSettings>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self::from_lookup(lookup, settings)
    }

    fn from_lookup<F>(lookup: F, settings: Option<&VkSettings>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            event_queue_capacity: resolve_positive(
                &lookup,
                "OMNI_VK_EVENT_QUEUE_CAPACITY",
                settings.and_then(|s| s.event_queue_capacity),
                defaults.event_queue_capacity,
            ),
            long_poll_wait_secs: resolve_positive(
                &lookup,
                "OMNI_VK_LONG_POLL_WAIT_SECS",
                settings.and_then(|s| s.long_poll_wait_secs),
                defaults.long_poll_wait_secs,
            ),
            shutdown_grace_secs: resolve_positive(
                &lookup,
                "OMNI_VK_SHUTDOWN_GRACE_SECS",
                settings.and_then(|s| s.shutdown_grace_secs),
                defaults.shutdown_grace_secs,
            ),
            error_retry_delay_ms: resolve_positive(
                &lookup,
                "OMNI_VK_ERROR_RETRY_DELAY_MS",
                settings.and_then(|s| s.error_retry_delay_ms),
                defaults.error_retry_delay_ms,
            ),
        }
    }

    pub fn long_poll_wait(&self) -> Duration {
        Duration::from_secs(self.long_poll_wait_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_secs(self.shutdown_grace_secs)
    }

    pub fn error_retry_delay(&self) -> Duration {
        Duration::from_millis(self.error_retry_delay_ms)
    }
}

/// Env var over settings over default. Zero or unparsable values are logged and skipped.
fn resolve_positive<T, F>(lookup: &F, env_var: &str, setting_value: Option<T>, default: T) -> T
where
    T: FromStr + Copy + Default + PartialEq + Display,
    F: Fn(&str) -> Option<String>,
{
    let zero = T::default();
    if let Some(raw) = lookup(env_var) {
        match raw.trim().parse::<T>() {
            Ok(value) if value != zero => return value,
            _ => tracing::warn!(
                env_var,
                value = %raw,
                "invalid vk runtime env value; using settings/default"
            ),
        }
    }
    match setting_value {
        Some(value) if value != zero => value,
        Some(value) => {
            tracing::warn!(
                setting = env_var,
                value = %value,
                default = %default,
                "invalid vk runtime settings value; using default"
            );
            default
        }
        None => default,
    }
}
