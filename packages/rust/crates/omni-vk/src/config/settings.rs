//! Runtime settings loader for omni-vk.
//!
//! Loads and merges:
//! - System defaults: `<PRJ_ROOT>/packages/conf/settings.yaml`
//! - User overrides:  `<PRJ_CONFIG_HOME>/omni-dev-fusion/settings.yaml`
//!
//! Merge precedence is user over system.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use serde::Deserialize;

use crate::callback::CallbackSourceConfig;

const DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH: &str = "packages/conf/settings.yaml";
const DEFAULT_USER_SETTINGS_RELATIVE_PATH: &str = "omni-dev-fusion/settings.yaml";
const DEFAULT_CONFIG_HOME_RELATIVE_PATH: &str = ".config";
static CONFIG_HOME_OVERRIDE: OnceLock<PathBuf> = OnceLock::new();

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RuntimeSettings {
    #[serde(default)]
    pub vk: VkSettings,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct VkSettings {
    pub api_base_url: Option<String>,
    pub api_version: Option<String>,
    pub language: Option<String>,
    pub group_id: Option<i64>,
    /// `polling` or `callback`.
    pub mode: Option<String>,
    pub webhook_bind: Option<String>,
    pub webhook_path: Option<String>,
    /// Callback sources; a user file replaces the whole system list.
    pub sources: Option<Vec<CallbackSourceConfig>>,
    pub long_poll_wait_secs: Option<u64>,
    pub event_queue_capacity: Option<usize>,
    pub shutdown_grace_secs: Option<u64>,
    pub error_retry_delay_ms: Option<u64>,
}

impl RuntimeSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            vk: self.vk.merge(overlay.vk),
        }
    }
}

impl VkSettings {
    fn merge(self, overlay: Self) -> Self {
        Self {
            api_base_url: overlay.api_base_url.or(self.api_base_url),
            api_version: overlay.api_version.or(self.api_version),
            language: overlay.language.or(self.language),
            group_id: overlay.group_id.or(self.group_id),
            mode: overlay.mode.or(self.mode),
            webhook_bind: overlay.webhook_bind.or(self.webhook_bind),
            webhook_path: overlay.webhook_path.or(self.webhook_path),
            sources: overlay.sources.or(self.sources),
            long_poll_wait_secs: overlay.long_poll_wait_secs.or(self.long_poll_wait_secs),
            event_queue_capacity: overlay.event_queue_capacity.or(self.event_queue_capacity),
            shutdown_grace_secs: overlay.shutdown_grace_secs.or(self.shutdown_grace_secs),
            error_retry_delay_ms: overlay.error_retry_delay_ms.or(self.error_retry_delay_ms),
        }
    }
}

pub fn load_runtime_settings() -> RuntimeSettings {
    let (system_path, user_path) = runtime_settings_paths();
    load_runtime_settings_from_paths(&system_path, &user_path)
}

#[doc(hidden)]
pub fn runtime_settings_paths() -> (PathBuf, PathBuf) {
    let root = project_root();
    let system_path = root.join(DEFAULT_SYSTEM_SETTINGS_RELATIVE_PATH);
    let user_path = resolve_config_home(&root).join(DEFAULT_USER_SETTINGS_RELATIVE_PATH);
    (system_path, user_path)
}

#[doc(hidden)]
pub fn load_runtime_settings_from_paths(system: &Path, user: &Path) -> RuntimeSettings {
    [system, user]
        .into_iter()
        .filter_map(read_settings_file)
        .fold(RuntimeSettings::default(), RuntimeSettings::merge)
}

/// Missing files are silently skipped; unreadable or invalid ones are logged and skipped.
fn read_settings_file(path: &Path) -> Option<RuntimeSettings> {
    let raw = match std::fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(error) if error.kind() == std::io::ErrorKind::NotFound => return None,
        Err(error) => {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to read vk settings file; ignoring"
            );
            return None;
        }
    };
    serde_yaml::from_str::<RuntimeSettings>(&raw)
        .inspect_err(|error| {
            tracing::warn!(
                path = %path.display(),
                error = %error,
                "failed to parse vk settings yaml; ignoring file"
            );
        })
        .ok()
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn project_root() -> PathBuf {
    non_empty_env("PRJ_ROOT")
        .map(PathBuf::from)
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
}

/// Set config-home override (used by CLI `--conf`).
///
/// The path can be absolute, or relative to `PRJ_ROOT`/cwd.
pub fn set_config_home_override(path: impl Into<PathBuf>) {
    let path = path.into();
    if path.as_os_str().is_empty() {
        return;
    }
    if CONFIG_HOME_OVERRIDE.set(path.clone()).is_err()
        && let Some(current) = CONFIG_HOME_OVERRIDE.get()
        && current != &path
    {
        tracing::warn!(
            current = %current.display(),
            ignored = %path.display(),
            "config home override already set; ignoring subsequent value"
        );
    }
}

fn resolve_config_home(project_root: &Path) -> PathBuf {
    let configured = CONFIG_HOME_OVERRIDE.get().cloned().unwrap_or_else(|| {
        PathBuf::from(
            non_empty_env("PRJ_CONFIG_HOME")
                .unwrap_or_else(|| DEFAULT_CONFIG_HOME_RELATIVE_PATH.to_string()),
        )
    });
    if configured.is_absolute() {
        configured
    } else {
        project_root.join(configured)
    }
}
