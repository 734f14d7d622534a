//! Config namespace: YAML runtime settings and env-resolved runtime knobs.

mod runtime;
mod settings;

pub use runtime::VkRuntimeConfig;
pub use settings::{
    RuntimeSettings, VkSettings, load_runtime_settings, load_runtime_settings_from_paths,
    runtime_settings_paths, set_config_home_override,
};
