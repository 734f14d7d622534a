use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use omni_vk::CallbackSourceConfig;

#[derive(Parser)]
#[command(name = "omni-vk")]
#[command(about = "VK community event listener: Bots Long Poll or Callback API.")]
pub(crate) struct Cli {
    /// Override config directory (settings are read from `<conf>/omni-dev-fusion/settings.yaml`).
    #[arg(long, global = true)]
    pub(crate) conf: Option<PathBuf>,

    #[command(subcommand)]
    pub(crate) command: Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum ListenMode {
    Polling,
    Callback,
}

impl ListenMode {
    pub(crate) fn from_setting(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "polling" | "longpoll" => Some(Self::Polling),
            "callback" | "webhook" => Some(Self::Callback),
            _ => None,
        }
    }
}

#[derive(Subcommand)]
pub(crate) enum Command {
    /// Start a bot and log every event it receives until Ctrl+C.
    Listen {
        /// Community access token (default: `VK_ACCESS_TOKEN` env var).
        #[arg(long)]
        token: Option<String>,

        /// Community id; optional with a community token.
        #[arg(long)]
        group_id: Option<i64>,

        /// Event transport (default: settings `vk.mode`, else polling).
        #[arg(long, value_enum)]
        mode: Option<ListenMode>,

        /// Callback listen address (default: settings `vk.webhook_bind`, else 0.0.0.0:8080)
        #[arg(long)]
        bind: Option<String>,

        /// Callback route path (default: /vk/callback)
        #[arg(long)]
        path: Option<String>,

        /// Callback source as GROUP_ID:SECRET:CONFIRMATION (repeatable)
        #[arg(long = "source")]
        sources: Vec<CallbackSourceConfig>,

        /// Reply to every new message with its own text.
        #[arg(long)]
        echo: bool,

        /// Debug logging (ignored when RUST_LOG is set).
        #[arg(long, short = 'v')]
        verbose: bool,
    },
}
