//! omni-vk CLI: run a community bot over Bots Long Poll or the Callback API and log events.
//!
//! Logging: set `RUST_LOG=omni_vk=info` (or `warn`, `debug`) to see logs on stderr.

mod cli;

use std::sync::Arc;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::EnvFilter;

use omni_vk::{
    ApiClient, ApiError, Bot, BotConfig, CallbackPoller, DEFAULT_CALLBACK_PATH, Event,
    HttpApiClient, HttpApiClientConfig, LongPoller, Message, Poller, VkRuntimeConfig,
    load_runtime_settings, set_config_home_override,
};

use crate::cli::{Cli, Command, ListenMode};

const DEFAULT_CALLBACK_BIND: &str = "0.0.0.0:8080";
const ACCESS_TOKEN_ENV: &str = "VK_ACCESS_TOKEN";

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    if let Some(conf_dir) = cli.conf.clone() {
        set_config_home_override(conf_dir);
    }
    let Command::Listen {
        token,
        group_id,
        mode,
        bind,
        path,
        sources,
        echo,
        verbose,
    } = cli.command;

    // RUST_LOG overrides; --verbose => debug; else info
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose {
            "omni_vk=debug"
        } else {
            "omni_vk=info"
        })
    });
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();

    let vk = load_runtime_settings().vk;
    let runtime = VkRuntimeConfig::from_settings(&vk);

    let token = token
        .or_else(|| std::env::var(ACCESS_TOKEN_ENV).ok())
        .filter(|token| !token.trim().is_empty())
        .with_context(|| format!("access token required: pass --token or set {ACCESS_TOKEN_ENV}"))?;
    let api: Arc<dyn ApiClient> = Arc::new(HttpApiClient::new(HttpApiClientConfig {
        access_token: token,
        base_url: vk.api_base_url.clone(),
        version: vk.api_version.clone(),
        language: vk.language.clone(),
        client: None,
    })?);
    let bot_config = BotConfig {
        group_id: group_id.or(vk.group_id),
        shutdown_grace: runtime.shutdown_grace(),
    };

    let ctx = CancellationToken::new();
    tokio::spawn({
        let ctx = ctx.clone();
        async move {
            match tokio::signal::ctrl_c().await {
                Ok(()) => {
                    tracing::info!("Ctrl+C received; stopping");
                    ctx.cancel();
                }
                Err(error) => tracing::warn!(error = %error, "failed to listen for Ctrl+C"),
            }
        }
    });

    let mode = mode
        .or_else(|| vk.mode.as_deref().and_then(ListenMode::from_setting))
        .unwrap_or(ListenMode::Polling);
    match mode {
        ListenMode::Polling => {
            let poller = LongPoller::new(runtime.long_poll_wait())
                .with_error_retry_delay(runtime.error_retry_delay());
            run_bot(api, poller, bot_config, ctx, runtime.event_queue_capacity, echo).await
        }
        ListenMode::Callback => {
            let sources = if sources.is_empty() {
                vk.sources.clone().unwrap_or_default()
            } else {
                sources
            };
            if sources.is_empty() {
                bail!("callback mode needs at least one --source GROUP_ID:SECRET:CONFIRMATION");
            }
            let poller = CallbackPoller::new(sources)
                .with_listen(
                    bind.or(vk.webhook_bind.clone())
                        .unwrap_or_else(|| DEFAULT_CALLBACK_BIND.to_string()),
                )
                .with_path(
                    path.or(vk.webhook_path.clone())
                        .unwrap_or_else(|| DEFAULT_CALLBACK_PATH.to_string()),
                )
                .with_shutdown_grace(runtime.shutdown_grace());
            run_bot(api, poller, bot_config, ctx, runtime.event_queue_capacity, echo).await
        }
    }
}

async fn run_bot<P: Poller>(
    api: Arc<dyn ApiClient>,
    poller: P,
    config: BotConfig,
    ctx: CancellationToken,
    capacity: usize,
    echo: bool,
) -> Result<()> {
    let bot = Bot::new(api, poller, config).await?;
    let me = bot.me().await;
    tracing::info!(
        group_id = me.id,
        name = %me.name,
        screen_name = %me.screen_name,
        "running as vk community"
    );

    let mut events = bot.start_polling(ctx, capacity);
    while let Some(envelope) = events.recv().await {
        tracing::info!(
            group_id = envelope.group_id,
            kind = %envelope.event.kind(),
            "vk event received"
        );
        if echo
            && let Event::MessageNew(message) = &envelope.event
            && !message.text.is_empty()
            && let Err(error) = echo_message(&bot, message).await
        {
            tracing::warn!(peer_id = message.peer_id, error = %error, "echo failed");
        }
    }
    tracing::info!("vk event stream closed");
    Ok(())
}

/// `random_id` is derived from the message so a redelivered event is not echoed twice.
async fn echo_message(api: &dyn ApiClient, message: &Message) -> Result<(), ApiError> {
    let random_id = message
        .peer_id
        .wrapping_mul(1_000_003)
        .wrapping_add(message.conversation_message_id.max(message.id))
        & 0x7fff_ffff;
    api.request(
        "messages.send",
        &[
            ("peer_id", message.peer_id.to_string()),
            ("message", message.text.clone()),
            ("random_id", random_id.to_string()),
        ],
    )
    .await?;
    Ok(())
}
