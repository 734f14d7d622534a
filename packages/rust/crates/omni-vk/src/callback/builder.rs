use std::sync::Arc;

use axum::{Router, routing::post};

use super::SourceRegistry;
use super::app::CallbackApp;
use super::handler::callback_handler;
use super::path::normalize_callback_path;
use super::state::{AttachmentSlot, CallbackState};

pub(super) fn build_callback_app(
    sources: Arc<SourceRegistry>,
    path: &str,
    attachment: AttachmentSlot,
) -> CallbackApp {
    let state = CallbackState {
        sources,
        attachment,
    };
    let path = normalize_callback_path(path);
    let app = Router::new()
        .route(&path, post(callback_handler))
        .with_state(state);
    CallbackApp { app, path }
}
