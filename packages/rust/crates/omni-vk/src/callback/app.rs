use axum::Router;

/// Built callback endpoint, ready to be served or nested into a larger router.
pub struct CallbackApp {
    /// Router serving `POST <path>`.
    pub app: Router,
    /// Normalized route path.
    pub path: String,
}
