use anyhow::Result;
use axum::Router;

/// Serves `app` on an ephemeral local port; `None` when the sandbox forbids binding.
pub(crate) async fn spawn_test_server(
    app: Router,
    permission_denied_message: &str,
) -> Result<Option<(String, tokio::task::JoinHandle<()>)>> {
    let listener = match tokio::net::TcpListener::bind("127.0.0.1:0").await {
        Ok(listener) => listener,
        Err(err) if err.kind() == std::io::ErrorKind::PermissionDenied => {
            eprintln!("{permission_denied_message}");
            return Ok(None);
        }
        Err(err) => return Err(err.into()),
    };

    let addr = listener.local_addr()?;
    let handle = tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    Ok(Some((format!("http://{addr}"), handle)))
}
