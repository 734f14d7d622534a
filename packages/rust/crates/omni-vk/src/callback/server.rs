use std::net::SocketAddr;
use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tokio_util::task::AbortOnDropHandle;

/// Running endpoint. Dropping it aborts the server task, so an aborted `poll` cannot
/// leave the listener behind.
pub(super) struct CallbackServer {
    pub(super) local_addr: SocketAddr,
    pub(super) task: AbortOnDropHandle<std::io::Result<()>>,
}

/// Serves `app` until `ctx` is cancelled; in-flight requests drain after that.
pub(super) async fn start_callback_server(
    bind_addr: &str,
    app: Router,
    ctx: CancellationToken,
) -> std::io::Result<CallbackServer> {
    let listener = TcpListener::bind(bind_addr).await?;
    let local_addr = listener.local_addr()?;
    let task = AbortOnDropHandle::new(tokio::spawn(async move {
        axum::serve(listener, app)
            .with_graceful_shutdown(async move { ctx.cancelled().await })
            .await
    }));
    Ok(CallbackServer { local_addr, task })
}

/// Waits up to `grace` for the drain to finish, then aborts the server task.
///
/// Requests whose body is still arriving are cut off by the caller's attachment guard.
pub(super) async fn stop_callback_server(server: CallbackServer, grace: Duration) {
    let CallbackServer {
        local_addr,
        mut task,
    } = server;
    match tokio::time::timeout(grace, &mut task).await {
        Ok(result) => log_server_exit(local_addr, result),
        Err(_) => {
            tracing::warn!(
                addr = %local_addr,
                grace_ms = grace.as_millis(),
                "vk callback server did not drain in time; aborting"
            );
            task.abort();
        }
    }
}

pub(super) fn log_server_exit(
    local_addr: SocketAddr,
    result: Result<std::io::Result<()>, tokio::task::JoinError>,
) {
    match result {
        Ok(Ok(())) => tracing::info!(addr = %local_addr, "vk callback server stopped"),
        Ok(Err(error)) => {
            tracing::error!(addr = %local_addr, error = %error, "vk callback server failed");
        }
        Err(error) => {
            tracing::error!(addr = %local_addr, error = %error, "vk callback task join error");
        }
    }
}
