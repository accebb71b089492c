//! Server lifecycle.

use axum::Router;
use magpie_core::{LogLevel, LogSink};
use magpie_error::ServerError;
use tracing::instrument;

/// Bind `router` on `port` (all interfaces) and serve until shutdown.
#[instrument(skip(router, logs))]
pub async fn serve(router: Router, port: u16, logs: LogSink) -> Result<(), ServerError> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .map_err(|e| ServerError::new(format!("could not bind port {port}: {e}")))?;

    logs.emit(
        LogLevel::Success,
        format!("Server running at http://localhost:{port}"),
    );
    logs.emit(LogLevel::Info, "SSE log stream ready at /api/logs.");

    axum::serve(listener, router)
        .await
        .map_err(|e| ServerError::new(format!("server stopped: {e}")))
}
