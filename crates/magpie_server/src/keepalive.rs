//! Self-ping task keeping free-tier hosts from idling the process.

use magpie_core::{LogLevel, LogSink};
use std::time::Duration;
use tracing::debug;

/// First ping fires one minute after startup, once the server is up.
const INITIAL_DELAY: Duration = Duration::from_secs(60);
/// Subsequent pings every ten minutes.
const PING_INTERVAL: Duration = Duration::from_secs(600);
const PING_TIMEOUT: Duration = Duration::from_secs(10);

/// Spawn the keep-alive pinger against `<base_url>/api/health`.
///
/// Failures are warnings only; the pinger never gives up.
pub fn spawn_keepalive(base_url: String, logs: LogSink) {
    let ping_url = format!("{}/api/health", base_url.trim_end_matches('/'));
    logs.emit(
        LogLevel::System,
        format!("Starting keep-alive pinger for: {ping_url}"),
    );

    tokio::spawn(async move {
        let client = reqwest::Client::builder()
            .timeout(PING_TIMEOUT)
            .build()
            .unwrap_or_default();

        tokio::time::sleep(INITIAL_DELAY).await;
        ping(&client, &ping_url, &logs).await;

        let mut interval = tokio::time::interval(PING_INTERVAL);
        interval.tick().await;
        loop {
            interval.tick().await;
            ping(&client, &ping_url, &logs).await;
        }
    });
}

async fn ping(client: &reqwest::Client, url: &str, logs: &LogSink) {
    match client.get(url).send().await {
        Ok(response) if response.status().is_success() => {
            debug!("keep-alive ping successful");
        }
        Ok(response) => {
            logs.emit(
                LogLevel::Warning,
                format!("Keep-alive ping returned {}", response.status()),
            );
        }
        Err(err) => {
            logs.emit(LogLevel::Warning, format!("Keep-alive ping failed: {err}"));
        }
    }
}
