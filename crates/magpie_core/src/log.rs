//! Dashboard log sink.
//!
//! The dashboard streams operational logs over a push channel. `LogSink`
//! fans [`LogEvent`]s out through a broadcast channel (consumed by the SSE
//! route) and mirrors each event into `tracing`. Emission is fire-and-forget:
//! it never blocks and never fails, even with no subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

/// Severity labels shown on the dashboard.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum LogLevel {
    /// Lifecycle messages (startup, scheduling, cycle markers)
    System,
    /// Routine progress
    Info,
    /// Completed milestones
    Success,
    /// Degraded but recoverable conditions
    Warning,
    /// Failures
    Error,
    /// Generated content preview
    Preview,
}

/// One dashboard log line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEvent {
    /// Emission time
    pub timestamp: DateTime<Utc>,
    /// Severity label
    pub level: LogLevel,
    /// Message text
    pub message: String,
}

/// Fan-out handle for dashboard log events.
#[derive(Debug, Clone)]
pub struct LogSink {
    tx: broadcast::Sender<LogEvent>,
}

impl LogSink {
    /// Create a sink retaining up to `capacity` undelivered events per
    /// subscriber.
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Subscribe to the live event stream.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.tx.subscribe()
    }

    /// Emit one event. Fire-and-forget: send errors (no subscribers) are
    /// ignored, and every event is mirrored into tracing.
    pub fn emit(&self, level: LogLevel, message: impl Into<String>) {
        let message = message.into();
        match level {
            LogLevel::Warning => tracing::warn!(target: "magpie::bot", "{message}"),
            LogLevel::Error => tracing::error!(target: "magpie::bot", "{message}"),
            _ => tracing::info!(target: "magpie::bot", "{message}"),
        }
        let _ = self.tx.send(LogEvent {
            timestamp: Utc::now(),
            level,
            message,
        });
    }
}

impl Default for LogSink {
    fn default() -> Self {
        Self::new(256)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn subscribers_receive_emitted_events() {
        let sink = LogSink::new(8);
        let mut rx = sink.subscribe();
        sink.emit(LogLevel::Success, "posted");
        let event = rx.recv().await.unwrap();
        assert_eq!(event.level, LogLevel::Success);
        assert_eq!(event.message, "posted");
    }

    #[test]
    fn emit_without_subscribers_is_silent() {
        let sink = LogSink::new(8);
        sink.emit(LogLevel::Info, "nobody listening");
    }
}
