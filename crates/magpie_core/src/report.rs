//! Per-run result records and status snapshots.

use crate::Mode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The outcome of one bot run.
///
/// Every run produces exactly one report; errors are absorbed into the
/// `Error` variant rather than propagating to the HTTP layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunReport {
    /// Content was generated (and published unless dry-run or publish failed).
    Success {
        /// Final post text
        tweet: String,
        /// Mode that produced the text (after any TIP fallback)
        mode: Mode,
        /// Whether the post actually reached the platform
        posted: bool,
    },
    /// The run failed to produce content.
    Error {
        /// Human-readable failure description
        message: String,
    },
}

impl RunReport {
    /// Build an error report from any displayable failure.
    pub fn from_error(err: impl std::fmt::Display) -> Self {
        RunReport::Error {
            message: err.to_string(),
        }
    }
}

/// A point-in-time view of the bot for the status endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BotSnapshot {
    /// Index of the currently selected key (0-based)
    pub key_index: usize,
    /// Number of configured keys
    pub key_count: usize,
    /// Currently selected model name
    pub active_model: String,
    /// Mode of the last successful run, if any
    pub last_mode: Option<Mode>,
    /// Completion time of the last successful run, if any
    pub last_run: Option<DateTime<Utc>>,
}
