//! Persisted bot state.

use crate::Mode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The small record the bot persists between runs.
///
/// Loaded at the start of each run and saved only after a successful post,
/// so the next run can avoid repeating the previous content mode. Field
/// names are camelCase on disk to stay compatible with existing
/// `bot_state.json` files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BotState {
    /// Mode of the last successfully posted run
    #[serde(default)]
    pub last_mode: Option<Mode>,
    /// When the last successful run finished
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_run: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_camel_case_fields() {
        let state = BotState {
            last_mode: Some(Mode::Tip),
            last_run: Some("2026-08-30T09:00:00Z".parse().unwrap()),
        };
        let json = serde_json::to_string(&state).unwrap();
        assert!(json.contains("\"lastMode\":\"TIP\""));
        assert!(json.contains("\"lastRun\""));
    }

    #[test]
    fn missing_fields_default_to_none() {
        let state: BotState = serde_json::from_str("{}").unwrap();
        assert_eq!(state, BotState::default());
    }
}
