//! JSON file persistence for run history.

use magpie_core::{BotState, LogLevel, LogSink, StateStore};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;
use tracing::{debug, warn};

/// Best-effort [`BotState`] persistence in a single JSON file.
///
/// A missing file is the normal first-run case and loads silently as the
/// default state. Corrupt data and write failures are logged, never
/// surfaced: losing run history costs at worst one repeated content mode.
pub struct FileStateStore {
    path: PathBuf,
    logs: LogSink,
}

impl FileStateStore {
    /// Store backed by the file at `path`.
    pub fn new(path: impl Into<PathBuf>, logs: LogSink) -> Self {
        Self {
            path: path.into(),
            logs,
        }
    }
}

impl StateStore for FileStateStore {
    fn load(&self) -> BotState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "no state file yet, starting fresh");
                return BotState::default();
            }
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "state file unreadable");
                return BotState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %self.path.display(), error = %err, "state file corrupt, resetting");
                self.logs
                    .emit(LogLevel::Warning, "State file corrupt, starting fresh.");
                BotState::default()
            }
        }
    }

    fn save(&self, state: &BotState) {
        let serialized = match serde_json::to_string_pretty(state) {
            Ok(serialized) => serialized,
            Err(err) => {
                warn!(error = %err, "state serialization failed");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, serialized) {
            warn!(path = %self.path.display(), error = %err, "state write failed");
            self.logs
                .emit(LogLevel::Error, format!("Could not save state: {err}"));
        }
    }
}
