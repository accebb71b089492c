//! Bot state persistence error types.

/// State load/save error with source location tracking.
///
/// Persistence is best-effort: these errors are logged by the state store
/// and never escalated to the orchestrator.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("State Error: {} at line {} in {}", message, line, file)]
pub struct StateError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl StateError {
    /// Create a new StateError with the given message at the current location.
    #[track_caller]
    pub fn new(message: impl Into<String>) -> Self {
        let location = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: location.line(),
            file: location.file(),
        }
    }
}
