//! Rotation controller error types.

/// Terminal failures of a rotation-managed generation request.
///
/// Per-attempt failures (rate limits, missing models) are absorbed inside
/// the controller and never surface; only these two conditions escape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum RotationErrorKind {
    /// Every (key, model) combination was tried without success.
    #[display("All API keys and models exhausted after {} attempts", attempts)]
    Exhausted {
        /// Number of attempts consumed before giving up
        attempts: u32,
    },
    /// No API keys are configured.
    #[display("No generation API keys available")]
    NoKeys,
}

/// Rotation error with source location tracking.
///
/// # Examples
///
/// ```
/// use magpie_error::{RotationError, RotationErrorKind};
///
/// let err = RotationError::new(RotationErrorKind::Exhausted { attempts: 8 });
/// assert!(format!("{}", err).contains("8 attempts"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Rotation Error: {} at line {} in {}", kind, line, file)]
pub struct RotationError {
    /// The kind of error that occurred
    pub kind: RotationErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl RotationError {
    /// Create a new RotationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: RotationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
