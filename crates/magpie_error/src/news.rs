//! News source error types.

/// News fetch error with source location tracking.
///
/// # Examples
///
/// ```
/// use magpie_error::NewsError;
///
/// let err = NewsError::new("dev.to returned 503");
/// assert!(err.message.contains("503"));
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("News Error: {} at line {} in {}", message, line, file)]
pub struct NewsError {
    /// The underlying error message
    pub message: String,
    /// Line number where the error occurred
    pub line: u32,
    /// File where the error occurred
    pub file: &'static str,
}

impl NewsError {
    /// Create a new NewsError with the given message at the current location.
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
