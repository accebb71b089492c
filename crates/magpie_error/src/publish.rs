//! Publisher error types.

/// Publisher error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, derive_more::Display)]
pub enum PublishErrorKind {
    /// Platform rate limit persisted through the retry budget.
    #[display("Rate limit persisted after {} attempts", attempts)]
    RateLimited {
        /// Attempts made before giving up
        attempts: u32,
    },
    /// 403-class failure: missing permissions or duplicate content.
    /// Never retried.
    #[display("Forbidden (permissions missing or duplicate content): {}", _0)]
    Forbidden(String),
    /// Any other API failure.
    #[display("Post API error ({}): {}", status, message)]
    Api {
        /// HTTP status code
        status: u16,
        /// Error body returned by the API
        message: String,
    },
    /// Request never reached the platform.
    #[display("Network error: {}", _0)]
    Network(String),
    /// Refused to post empty content.
    #[display("Cannot post empty content")]
    EmptyText,
}

impl PublishErrorKind {
    /// True for transient failures worth retrying with backoff.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            PublishErrorKind::RateLimited { .. } | PublishErrorKind::Network(_)
        )
    }
}

/// Publish error with source location tracking.
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Publish Error: {} at line {} in {}", kind, line, file)]
pub struct PublishError {
    /// The kind of error that occurred
    pub kind: PublishErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl PublishError {
    /// Create a new PublishError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: PublishErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }
}
