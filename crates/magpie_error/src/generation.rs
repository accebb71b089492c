//! Generation backend error types and failure classification.

/// Generation backend error conditions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, derive_more::Display)]
pub enum GenerationErrorKind {
    /// API returned a non-success HTTP status
    #[display("HTTP {} error: {}", status, message)]
    Http {
        /// HTTP status code
        status: u16,
        /// Error body or status text returned by the API
        message: String,
    },
    /// Request never reached the API or the connection dropped
    #[display("Network error: {}", _0)]
    Network(String),
    /// API responded without any usable text candidate
    #[display("Empty response from model")]
    EmptyResponse,
    /// API response could not be decoded
    #[display("Invalid response payload: {}", _0)]
    InvalidResponse(String),
}

/// How the rotation controller should react to a failed generation attempt.
///
/// Classification is a case-insensitive substring match on the error detail,
/// first match wins: model-not-found takes precedence over rate limiting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureClass {
    /// The model does not exist or is not supported for this API version.
    /// A durable property of the model pairing, independent of the key.
    ModelUnavailable,
    /// A quota was exhausted; ambiguous whether key- or model-scoped.
    RateLimited,
    /// Anything else; not recoverable by rotation alone.
    Other,
}

impl GenerationErrorKind {
    /// Classify this error for the rotation controller.
    pub fn failure_class(&self) -> FailureClass {
        let detail = self.to_string().to_lowercase();
        if detail.contains("404") || detail.contains("not found") || detail.contains("not supported")
        {
            FailureClass::ModelUnavailable
        } else if detail.contains("429")
            || detail.contains("quota")
            || detail.contains("resource exhausted")
        {
            FailureClass::RateLimited
        } else {
            FailureClass::Other
        }
    }
}

/// Generation error with source location tracking.
///
/// # Examples
///
/// ```
/// use magpie_error::{FailureClass, GenerationError, GenerationErrorKind};
///
/// let err = GenerationError::new(GenerationErrorKind::Http {
///     status: 429,
///     message: "quota exceeded for this project".to_string(),
/// });
/// assert_eq!(err.failure_class(), FailureClass::RateLimited);
/// ```
#[derive(Debug, Clone, derive_more::Display, derive_more::Error)]
#[display("Generation Error: {} at line {} in {}", kind, line, file)]
pub struct GenerationError {
    /// The kind of error that occurred
    pub kind: GenerationErrorKind,
    /// Line number where the error was created
    pub line: u32,
    /// File where the error was created
    pub file: &'static str,
}

impl GenerationError {
    /// Create a new GenerationError with automatic location tracking.
    #[track_caller]
    pub fn new(kind: GenerationErrorKind) -> Self {
        let location = std::panic::Location::caller();
        Self {
            kind,
            line: location.line(),
            file: location.file(),
        }
    }

    /// Classify this error for the rotation controller.
    pub fn failure_class(&self) -> FailureClass {
        self.kind.failure_class()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn http(status: u16, message: &str) -> GenerationErrorKind {
        GenerationErrorKind::Http {
            status,
            message: message.to_string(),
        }
    }

    #[test]
    fn status_404_is_model_unavailable() {
        assert_eq!(
            http(404, "requested entity was not found").failure_class(),
            FailureClass::ModelUnavailable
        );
    }

    #[test]
    fn not_supported_is_model_unavailable() {
        assert_eq!(
            http(400, "generateContent is NOT SUPPORTED for this model").failure_class(),
            FailureClass::ModelUnavailable
        );
    }

    #[test]
    fn quota_is_rate_limited() {
        assert_eq!(
            http(429, "RESOURCE_EXHAUSTED: quota exceeded").failure_class(),
            FailureClass::RateLimited
        );
        assert_eq!(http(429, "Too Many Requests").failure_class(), FailureClass::RateLimited);
    }

    #[test]
    fn not_found_outranks_rate_limit() {
        // First matching rule wins: a 404 mentioning quota stays a model error.
        assert_eq!(
            http(404, "model quota entry not found").failure_class(),
            FailureClass::ModelUnavailable
        );
    }

    #[test]
    fn network_errors_are_other() {
        assert_eq!(
            GenerationErrorKind::Network("connection reset by peer".to_string()).failure_class(),
            FailureClass::Other
        );
        assert_eq!(GenerationErrorKind::EmptyResponse.failure_class(), FailureClass::Other);
    }
}
