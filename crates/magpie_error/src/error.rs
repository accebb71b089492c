//! Top-level error wrapper types.

use crate::{
    ConfigError, GenerationError, NewsError, PublishError, RotationError, ServerError, StateError,
};

/// Union of all error kinds produced across the magpie workspace.
#[derive(Debug, derive_more::From, derive_more::Display, derive_more::Error)]
pub enum MagpieErrorKind {
    /// Configuration error
    #[from(ConfigError)]
    Config(ConfigError),
    /// Generation backend error
    #[from(GenerationError)]
    Generation(GenerationError),
    /// Rotation controller terminal error
    #[from(RotationError)]
    Rotation(RotationError),
    /// Publisher error
    #[from(PublishError)]
    Publish(PublishError),
    /// News source error
    #[from(NewsError)]
    News(NewsError),
    /// State persistence error
    #[from(StateError)]
    State(StateError),
    /// HTTP server error
    #[from(ServerError)]
    Server(ServerError),
}

/// Magpie error with kind discrimination.
///
/// # Examples
///
/// ```
/// use magpie_error::{ConfigError, MagpieResult};
///
/// fn might_fail() -> MagpieResult<()> {
///     Err(ConfigError::new("missing field"))?
/// }
///
/// assert!(might_fail().is_err());
/// ```
#[derive(Debug, derive_more::Display, derive_more::Error)]
#[display("Magpie Error: {}", _0)]
pub struct MagpieError(Box<MagpieErrorKind>);

impl MagpieError {
    /// Create a new error from a kind.
    pub fn new(kind: MagpieErrorKind) -> Self {
        Self(Box::new(kind))
    }

    /// Get the error kind.
    pub fn kind(&self) -> &MagpieErrorKind {
        &self.0
    }
}

// Generic From implementation for any type that converts to MagpieErrorKind
impl<T> From<T> for MagpieError
where
    T: Into<MagpieErrorKind>,
{
    fn from(err: T) -> Self {
        Self::new(err.into())
    }
}

/// Result type for magpie operations.
pub type MagpieResult<T> = std::result::Result<T, MagpieError>;
