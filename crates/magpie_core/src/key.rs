//! Generation API credential handling.

use std::fmt;

/// One opaque credential for the generation backend.
///
/// Keys are identified by their position in the configured sequence; the
/// secret itself only leaves this type at the HTTP call site. `Debug`
/// redacts the value so keys never leak into logs.
///
/// # Examples
///
/// ```
/// use magpie_core::ApiKey;
///
/// let key = ApiKey::from("AIzaSy-example".to_string());
/// assert_eq!(format!("{:?}", key), "ApiKey(****)");
/// assert_eq!(key.expose(), "AIzaSy-example");
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ApiKey(String);

impl ApiKey {
    /// Access the secret value for request construction.
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl From<String> for ApiKey {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for ApiKey {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey(****)")
    }
}
