//! Generation backend seam.

use async_trait::async_trait;
use magpie_core::ApiKey;
use magpie_error::GenerationError;

/// One text-generation backend call, addressed by credential and model.
///
/// Implementations perform a single request with no retry of their own;
/// the [`RotationController`](crate::RotationController) owns all retry,
/// rotation, and cooldown policy. Errors must carry a classifiable
/// status/detail string (see [`GenerationError::failure_class`]).
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generate text for `prompt` using `model` under the given `key`.
    async fn generate(
        &self,
        key: &ApiKey,
        model: &str,
        prompt: &str,
    ) -> Result<String, GenerationError>;
}
