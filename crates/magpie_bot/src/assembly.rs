//! Prompt assembly plus generation, one mode at a time.

use crate::{build_prompt, LengthHint};
use magpie_core::{Article, LogLevel, LogSink, Mode};
use magpie_rotation::{Clock, RotationController, TextGenerator};
use rand::Rng;
use tracing::instrument;

/// Turns a content mode into finished post text.
///
/// Owns the rotation controller; generation failures are absorbed here
/// (logged, `None` returned) so the orchestrator can fall back to another
/// mode instead of aborting the run.
pub struct ContentAssembler<G, C> {
    controller: RotationController<G, C>,
    base_hashtag: String,
    logs: LogSink,
}

impl<G, C> ContentAssembler<G, C>
where
    G: TextGenerator,
    C: Clock,
{
    /// Assembler over `controller`, tagging every post with `base_hashtag`.
    pub fn new(
        controller: RotationController<G, C>,
        base_hashtag: impl Into<String>,
        logs: LogSink,
    ) -> Self {
        Self {
            controller,
            base_hashtag: base_hashtag.into(),
            logs,
        }
    }

    /// Generate post text for `mode`, or `None` when every attempt failed
    /// or nothing usable came back.
    ///
    /// The length directive is rolled fresh on every call, so a fallback
    /// compose is not tied to the hint of the compose that failed.
    #[instrument(skip(self, article, rng))]
    pub async fn compose(
        &mut self,
        mode: Mode,
        article: Option<&Article>,
        rng: &mut impl Rng,
    ) -> Option<String> {
        let hint = LengthHint::pick(rng);
        let prompt = build_prompt(mode, article, hint, &self.base_hashtag);
        self.logs.emit(
            LogLevel::Info,
            format!("Generating content ({mode}) - {:?}...", hint),
        );
        match self.controller.generate_with_retry(&prompt).await {
            Ok(generation) if generation.text.is_empty() => {
                // Tidying can reduce a degenerate response ("" in quotes,
                // pure whitespace) to nothing; that is a failed compose.
                self.logs
                    .emit(LogLevel::Warning, "Generation produced no usable text.");
                None
            }
            Ok(generation) => {
                self.logs
                    .emit(LogLevel::Success, "Content generated successfully.");
                Some(generation.text)
            }
            Err(err) => {
                self.logs
                    .emit(LogLevel::Error, format!("Generation failed: {}", err.kind));
                None
            }
        }
    }

    /// Index of the currently selected key.
    pub fn key_index(&self) -> usize {
        self.controller.key_index()
    }

    /// Number of configured keys.
    pub fn key_count(&self) -> usize {
        self.controller.key_count()
    }

    /// Name of the currently selected model.
    pub fn current_model(&self) -> &str {
        self.controller.current_model()
    }
}
