//! The rotation controller: bounded retry across every (key, model) pair.

use crate::{select_key, select_model, Clock, CooldownLedger, TextGenerator};
use magpie_core::{ApiKey, LogLevel, LogSink};
use magpie_error::{FailureClass, RotationError, RotationErrorKind};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Global floor between dispatched requests, across all keys and models.
const MIN_REQUEST_INTERVAL: Duration = Duration::from_millis(2000);
/// Cooldown applied to a key after a classified rate limit.
const KEY_RATE_LIMIT_COOLDOWN: Duration = Duration::from_millis(60_000);
/// Cooldown applied to a model after a classified rate limit.
const MODEL_RATE_LIMIT_COOLDOWN: Duration = Duration::from_millis(30_000);
/// Cooldown applied to a model reported missing or unsupported.
const MODEL_UNAVAILABLE_COOLDOWN: Duration = Duration::from_millis(300_000);
/// Liveness fallback when a rate limit leaves nothing to rotate to.
const ALL_EXHAUSTED_BACKOFF: Duration = Duration::from_millis(10_000);

/// A successful generation, with the resources that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Cleaned response text (surrounding quotes stripped, trimmed)
    pub text: String,
    /// Attempts consumed, including the successful dispatch
    pub attempts: u32,
    /// Index of the key that succeeded
    pub key_index: usize,
    /// Model that succeeded
    pub model: String,
}

/// Rotation-and-retry front for the generation backend.
///
/// Owns the key sequence, the model priority order, both cooldown ledgers,
/// and the throttle timestamp. One controller instance serves all requests
/// sequentially; cooldown state lives only in memory and resets on process
/// restart.
pub struct RotationController<G, C> {
    keys: Vec<ApiKey>,
    models: Vec<String>,
    key_index: usize,
    model_index: usize,
    key_cooldowns: CooldownLedger,
    model_cooldowns: CooldownLedger,
    last_dispatch: Option<std::time::Instant>,
    generator: G,
    clock: C,
    logs: LogSink,
}

impl<G, C> RotationController<G, C>
where
    G: TextGenerator,
    C: Clock,
{
    /// Create a controller over `keys` (rotation order) and `models`
    /// (priority order, most capable first).
    pub fn new(
        keys: Vec<ApiKey>,
        models: Vec<String>,
        generator: G,
        clock: C,
        logs: LogSink,
    ) -> Self {
        if !keys.is_empty() {
            logs.emit(
                LogLevel::System,
                format!("Loaded {} generation API key(s).", keys.len()),
            );
            logs.emit(
                LogLevel::System,
                format!("Available models: {}", models.join(", ")),
            );
        }
        let key_cooldowns = CooldownLedger::new(keys.len());
        let model_cooldowns = CooldownLedger::new(models.len());
        Self {
            keys,
            models,
            key_index: 0,
            model_index: 0,
            key_cooldowns,
            model_cooldowns,
            last_dispatch: None,
            generator,
            clock,
            logs,
        }
    }

    /// Index of the currently selected key.
    pub fn key_index(&self) -> usize {
        self.key_index
    }

    /// Number of configured keys.
    pub fn key_count(&self) -> usize {
        self.keys.len()
    }

    /// Name of the currently selected model.
    pub fn current_model(&self) -> &str {
        &self.models[self.model_index]
    }

    /// Generate text for `prompt`, rotating through keys and models until
    /// one attempt succeeds or the budget of `keys × models` attempts is
    /// spent.
    ///
    /// Waiting for a cooldown to lapse does not consume an attempt; only
    /// dispatches do. Success short-circuits the remaining budget.
    #[instrument(skip(self, prompt), fields(prompt_len = prompt.len()))]
    pub async fn generate_with_retry(&mut self, prompt: &str) -> Result<Generation, RotationError> {
        if self.keys.is_empty() {
            return Err(RotationError::new(RotationErrorKind::NoKeys));
        }

        // Every request starts from the most capable model, regardless of
        // where the previous request ended up.
        self.model_index = 0;

        let max_attempts = (self.keys.len() * self.models.len()) as u32;
        let mut attempts = 0u32;

        while attempts < max_attempts {
            let now = self.clock.now();
            let Some(key_index) = select_key(&self.key_cooldowns, self.key_index, now) else {
                if let Some(wait) = self.key_cooldowns.min_wait(now) {
                    self.logs.emit(
                        LogLevel::Warning,
                        format!("All keys cooling down. Waiting {}s...", wait.as_secs().max(1)),
                    );
                    self.clock.sleep(wait).await;
                }
                continue;
            };
            self.key_index = key_index;

            let now = self.clock.now();
            let Some(model_index) = select_model(&self.model_cooldowns, now) else {
                if let Some(wait) = self.model_cooldowns.min_wait(now) {
                    self.logs.emit(
                        LogLevel::Warning,
                        format!("All models cooling down. Waiting {}s...", wait.as_secs().max(1)),
                    );
                    self.clock.sleep(wait).await;
                }
                // Forced recovery: when every model is penalized at once,
                // wipe the ledger and restart from the top priority rather
                // than deadlock.
                self.model_cooldowns.clear();
                self.model_index = 0;
                continue;
            };
            self.model_index = model_index;

            attempts += 1;
            self.throttle().await;

            let key = self.keys[self.key_index].clone();
            let model = self.models[self.model_index].clone();
            self.logs.emit(
                LogLevel::Info,
                format!("Trying key #{} with {}", self.key_index + 1, model),
            );

            match self.generator.generate(&key, &model, prompt).await {
                Ok(raw) => {
                    self.logs
                        .emit(LogLevel::Success, format!("Success with {model}"));
                    return Ok(Generation {
                        text: tidy_response(&raw),
                        attempts,
                        key_index: self.key_index,
                        model,
                    });
                }
                Err(err) => self.absorb_failure(err.failure_class(), &err, &model).await,
            }
        }

        Err(RotationError::new(RotationErrorKind::Exhausted { attempts }))
    }

    /// Apply the classification table: ledger updates plus a rotation move.
    async fn absorb_failure(
        &mut self,
        class: FailureClass,
        err: &magpie_error::GenerationError,
        model: &str,
    ) {
        let now = self.clock.now();
        match class {
            FailureClass::ModelUnavailable => {
                // A durable property of the model pairing, independent of
                // the key: long model cooldown, and the key stays clean.
                self.model_cooldowns
                    .put(self.model_index, MODEL_UNAVAILABLE_COOLDOWN, now);
                self.logs.emit(
                    LogLevel::Warning,
                    format!(
                        "Model {model} in cooldown for {}s",
                        MODEL_UNAVAILABLE_COOLDOWN.as_secs()
                    ),
                );
                if !self.advance_model() {
                    self.model_index = 0;
                    self.rotate_key();
                }
            }
            FailureClass::RateLimited => {
                // Ambiguous origin: penalize both dimensions, key more
                // harshly, then try the orthogonal move (new key, same
                // model) first.
                self.key_cooldowns
                    .put(self.key_index, KEY_RATE_LIMIT_COOLDOWN, now);
                self.model_cooldowns
                    .put(self.model_index, MODEL_RATE_LIMIT_COOLDOWN, now);
                self.logs.emit(
                    LogLevel::Warning,
                    format!(
                        "Key #{} in cooldown for {}s",
                        self.key_index + 1,
                        KEY_RATE_LIMIT_COOLDOWN.as_secs()
                    ),
                );
                if !self.rotate_key() && !self.advance_model() {
                    debug!("single key and single model both limited, backing off");
                    self.clock.sleep(ALL_EXHAUSTED_BACKOFF).await;
                    self.model_index = 0;
                }
            }
            FailureClass::Other => {
                warn!(error = %err, "unclassified generation error");
                self.logs
                    .emit(LogLevel::Error, format!("Generation error: {}", err.kind));
                self.rotate_key();
            }
        }
    }

    /// Advance to the next key. False when there is nowhere to rotate to.
    fn rotate_key(&mut self) -> bool {
        if self.keys.len() <= 1 {
            return false;
        }
        self.key_index = (self.key_index + 1) % self.keys.len();
        true
    }

    /// Advance to the next-priority model. False at the lowest priority.
    fn advance_model(&mut self) -> bool {
        if self.model_index + 1 >= self.models.len() {
            return false;
        }
        self.model_index += 1;
        self.logs.emit(
            LogLevel::System,
            format!("Rotating to model: {}", self.models[self.model_index]),
        );
        true
    }

    /// Hold dispatches to the global inter-request floor.
    async fn throttle(&mut self) {
        let now = self.clock.now();
        if let Some(last) = self.last_dispatch {
            let elapsed = now.duration_since(last);
            if elapsed < MIN_REQUEST_INTERVAL {
                self.clock.sleep(MIN_REQUEST_INTERVAL - elapsed).await;
            }
        }
        self.last_dispatch = Some(self.clock.now());
    }
}

/// Strip one leading and one trailing quote character, then trim.
fn tidy_response(raw: &str) -> String {
    let text = raw.strip_prefix('"').unwrap_or(raw);
    let text = text.strip_suffix('"').unwrap_or(text);
    text.trim().to_string()
}
