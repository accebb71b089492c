//! X v2 create-tweet publisher.

use async_trait::async_trait;
use magpie_core::{LogLevel, LogSink, Publisher};
use magpie_error::{PublishError, PublishErrorKind};
use serde::Deserialize;
use serde_json::json;
use std::sync::atomic::{AtomicU32, Ordering};
use std::time::Duration;
use tokio_retry2::strategy::{jitter, ExponentialBackoff};
use tokio_retry2::{Retry, RetryError};
use tracing::{instrument, warn};

const DEFAULT_BASE_URL: &str = "https://api.x.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);
/// Retries after the initial attempt (3 attempts total).
const MAX_RETRIES: usize = 2;
/// Ceiling on a single retry delay.
const MAX_DELAY: Duration = Duration::from_secs(120);

/// Unjittered retry delays. The 2^n progression is scaled so the first
/// wait lands on 60s, then 120s (the cap).
fn retry_schedule() -> ExponentialBackoff {
    ExponentialBackoff::from_millis(2)
        .factor(30_000)
        .max_delay(MAX_DELAY)
}

/// Posts text to X, retrying transient rate limits with exponential
/// backoff. Permission and duplicate-content failures (403-class) are
/// terminal immediately.
pub struct PostPublisher {
    http: reqwest::Client,
    access_token: String,
    base_url: String,
    logs: LogSink,
}

impl PostPublisher {
    /// Publisher using an OAuth2 user-context access token.
    pub fn new(access_token: impl Into<String>, logs: LogSink) -> Self {
        Self::with_base_url(access_token, DEFAULT_BASE_URL, logs)
    }

    /// Publisher against a custom endpoint (tests, proxies).
    pub fn with_base_url(
        access_token: impl Into<String>,
        base_url: impl Into<String>,
        logs: LogSink,
    ) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            access_token: access_token.into(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            logs,
        }
    }

    async fn post_once(&self, text: &str, attempt: u32) -> Result<String, PublishError> {
        self.logs.emit(
            LogLevel::Info,
            format!("Posting to X (attempt {}/{})...", attempt, MAX_RETRIES as u32 + 1),
        );

        let response = self
            .http
            .post(format!("{}/2/tweets", self.base_url))
            .bearer_auth(&self.access_token)
            .json(&json!({ "text": text }))
            .send()
            .await
            .map_err(|e| PublishError::new(PublishErrorKind::Network(e.to_string())))?;

        let status = response.status().as_u16();
        if (200..300).contains(&status) {
            let payload: CreateTweetResponse = response.json().await.map_err(|e| {
                PublishError::new(PublishErrorKind::Api {
                    status,
                    message: format!("unreadable response body: {e}"),
                })
            })?;
            return Ok(payload.data.id);
        }

        let message = response.text().await.unwrap_or_default();
        Err(classify_failure(status, message, attempt))
    }
}

/// Map a non-success response onto the publish error taxonomy.
fn classify_failure(status: u16, message: String, attempt: u32) -> PublishError {
    match status {
        403 => PublishError::new(PublishErrorKind::Forbidden(message)),
        429 => PublishError::new(PublishErrorKind::RateLimited { attempts: attempt }),
        _ => PublishError::new(PublishErrorKind::Api { status, message }),
    }
}

#[async_trait]
impl Publisher for PostPublisher {
    #[instrument(skip(self, text), fields(chars = text.len()))]
    async fn publish(&self, text: &str) -> Result<String, PublishError> {
        if text.is_empty() {
            self.logs
                .emit(LogLevel::Error, "Cannot post empty content.");
            return Err(PublishError::new(PublishErrorKind::EmptyText));
        }

        let attempt = AtomicU32::new(0);
        let strategy = retry_schedule().map(jitter).take(MAX_RETRIES);

        let result = Retry::spawn(strategy, || {
            let n = attempt.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                match self.post_once(text, n).await {
                    Ok(id) => Ok(id),
                    Err(err) if err.kind.is_retryable() => {
                        self.logs.emit(
                            LogLevel::Warning,
                            format!("Rate limited or unreachable, backing off: {}", err.kind),
                        );
                        Err(RetryError::Transient {
                            err,
                            retry_after: None,
                        })
                    }
                    Err(err) => {
                        if matches!(err.kind, PublishErrorKind::Forbidden(_)) {
                            self.logs.emit(
                                LogLevel::Warning,
                                "Hint: 403 Forbidden = permissions missing or duplicate content.",
                            );
                        }
                        Err(RetryError::Permanent(err))
                    }
                }
            }
        })
        .await;

        match result {
            Ok(id) => {
                self.logs
                    .emit(LogLevel::Success, format!("Posted! ID: {id}"));
                Ok(id)
            }
            Err(err) => {
                warn!(error = %err, "publish failed");
                self.logs
                    .emit(LogLevel::Error, format!("Post error: {}", err.kind));
                Err(err)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct CreateTweetResponse {
    data: CreatedTweet,
}

#[derive(Debug, Deserialize)]
struct CreatedTweet {
    id: String,
}
