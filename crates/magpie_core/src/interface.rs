//! Collaborator trait seams.
//!
//! The orchestrator talks to its collaborators through these traits so
//! tests can substitute scripted fakes for the live services.

use crate::{Article, BotSnapshot, BotState, RunReport};
use async_trait::async_trait;
use magpie_error::PublishError;

/// Source of news article candidates for NEWS-mode posts.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch one randomly picked candidate, or `None` when nothing is
    /// available (including on fetch errors, which are logged internally).
    async fn fetch_candidate(&self) -> Option<Article>;
}

/// Social platform publisher.
#[async_trait]
pub trait Publisher: Send + Sync {
    /// Post `text`, returning the platform id of the created post.
    ///
    /// Implementations retry transient rate limits with backoff and treat
    /// permission/duplicate failures as immediately terminal.
    async fn publish(&self, text: &str) -> Result<String, PublishError>;
}

/// Best-effort persistence for [`BotState`].
///
/// Load falls back to the default state on missing or corrupt data; save
/// failures are logged, never surfaced.
pub trait StateStore: Send + Sync {
    /// Load the persisted state, defaulting on any failure.
    fn load(&self) -> BotState;
    /// Persist `state`, logging (not returning) failures.
    fn save(&self, state: &BotState);
}

/// The bot entrypoint shared by the scheduler and the manual HTTP trigger.
#[async_trait]
pub trait BotRunner: Send {
    /// Execute one full content cycle. Never panics outward; every run
    /// yields a report.
    async fn run_cycle(&mut self, dry_run: bool) -> RunReport;

    /// Current rotation position and persisted history, for the status
    /// endpoint.
    fn snapshot(&self) -> BotSnapshot;
}
