//! The full bot cycle: pick a mode, produce text, publish, record.

use crate::ContentAssembler;
use async_trait::async_trait;
use chrono::Utc;
use magpie_core::{
    BotRunner, BotSnapshot, BotState, LogLevel, LogSink, Mode, NewsSource, Publisher, RunReport,
    StateStore,
};
use magpie_rotation::{Clock, TextGenerator};
use rand::rngs::StdRng;
use tracing::instrument;

/// Runs one content cycle end to end.
///
/// Mode selection never repeats the previous run's mode, NEWS and LIFE fall
/// back to TIP when they produce nothing, and state is saved only after a
/// post actually reaches the platform. Every failure path collapses into a
/// [`RunReport`]; nothing propagates to the caller.
pub struct Orchestrator<G, C, N, P, S> {
    assembler: ContentAssembler<G, C>,
    news: N,
    publisher: P,
    store: S,
    rng: StdRng,
    logs: LogSink,
}

impl<G, C, N, P, S> Orchestrator<G, C, N, P, S>
where
    G: TextGenerator,
    C: Clock,
    N: NewsSource,
    P: Publisher,
    S: StateStore,
{
    /// Wire an orchestrator from its collaborators.
    pub fn new(
        assembler: ContentAssembler<G, C>,
        news: N,
        publisher: P,
        store: S,
        rng: StdRng,
        logs: LogSink,
    ) -> Self {
        Self {
            assembler,
            news,
            publisher,
            store,
            rng,
            logs,
        }
    }

    async fn run_with_mode(&mut self, mode: Mode, dry_run: bool) -> RunReport {
        let mut mode = mode;
        let mut text: Option<String> = None;

        match mode {
            Mode::News => {
                self.logs
                    .emit(LogLevel::Info, "Mode: tech news (viral/recent)");
                if let Some(article) = self.news.fetch_candidate().await {
                    if let Some(hook) = self
                        .assembler
                        .compose(Mode::News, Some(&article), &mut self.rng)
                        .await
                    {
                        text = Some(format!("{hook}\n\nRead more: {}", article.url));
                    }
                }
            }
            Mode::Life => {
                self.logs.emit(LogLevel::Info, "Mode: engineering life");
                text = self.assembler.compose(Mode::Life, None, &mut self.rng).await;
            }
            // TIP is handled by the fallback block below.
            Mode::Tip => {}
        }

        if text.is_none() {
            if mode != Mode::Tip {
                self.logs
                    .emit(LogLevel::Warning, format!("{mode} failed, falling back to TIP."));
            }
            mode = Mode::Tip;
            self.logs.emit(LogLevel::Info, "Mode: coding tip/teaching");
            text = self.assembler.compose(Mode::Tip, None, &mut self.rng).await;
        }

        let Some(tweet) = text else {
            self.logs.emit(LogLevel::Error, "Failed to generate content.");
            return RunReport::Error {
                message: "failed to generate content".to_string(),
            };
        };

        self.logs
            .emit(LogLevel::Preview, format!("Generated post:\n{tweet}"));

        let posted = if dry_run {
            self.logs
                .emit(LogLevel::Info, "Dry run mode: post NOT published.");
            false
        } else {
            match self.publisher.publish(&tweet).await {
                Ok(_) => {
                    self.store.save(&BotState {
                        last_mode: Some(mode),
                        last_run: Some(Utc::now()),
                    });
                    true
                }
                // The publisher logs its own failure detail; an unposted
                // cycle still reports the generated text.
                Err(_) => false,
            }
        };

        RunReport::Success {
            tweet,
            mode,
            posted,
        }
    }
}

#[async_trait]
impl<G, C, N, P, S> BotRunner for Orchestrator<G, C, N, P, S>
where
    G: TextGenerator,
    C: Clock,
    N: NewsSource,
    P: Publisher,
    S: StateStore,
{
    #[instrument(skip(self))]
    async fn run_cycle(&mut self, dry_run: bool) -> RunReport {
        self.logs.emit(LogLevel::System, "Bot waking up...");
        let state = self.store.load();
        let previous = state
            .last_mode
            .map(|m| m.to_string())
            .unwrap_or_else(|| "none".to_string());
        self.logs
            .emit(LogLevel::System, format!("Previous mode: {previous}"));

        let mode = Mode::pick(state.last_mode, &mut self.rng);
        let report = self.run_with_mode(mode, dry_run).await;

        self.logs.emit(LogLevel::System, "Bot cycle complete.");
        report
    }

    fn snapshot(&self) -> BotSnapshot {
        let state = self.store.load();
        BotSnapshot {
            key_index: self.assembler.key_index(),
            key_count: self.assembler.key_count(),
            active_model: self.assembler.current_model().to_string(),
            last_mode: state.last_mode,
            last_run: state.last_run,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use magpie_core::{ApiKey, Article};
    use magpie_error::{
        GenerationError, GenerationErrorKind, PublishError, PublishErrorKind,
    };
    use magpie_rotation::{RotationController, VirtualClock};
    use rand::SeedableRng;
    use std::sync::Mutex;

    struct FixedGenerator {
        reply: Option<String>,
    }

    #[async_trait]
    impl TextGenerator for FixedGenerator {
        async fn generate(
            &self,
            _key: &ApiKey,
            _model: &str,
            _prompt: &str,
        ) -> Result<String, GenerationError> {
            match &self.reply {
                Some(reply) => Ok(reply.clone()),
                None => Err(GenerationError::new(GenerationErrorKind::Http {
                    status: 500,
                    message: "internal error".to_string(),
                })),
            }
        }
    }

    struct StubNews {
        article: Option<Article>,
    }

    #[async_trait]
    impl NewsSource for StubNews {
        async fn fetch_candidate(&self) -> Option<Article> {
            self.article.clone()
        }
    }

    struct StubPublisher {
        accept: bool,
        calls: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Publisher for StubPublisher {
        async fn publish(&self, text: &str) -> Result<String, PublishError> {
            self.calls.lock().unwrap().push(text.to_string());
            if self.accept {
                Ok("123".to_string())
            } else {
                Err(PublishError::new(PublishErrorKind::RateLimited {
                    attempts: 3,
                }))
            }
        }
    }

    #[derive(Default)]
    struct MemoryStore {
        state: Mutex<BotState>,
        saved: Mutex<Vec<BotState>>,
    }

    impl StateStore for MemoryStore {
        fn load(&self) -> BotState {
            self.state.lock().unwrap().clone()
        }

        fn save(&self, state: &BotState) {
            self.saved.lock().unwrap().push(state.clone());
            *self.state.lock().unwrap() = state.clone();
        }
    }

    type TestBot = Orchestrator<FixedGenerator, VirtualClock, StubNews, StubPublisher, MemoryStore>;

    fn bot(reply: Option<&str>, article: Option<Article>, accept: bool) -> TestBot {
        let logs = LogSink::default();
        let controller = RotationController::new(
            vec![ApiKey::from("k1")],
            vec!["m1".to_string()],
            FixedGenerator {
                reply: reply.map(str::to_string),
            },
            VirtualClock::new(),
            logs.clone(),
        );
        Orchestrator::new(
            ContentAssembler::new(controller, "#tag", logs.clone()),
            StubNews { article },
            StubPublisher {
                accept,
                calls: Mutex::new(Vec::new()),
            },
            MemoryStore::default(),
            StdRng::seed_from_u64(42),
            logs,
        )
    }

    fn article() -> Article {
        Article {
            title: "Big release".to_string(),
            url: "https://dev.to/x/big-release".to_string(),
            tags: vec!["rust".to_string()],
        }
    }

    #[tokio::test]
    async fn tip_run_publishes_and_saves_state() {
        let mut bot = bot(Some("Write tests first. #dev #tag"), None, true);
        let report = bot.run_with_mode(Mode::Tip, false).await;
        assert_eq!(
            report,
            RunReport::Success {
                tweet: "Write tests first. #dev #tag".to_string(),
                mode: Mode::Tip,
                posted: true,
            }
        );
        let saved = bot.store.saved.lock().unwrap().clone();
        assert_eq!(saved.len(), 1);
        assert_eq!(saved[0].last_mode, Some(Mode::Tip));
        assert!(saved[0].last_run.is_some());
    }

    #[tokio::test]
    async fn news_run_appends_article_link() {
        let mut bot = bot(Some("Hot take 👇"), Some(article()), true);
        let report = bot.run_with_mode(Mode::News, false).await;
        match report {
            RunReport::Success { tweet, mode, posted } => {
                assert_eq!(tweet, "Hot take 👇\n\nRead more: https://dev.to/x/big-release");
                assert_eq!(mode, Mode::News);
                assert!(posted);
            }
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[tokio::test]
    async fn news_without_article_falls_back_to_tip() {
        let mut bot = bot(Some("A tip"), None, true);
        let report = bot.run_with_mode(Mode::News, false).await;
        match report {
            RunReport::Success { mode, .. } => assert_eq!(mode, Mode::Tip),
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[tokio::test]
    async fn dry_run_skips_publish_and_save() {
        let mut bot = bot(Some("Ship small diffs."), None, true);
        let report = bot.run_with_mode(Mode::Life, true).await;
        match report {
            RunReport::Success { posted, .. } => assert!(!posted),
            other => panic!("unexpected report: {other:?}"),
        }
        assert!(bot.publisher.calls.lock().unwrap().is_empty());
        assert!(bot.store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn failed_publish_reports_unposted_and_keeps_state() {
        let mut bot = bot(Some("Ship small diffs."), None, false);
        let report = bot.run_with_mode(Mode::Life, false).await;
        match report {
            RunReport::Success { posted, .. } => assert!(!posted),
            other => panic!("unexpected report: {other:?}"),
        }
        assert_eq!(bot.publisher.calls.lock().unwrap().len(), 1);
        assert!(bot.store.saved.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn generation_failure_reports_error() {
        let mut bot = bot(None, None, true);
        let report = bot.run_with_mode(Mode::Life, false).await;
        assert_eq!(
            report,
            RunReport::Error {
                message: "failed to generate content".to_string(),
            }
        );
    }

    #[tokio::test]
    async fn quoted_empty_generation_never_reaches_publisher() {
        // A model replying with an empty quoted string tidies down to
        // nothing; every mode produces the same reply here, so the TIP
        // backstop comes up empty too and the run reports an error.
        let mut bot = bot(Some("\"\""), None, true);
        let report = bot.run_with_mode(Mode::Life, false).await;
        assert_eq!(
            report,
            RunReport::Error {
                message: "failed to generate content".to_string(),
            }
        );
        assert!(bot.publisher.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn run_cycle_avoids_previous_mode() {
        let mut bot = bot(Some("Anything"), Some(article()), true);
        bot.store.save(&BotState {
            last_mode: Some(Mode::Tip),
            last_run: None,
        });
        bot.store.saved.lock().unwrap().clear();
        let report = bot.run_cycle(false).await;
        match report {
            RunReport::Success { mode, .. } => assert_ne!(mode, Mode::Tip),
            other => panic!("unexpected report: {other:?}"),
        }
    }

    #[tokio::test]
    async fn snapshot_reflects_rotation_and_history() {
        let bot = bot(Some("Anything"), None, true);
        let snapshot = bot.snapshot();
        assert_eq!(snapshot.key_index, 0);
        assert_eq!(snapshot.key_count, 1);
        assert_eq!(snapshot.active_model, "m1");
        assert_eq!(snapshot.last_mode, None);
    }
}
