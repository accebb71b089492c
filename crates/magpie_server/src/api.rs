//! HTTP API for triggering and observing the bot.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use chrono::Utc;
use magpie_core::{BotRunner, BotSnapshot, LogLevel, LogSink};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::convert::Infallible;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::Mutex;
use tokio_stream::wrappers::BroadcastStream;
use tokio_stream::{Stream, StreamExt};

/// The bot behind the API, shared with the scheduler.
///
/// The mutex is the single-flight guard: manual triggers and scheduled
/// runs never overlap.
pub type SharedBot = Arc<Mutex<Box<dyn BotRunner>>>;

/// API state shared across handlers.
#[derive(Clone)]
pub struct ApiState {
    bot: SharedBot,
    logs: LogSink,
    started: Instant,
    /// Last snapshot taken while the bot was idle, served when a cycle
    /// holds the run lock so status requests never wait out a run.
    last_snapshot: Arc<std::sync::Mutex<Option<BotSnapshot>>>,
}

impl ApiState {
    /// Creates new API state.
    pub fn new(bot: SharedBot, logs: LogSink) -> Self {
        let last_snapshot = bot.try_lock().map(|bot| bot.snapshot()).ok();
        Self {
            bot,
            logs,
            started: Instant::now(),
            last_snapshot: Arc::new(std::sync::Mutex::new(last_snapshot)),
        }
    }
}

/// Creates the bot API router.
pub fn create_router(state: ApiState) -> Router {
    Router::new()
        .route("/api/run", post(run_bot))
        .route("/api/status", get(get_status))
        .route("/api/health", get(health_check))
        .route("/api/logs", get(stream_logs))
        .with_state(state)
}

#[derive(Debug, Default, Deserialize)]
struct RunQuery {
    #[serde(default, alias = "dryRun")]
    dry_run: bool,
}

/// Trigger one bot cycle and return its report.
async fn run_bot(State(state): State<ApiState>, Query(query): Query<RunQuery>) -> impl IntoResponse {
    state
        .logs
        .emit(LogLevel::System, "Manual trigger received via API.");
    let mut bot = state.bot.lock().await;
    let report = bot.run_cycle(query.dry_run).await;
    (StatusCode::OK, Json(report))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusResponse {
    next_run: &'static str,
    bot_mode: &'static str,
    active_model: String,
    last_run: String,
    last_mode: String,
}

/// Current rotation position and run history.
///
/// Never waits on the run lock: while a cycle is in flight this serves
/// the snapshot cached from the last idle moment.
async fn get_status(State(state): State<ApiState>) -> impl IntoResponse {
    let snapshot = match state.bot.try_lock() {
        Ok(bot) => {
            let snapshot = bot.snapshot();
            if let Ok(mut cache) = state.last_snapshot.lock() {
                *cache = Some(snapshot.clone());
            }
            snapshot
        }
        Err(_) => state
            .last_snapshot
            .lock()
            .ok()
            .and_then(|cache| cache.clone())
            .unwrap_or_else(|| BotSnapshot {
                key_index: 0,
                key_count: 0,
                active_model: "warming up".to_string(),
                last_mode: None,
                last_run: None,
            }),
    };
    let response = StatusResponse {
        next_run: "09:00 / 17:00 UTC",
        bot_mode: "Autonomous (smart rotation)",
        active_model: format!(
            "{} (key #{}/{})",
            snapshot.active_model,
            snapshot.key_index + 1,
            snapshot.key_count
        ),
        last_run: snapshot
            .last_run
            .map(|t| t.to_rfc3339())
            .unwrap_or_else(|| "Never".to_string()),
        last_mode: snapshot
            .last_mode
            .map(|m| m.to_string())
            .unwrap_or_else(|| "None".to_string()),
    };
    (StatusCode::OK, Json(response))
}

/// Liveness endpoint, also the keep-alive ping target.
async fn health_check(State(state): State<ApiState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "ok",
            "uptime": state.started.elapsed().as_secs(),
            "timestamp": Utc::now().to_rfc3339(),
        })),
    )
}

/// Live operational log stream for the dashboard.
async fn stream_logs(
    State(state): State<ApiState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let stream = BroadcastStream::new(state.logs.subscribe()).filter_map(|event| {
        // Lagged subscribers drop the missed events and keep streaming.
        let event = event.ok()?;
        let sse = Event::default().json_data(&event).ok()?;
        Some(Ok(sse))
    });
    Sse::new(stream).keep_alive(KeepAlive::default())
}
