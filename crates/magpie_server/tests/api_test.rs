use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use magpie_core::{BotRunner, BotSnapshot, LogSink, Mode, RunReport};
use magpie_server::{create_router, ApiState, SharedBot};
use std::sync::{Arc, Mutex as StdMutex};
use tokio::sync::Mutex;
use tower::ServiceExt;

struct StubBot {
    calls: Arc<StdMutex<Vec<bool>>>,
}

#[async_trait]
impl BotRunner for StubBot {
    async fn run_cycle(&mut self, dry_run: bool) -> RunReport {
        self.calls.lock().unwrap().push(dry_run);
        RunReport::Success {
            tweet: "Ship it.".to_string(),
            mode: Mode::Tip,
            posted: !dry_run,
        }
    }

    fn snapshot(&self) -> BotSnapshot {
        BotSnapshot {
            key_index: 1,
            key_count: 3,
            active_model: "gemini-2.0-flash".to_string(),
            last_mode: None,
            last_run: None,
        }
    }
}

fn test_app() -> (axum::Router, Arc<StdMutex<Vec<bool>>>, SharedBot) {
    let calls = Arc::new(StdMutex::new(Vec::new()));
    let boxed: Box<dyn BotRunner> = Box::new(StubBot {
        calls: calls.clone(),
    });
    let bot: SharedBot = Arc::new(Mutex::new(boxed));
    let state = ApiState::new(bot.clone(), LogSink::default());
    (create_router(state), calls, bot)
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn run_endpoint_returns_report() {
    let (app, calls, _bot) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/run")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["status"], "success");
    assert_eq!(report["tweet"], "Ship it.");
    assert_eq!(report["mode"], "TIP");
    assert_eq!(report["posted"], true);
    assert_eq!(calls.lock().unwrap().as_slice(), &[false]);
}

#[tokio::test]
async fn run_endpoint_accepts_camel_case_dry_run_flag() {
    let (app, calls, _bot) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/run?dryRun=true")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let report = body_json(response).await;
    assert_eq!(report["posted"], false);
    assert_eq!(calls.lock().unwrap().as_slice(), &[true]);
}

#[tokio::test]
async fn status_endpoint_reports_rotation_position() {
    let (app, _calls, _bot) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let status = body_json(response).await;
    assert_eq!(status["activeModel"], "gemini-2.0-flash (key #2/3)");
    assert_eq!(status["lastRun"], "Never");
    assert_eq!(status["lastMode"], "None");
    assert_eq!(status["nextRun"], "09:00 / 17:00 UTC");
}

#[tokio::test]
async fn status_endpoint_answers_while_cycle_holds_run_lock() {
    let (app, _calls, bot) = test_app();
    // Hold the run lock as a scheduled cycle would.
    let _running = bot.lock().await;

    let response = tokio::time::timeout(
        std::time::Duration::from_secs(1),
        app.oneshot(
            Request::builder()
                .uri("/api/status")
                .body(Body::empty())
                .unwrap(),
        ),
    )
    .await
    .expect("status endpoint blocked on the run lock")
    .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    // Served from the snapshot cached before the lock was taken.
    let status = body_json(response).await;
    assert_eq!(status["activeModel"], "gemini-2.0-flash (key #2/3)");
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let (app, _calls, _bot) = test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let health = body_json(response).await;
    assert_eq!(health["status"], "ok");
    assert!(health["uptime"].is_number());
}
