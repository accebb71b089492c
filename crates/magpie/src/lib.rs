//! Magpie - autonomous social content bot.
//!
//! Magpie generates short developer-focused posts with Gemini and publishes
//! them to X twice a day. Its distinguishing piece is the rotation layer: a
//! pool of API keys and a priority-ordered model roster, rotated through
//! timed cooldowns so a single free-tier quota never stalls the bot.
//!
//! # Architecture
//!
//! - [`RotationController`]: bounded retry across every (key, model) pair
//! - [`Orchestrator`]: one content cycle (mode pick, prompt, publish, record)
//! - [`create_router`]: the HTTP surface (manual trigger, status, health,
//!   SSE log stream)
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use magpie::{ContentAssembler, GeminiDriver, LogSink, MagpieConfig, RotationController, TokioClock};
//!
//! let config = MagpieConfig::from_env()?;
//! let logs = LogSink::default();
//! let controller = RotationController::new(
//!     config.gemini_keys.clone(),
//!     config.models.clone(),
//!     GeminiDriver::new(),
//!     TokioClock,
//!     logs.clone(),
//! );
//! let assembler = ContentAssembler::new(controller, config.base_hashtag.clone(), logs);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub use magpie_bot::{build_prompt, ContentAssembler, FileStateStore, LengthHint, Orchestrator};
pub use magpie_core::{
    available_modes, ApiKey, Article, BotRunner, BotSnapshot, BotState, LogEvent, LogLevel,
    LogSink, MagpieConfig, Mode, NewsSource, Publisher, RunReport, StateStore,
};
pub use magpie_error::{MagpieError, MagpieErrorKind, MagpieResult};
pub use magpie_models::GeminiDriver;
pub use magpie_rotation::{Clock, Generation, RotationController, TokioClock, VirtualClock};
pub use magpie_server::{
    create_router, posting_schedules, serve, spawn_keepalive, spawn_scheduler, ApiState, Schedule,
    ScheduleType, SharedBot,
};
pub use magpie_social::{NewsFetcher, PostPublisher};
