//! HTTP surface and background tasks for the magpie bot.
//!
//! - [`create_router`]: axum routes for manual runs, status, health, and
//!   the SSE log stream
//! - [`ScheduleType`] / [`spawn_scheduler`]: cron-driven autonomous runs
//! - [`spawn_keepalive`]: periodic self-ping so free-tier hosts stay warm
//! - [`serve`]: bind and run the server

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod api;
mod keepalive;
mod schedule;
mod scheduler;
mod server;

pub use api::{create_router, ApiState, SharedBot};
pub use keepalive::spawn_keepalive;
pub use schedule::{Schedule, ScheduleCheck, ScheduleType};
pub use scheduler::{posting_schedules, spawn_scheduler};
pub use server::serve;
