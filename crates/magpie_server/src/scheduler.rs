//! The loop driving autonomous runs off the configured schedules.

use crate::{Schedule, ScheduleType, SharedBot};
use chrono::Utc;
use magpie_core::{LogLevel, LogSink};
use tracing::warn;

/// The two daily posting slots: 09:00 and 17:00 UTC.
pub fn posting_schedules() -> Vec<ScheduleType> {
    vec![
        ScheduleType::Cron {
            expression: "0 0 9 * * * *".to_string(),
        },
        ScheduleType::Cron {
            expression: "0 0 17 * * * *".to_string(),
        },
    ]
}

/// Spawn one task per schedule, each waking at its next slot and driving a
/// full (non-dry) bot cycle.
///
/// Runs from different schedules and from the manual HTTP trigger are
/// serialized by the shared bot lock. Invalid or exhausted schedules end
/// their task with a warning.
pub fn spawn_scheduler(schedules: Vec<ScheduleType>, bot: SharedBot, logs: LogSink) {
    logs.emit(LogLevel::System, "Initializing scheduler...");
    let count = schedules.len();
    for schedule in schedules {
        let bot = bot.clone();
        let logs = logs.clone();
        tokio::spawn(async move {
            let mut last_run = None;
            loop {
                let check = schedule.check(last_run);
                if check.should_run {
                    logs.emit(LogLevel::System, "Triggering scheduled run");
                    let mut bot = bot.lock().await;
                    bot.run_cycle(false).await;
                    drop(bot);
                    last_run = Some(Utc::now());
                }
                let Some(next) = check.next_run else {
                    warn!(?schedule, "schedule has no next slot, stopping");
                    break;
                };
                let wait = (next - Utc::now()).to_std().unwrap_or_default();
                tokio::time::sleep(wait).await;
            }
        });
    }
    logs.emit(LogLevel::Success, format!("Scheduled {count} posting job(s)."));
}
