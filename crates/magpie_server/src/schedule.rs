//! Schedule types for autonomous bot runs.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Result of checking if a run is due.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleCheck {
    /// Whether the run should happen now
    pub should_run: bool,
    /// When to check next (if the schedule has a future slot)
    pub next_run: Option<DateTime<Utc>>,
}

impl ScheduleCheck {
    /// Create a new schedule check result.
    pub fn new(should_run: bool, next_run: Option<DateTime<Utc>>) -> Self {
        Self {
            should_run,
            next_run,
        }
    }

    /// Not due yet, check again at `next_run`.
    pub fn wait_until(next_run: DateTime<Utc>) -> Self {
        Self {
            should_run: false,
            next_run: Some(next_run),
        }
    }

    /// Due now, and due again at `next_run`.
    pub fn run_and_schedule(next_run: DateTime<Utc>) -> Self {
        Self {
            should_run: true,
            next_run: Some(next_run),
        }
    }
}

/// Trait for schedule types that can determine when runs are due.
pub trait Schedule {
    /// Check whether a run is due now, given the last execution time.
    fn check(&self, last_run: Option<DateTime<Utc>>) -> ScheduleCheck;

    /// The next execution time strictly after `after`, or `None` if the
    /// schedule is exhausted or invalid.
    fn next_execution(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>>;
}

/// Recurring schedule kinds for the posting loop.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum ScheduleType {
    /// Cron expression (7 fields: sec min hour day month weekday year)
    ///
    /// Example: "0 0 9 * * * *" = 9 AM daily
    Cron {
        /// Cron expression string
        expression: String,
    },

    /// Fixed interval in seconds
    Interval {
        /// Interval duration in seconds
        seconds: u64,
    },
}

impl Schedule for ScheduleType {
    fn check(&self, last_run: Option<DateTime<Utc>>) -> ScheduleCheck {
        let now = Utc::now();

        match self {
            ScheduleType::Interval { seconds } => {
                let interval = Duration::seconds(*seconds as i64);
                match last_run {
                    None => ScheduleCheck::run_and_schedule(now + interval),
                    Some(last) => {
                        let next = last + interval;
                        if now >= next {
                            ScheduleCheck::run_and_schedule(next + interval)
                        } else {
                            ScheduleCheck::wait_until(next)
                        }
                    }
                }
            }
            ScheduleType::Cron { expression } => match cron::Schedule::from_str(expression) {
                Ok(schedule) => {
                    let after = last_run.unwrap_or(now);
                    if let Some(next) = schedule.after(&after).next() {
                        if now >= next {
                            if let Some(future) = schedule.after(&now).next() {
                                ScheduleCheck::run_and_schedule(future)
                            } else {
                                ScheduleCheck::new(true, None)
                            }
                        } else {
                            ScheduleCheck::wait_until(next)
                        }
                    } else {
                        ScheduleCheck::new(false, None)
                    }
                }
                Err(_) => ScheduleCheck::new(false, None),
            },
        }
    }

    fn next_execution(&self, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
        match self {
            ScheduleType::Interval { seconds } => Some(after + Duration::seconds(*seconds as i64)),
            ScheduleType::Cron { expression } => {
                if let Ok(schedule) = cron::Schedule::from_str(expression) {
                    schedule.after(&after).next()
                } else {
                    None
                }
            }
        }
    }
}
