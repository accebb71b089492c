//! Injected time source for the rotation controller.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Time and suspension as seen by the controller.
///
/// Production uses [`TokioClock`]; tests use [`VirtualClock`] so cooldown
/// waits and throttling resolve instantly and deterministically.
#[async_trait]
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;

    /// Suspend the calling task for `duration`. Only the in-flight request
    /// is suspended; unrelated tasks keep running.
    async fn sleep(&self, duration: Duration);
}

/// Real time via `tokio::time`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}

#[derive(Debug, Default)]
struct VirtualState {
    elapsed: Duration,
    sleeps: Vec<Duration>,
}

/// Deterministic clock for tests: `sleep` advances virtual time instantly
/// and records the requested duration.
///
/// Clones share the same timeline, so a test can hold one handle while the
/// controller owns another.
#[derive(Debug, Clone)]
pub struct VirtualClock {
    origin: Instant,
    state: Arc<Mutex<VirtualState>>,
}

impl VirtualClock {
    /// Create a clock starting at the current real instant.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            state: Arc::new(Mutex::new(VirtualState::default())),
        }
    }

    /// Advance virtual time without recording a sleep.
    pub fn advance(&self, duration: Duration) {
        self.state.lock().unwrap().elapsed += duration;
    }

    /// Every duration passed to `sleep`, in order.
    pub fn sleeps(&self) -> Vec<Duration> {
        self.state.lock().unwrap().sleeps.clone()
    }

    /// Sum of all sleeps so far.
    pub fn total_slept(&self) -> Duration {
        self.state.lock().unwrap().sleeps.iter().sum()
    }
}

impl Default for VirtualClock {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Clock for VirtualClock {
    fn now(&self) -> Instant {
        self.origin + self.state.lock().unwrap().elapsed
    }

    async fn sleep(&self, duration: Duration) {
        let mut state = self.state.lock().unwrap();
        state.elapsed += duration;
        state.sleeps.push(duration);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn virtual_sleep_advances_time_and_records() {
        let clock = VirtualClock::new();
        let before = clock.now();
        clock.sleep(Duration::from_secs(30)).await;
        assert_eq!(clock.now() - before, Duration::from_secs(30));
        assert_eq!(clock.sleeps(), vec![Duration::from_secs(30)]);
    }

    #[tokio::test]
    async fn clones_share_the_timeline() {
        let clock = VirtualClock::new();
        let handle = clock.clone();
        clock.sleep(Duration::from_secs(5)).await;
        assert_eq!(handle.total_slept(), Duration::from_secs(5));
    }
}
