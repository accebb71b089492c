//! Per-resource cooldown bookkeeping.

use std::time::{Duration, Instant};

/// Tracks, per resource position, the instant until which the resource is
/// unusable.
///
/// Fixed-size, indexed by key or model position. `None` means available
/// now; an entry is only ever overwritten by a later classification event,
/// never extended in place. Pure in-memory structure with no I/O.
#[derive(Debug, Clone)]
pub struct CooldownLedger {
    expiries: Vec<Option<Instant>>,
}

impl CooldownLedger {
    /// A ledger for `len` resources, all initially available.
    pub fn new(len: usize) -> Self {
        Self {
            expiries: vec![None; len],
        }
    }

    /// Number of tracked resources.
    pub fn len(&self) -> usize {
        self.expiries.len()
    }

    /// True when the ledger tracks no resources.
    pub fn is_empty(&self) -> bool {
        self.expiries.is_empty()
    }

    /// Put `index` into cooldown until `now + duration`, overwriting any
    /// prior entry.
    pub fn put(&mut self, index: usize, duration: Duration, now: Instant) {
        self.expiries[index] = Some(now + duration);
    }

    /// True iff `index` has no entry or its entry has expired.
    pub fn is_available(&self, index: usize, now: Instant) -> bool {
        match self.expiries[index] {
            Some(expiry) => expiry <= now,
            None => true,
        }
    }

    /// Smallest positive remaining wait across all entries, or `None` when
    /// the ledger is empty or every entry has already expired.
    pub fn min_wait(&self, now: Instant) -> Option<Duration> {
        self.expiries
            .iter()
            .flatten()
            .filter_map(|expiry| expiry.checked_duration_since(now))
            .filter(|wait| !wait.is_zero())
            .min()
    }

    /// Drop every entry. Forced recovery when all resources are cooling
    /// simultaneously.
    pub fn clear(&mut self) {
        self.expiries.fill(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_ledger_is_fully_available() {
        let ledger = CooldownLedger::new(3);
        let now = Instant::now();
        for i in 0..3 {
            assert!(ledger.is_available(i, now));
        }
        assert_eq!(ledger.min_wait(now), None);
    }

    #[test]
    fn put_makes_resource_unavailable_until_expiry() {
        let mut ledger = CooldownLedger::new(2);
        let now = Instant::now();
        ledger.put(0, Duration::from_secs(60), now);
        assert!(!ledger.is_available(0, now));
        assert!(ledger.is_available(1, now));
        assert!(ledger.is_available(0, now + Duration::from_secs(60)));
    }

    #[test]
    fn put_overwrites_prior_entry() {
        let mut ledger = CooldownLedger::new(1);
        let now = Instant::now();
        ledger.put(0, Duration::from_secs(300), now);
        ledger.put(0, Duration::from_secs(5), now);
        assert_eq!(ledger.min_wait(now), Some(Duration::from_secs(5)));
    }

    #[test]
    fn min_wait_picks_smallest_positive_remaining() {
        let mut ledger = CooldownLedger::new(3);
        let now = Instant::now();
        ledger.put(0, Duration::from_secs(60), now);
        ledger.put(1, Duration::from_secs(30), now);
        assert_eq!(ledger.min_wait(now), Some(Duration::from_secs(30)));
        // After everything expires there is nothing to wait for.
        assert_eq!(ledger.min_wait(now + Duration::from_secs(61)), None);
    }

    #[test]
    fn clear_restores_availability() {
        let mut ledger = CooldownLedger::new(2);
        let now = Instant::now();
        ledger.put(0, Duration::from_secs(60), now);
        ledger.put(1, Duration::from_secs(60), now);
        ledger.clear();
        assert!(ledger.is_available(0, now));
        assert!(ledger.is_available(1, now));
        assert_eq!(ledger.min_wait(now), None);
    }
}
