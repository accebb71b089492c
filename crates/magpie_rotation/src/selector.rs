//! Next-usable-resource selection.
//!
//! Keys and models deliberately scan differently: keys round-robin from the
//! last-used position (fairness across quotas), models always restart from
//! priority zero (capability preference over fairness).

use crate::CooldownLedger;
use std::time::Instant;

/// First available key index, scanning circularly from `start` through all
/// keys exactly once. `None` when every key is cooling down.
pub fn select_key(ledger: &CooldownLedger, start: usize, now: Instant) -> Option<usize> {
    let len = ledger.len();
    if len == 0 {
        return None;
    }
    (0..len)
        .map(|offset| (start + offset) % len)
        .find(|&index| ledger.is_available(index, now))
}

/// Highest-priority available model index, always scanning from the top of
/// the priority order. `None` when every model is cooling down.
pub fn select_model(ledger: &CooldownLedger, now: Instant) -> Option<usize> {
    (0..ledger.len()).find(|&index| ledger.is_available(index, now))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn key_scan_wraps_from_start_position() {
        let mut ledger = CooldownLedger::new(3);
        let now = Instant::now();
        ledger.put(2, Duration::from_secs(60), now);
        // Starting at the cooled key, the scan wraps to index 0.
        assert_eq!(select_key(&ledger, 2, now), Some(0));
        assert_eq!(select_key(&ledger, 1, now), Some(1));
    }

    #[test]
    fn key_scan_reports_nothing_when_all_cooling() {
        let mut ledger = CooldownLedger::new(2);
        let now = Instant::now();
        ledger.put(0, Duration::from_secs(60), now);
        ledger.put(1, Duration::from_secs(60), now);
        assert_eq!(select_key(&ledger, 0, now), None);
    }

    #[test]
    fn empty_key_ledger_selects_nothing() {
        let ledger = CooldownLedger::new(0);
        assert_eq!(select_key(&ledger, 0, Instant::now()), None);
    }

    #[test]
    fn model_scan_prefers_highest_priority_available() {
        let mut ledger = CooldownLedger::new(3);
        let now = Instant::now();
        ledger.put(0, Duration::from_secs(300), now);
        assert_eq!(select_model(&ledger, now), Some(1));
        // Once the cooldown lapses the top model is preferred again.
        assert_eq!(select_model(&ledger, now + Duration::from_secs(301)), Some(0));
    }

    #[test]
    fn model_scan_ignores_round_robin_position() {
        // There is no "start" parameter: priority order always wins.
        let ledger = CooldownLedger::new(4);
        assert_eq!(select_model(&ledger, Instant::now()), Some(0));
    }
}
