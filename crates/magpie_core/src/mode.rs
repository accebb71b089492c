//! Content modes for a bot run.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// The content category for one bot run.
///
/// # Examples
///
/// ```
/// use magpie_core::Mode;
/// use std::str::FromStr;
///
/// assert_eq!(format!("{}", Mode::News), "NEWS");
/// assert_eq!(Mode::from_str("TIP").unwrap(), Mode::Tip);
/// ```
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "UPPERCASE")]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Comment on a fetched tech news article, linking the source
    News,
    /// Relatable engineering-life observation or motivation
    Life,
    /// One specific, high-value coding tip. The fallback backstop:
    /// it needs nothing beyond text generation.
    Tip,
}

impl Mode {
    /// All modes, in declaration order.
    pub const ALL: [Mode; 3] = [Mode::News, Mode::Life, Mode::Tip];

    /// Pick the next mode uniformly at random, never repeating `last`.
    pub fn pick(last: Option<Mode>, rng: &mut impl Rng) -> Mode {
        let candidates = available_modes(last);
        candidates[rng.gen_range(0..candidates.len())]
    }
}

/// Modes eligible for the next run: every mode except the previous one.
pub fn available_modes(last: Option<Mode>) -> Vec<Mode> {
    Mode::ALL
        .into_iter()
        .filter(|m| Some(*m) != last)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn available_modes_excludes_previous() {
        assert_eq!(available_modes(Some(Mode::News)), vec![Mode::Life, Mode::Tip]);
        assert_eq!(available_modes(Some(Mode::Life)), vec![Mode::News, Mode::Tip]);
        assert_eq!(available_modes(Some(Mode::Tip)), vec![Mode::News, Mode::Life]);
    }

    #[test]
    fn available_modes_without_history_has_all_three() {
        assert_eq!(available_modes(None), vec![Mode::News, Mode::Life, Mode::Tip]);
    }

    #[test]
    fn pick_never_repeats_last_mode() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..64 {
            assert_ne!(Mode::pick(Some(Mode::Tip), &mut rng), Mode::Tip);
        }
    }

    #[test]
    fn serde_uses_uppercase_names() {
        assert_eq!(serde_json::to_string(&Mode::News).unwrap(), "\"NEWS\"");
        let parsed: Mode = serde_json::from_str("\"LIFE\"").unwrap();
        assert_eq!(parsed, Mode::Life);
    }
}
