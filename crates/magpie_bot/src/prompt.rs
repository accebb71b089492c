//! Per-mode prompt construction.

use crate::persona;
use magpie_core::{Article, Mode};
use rand::Rng;

/// Target length for one generated post, chosen fresh each run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LengthHint {
    /// Under 140 characters
    Short,
    /// Under 260 characters
    Medium,
}

impl LengthHint {
    /// Pick short or medium with equal probability.
    pub fn pick(rng: &mut impl Rng) -> Self {
        if rng.gen_bool(0.5) {
            LengthHint::Short
        } else {
            LengthHint::Medium
        }
    }

    /// The constraint line appended to every prompt.
    pub fn directive(self) -> &'static str {
        match self {
            LengthHint::Short => "Length: Ultra-short & punchy (under 140 chars).",
            LengthHint::Medium => "Length: Medium & insightful (under 260 chars).",
        }
    }
}

/// Build the full prompt for one generation request.
///
/// NEWS mode embeds the article title and tags and asks for a click hook;
/// without an article it degrades to the TIP task, which needs no context.
pub fn build_prompt(
    mode: Mode,
    article: Option<&Article>,
    hint: LengthHint,
    base_hashtag: &str,
) -> String {
    let preamble = persona(base_hashtag);
    let task = match (mode, article) {
        (Mode::News, Some(article)) => format!(
            "Task: Write a savvy, hook-filled comment/summary of this article to get people to click.\n\
             Article Title: {}\n\
             Tags: {}\n\
             Output: The tweet text + '👇'",
            article.title,
            article.tag_line()
        ),
        (Mode::Life, _) => "Task: Share a relatable thought, observation, or motivation for engineering students.\n\
             Themes: Tier-3 college struggles, overcoming imposter syndrome, 'Tutorial Hell', Placement anxiety, or the joy of fixing a bug.\n\
             Output: Just the tweet text."
            .to_string(),
        _ => "Task: Share one specific, high-value coding tip, 'condition' (if this then that), or teaching.\n\
             Topics: Clean Code norms, unexpected CSS behaviors, Node.js performance, System Design tradeoffs, or a 'Did you know?' fact.\n\
             Output: Just the tweet text."
            .to_string(),
    };
    format!("{preamble}\n{task}\n{}", hint.directive())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn article() -> Article {
        Article {
            title: "Rust 2.0 announced".to_string(),
            url: "https://dev.to/x/rust-2".to_string(),
            tags: vec!["rust".to_string(), "news".to_string()],
        }
    }

    #[test]
    fn news_prompt_embeds_article_and_hook_marker() {
        let prompt = build_prompt(Mode::News, Some(&article()), LengthHint::Short, "#tag");
        assert!(prompt.contains("Article Title: Rust 2.0 announced"));
        assert!(prompt.contains("Tags: rust, news"));
        assert!(prompt.contains('👇'));
        assert!(prompt.ends_with(LengthHint::Short.directive()));
    }

    #[test]
    fn life_prompt_targets_engineering_students() {
        let prompt = build_prompt(Mode::Life, None, LengthHint::Medium, "#tag");
        assert!(prompt.contains("imposter syndrome"));
        assert!(prompt.ends_with(LengthHint::Medium.directive()));
    }

    #[test]
    fn tip_prompt_needs_no_article() {
        let prompt = build_prompt(Mode::Tip, None, LengthHint::Short, "#tag");
        assert!(prompt.contains("high-value coding tip"));
    }

    #[test]
    fn news_without_article_degrades_to_tip_task() {
        let prompt = build_prompt(Mode::News, None, LengthHint::Short, "#tag");
        assert!(prompt.contains("high-value coding tip"));
    }

    #[test]
    fn every_prompt_carries_the_base_hashtag() {
        for mode in Mode::ALL {
            let prompt = build_prompt(mode, None, LengthHint::Medium, "#clubtag");
            assert!(prompt.contains("#clubtag"));
        }
    }

    #[test]
    fn pick_produces_both_hints() {
        let mut rng = StdRng::seed_from_u64(11);
        let picks: Vec<LengthHint> = (0..256).map(|_| LengthHint::pick(&mut rng)).collect();
        assert!(picks.contains(&LengthHint::Short));
        assert!(picks.contains(&LengthHint::Medium));
    }
}
