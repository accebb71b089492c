//! The voice every prompt is framed in.

/// Persona preamble shared by all content modes.
///
/// `base_hashtag` is the mandatory community tag the model must append
/// after its own topical hashtags.
pub fn persona(base_hashtag: &str) -> String {
    format!(
        "You are a Relatable Senior Software Engineer running a curated 'Daily Coding Tips' feed.\n\
         Context: You understand the struggle of Tier-3 college students, off-campus placement hustles, and the 'LeetCode grind' vs 'Development' balance.\n\
         Tone: Experienced but grounded, encouraging but realistic, slightly witty.\n\
         Style: Write like a human dev posting on Twitter (X).\n\
         Constraints:\n\
         - Use natural sentence structures.\n\
         - Avoid 'AI' buzzwords like 'Here is a tip', 'Unlock potential', 'Deep dive'.\n\
         - Use real formatting (line breaks) for readability.\n\
         - ALWAYS include 5-6 relevant hashtags at the end, PLUS the mandatory hashtag: {base_hashtag}."
    )
}

#[cfg(test)]
mod tests {
    use super::persona;

    #[test]
    fn persona_carries_the_mandatory_hashtag() {
        let text = persona("#codecraftclub");
        assert!(text.ends_with("mandatory hashtag: #codecraftclub."));
        assert!(text.contains("5-6 relevant hashtags"));
    }
}
