//! News article candidate.

use serde::{Deserialize, Serialize};

/// A news article candidate for NEWS-mode posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Article headline
    pub title: String,
    /// Canonical URL appended to the final post
    pub url: String,
    /// Topic tags, used to steer the generated hook
    pub tags: Vec<String>,
}

impl Article {
    /// Tags joined for prompt interpolation.
    pub fn tag_line(&self) -> String {
        self.tags.join(", ")
    }
}
