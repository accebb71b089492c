//! dev.to news source.

use async_trait::async_trait;
use magpie_core::{Article, LogLevel, LogSink, NewsSource};
use magpie_error::NewsError;
use rand::Rng;
use serde::Deserialize;
use std::time::Duration;
use tracing::instrument;

const DEFAULT_BASE_URL: &str = "https://dev.to";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Pool size of top-rising articles to pick from.
const CANDIDATE_POOL: u32 = 30;

/// Fetches the current top-rising dev.to articles and picks one at random.
pub struct NewsFetcher {
    http: reqwest::Client,
    base_url: String,
    logs: LogSink,
}

impl NewsFetcher {
    /// Fetcher against the public dev.to API.
    pub fn new(logs: LogSink) -> Self {
        Self::with_base_url(DEFAULT_BASE_URL, logs)
    }

    /// Fetcher against a custom endpoint (tests, proxies).
    pub fn with_base_url(base_url: impl Into<String>, logs: LogSink) -> Self {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            logs,
        }
    }

    async fn fetch_pool(&self) -> Result<Vec<Article>, NewsError> {
        let url = format!(
            "{}/api/articles?top=1&per_page={}",
            self.base_url, CANDIDATE_POOL
        );
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| NewsError::new(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(NewsError::new(format!("articles endpoint returned {status}")));
        }

        let articles: Vec<DevToArticle> = response
            .json()
            .await
            .map_err(|e| NewsError::new(format!("unreadable articles payload: {e}")))?;

        Ok(articles.into_iter().map(DevToArticle::into_article).collect())
    }
}

#[async_trait]
impl NewsSource for NewsFetcher {
    #[instrument(skip(self))]
    async fn fetch_candidate(&self) -> Option<Article> {
        self.logs
            .emit(LogLevel::Info, "Fetching top rising articles from dev.to...");

        let pool = match self.fetch_pool().await {
            Ok(pool) => pool,
            Err(err) => {
                self.logs
                    .emit(LogLevel::Error, format!("News fetch error: {}", err.message));
                return None;
            }
        };
        if pool.is_empty() {
            self.logs.emit(LogLevel::Warning, "No articles found.");
            return None;
        }

        let index = rand::thread_rng().gen_range(0..pool.len());
        let article = pool[index].clone();
        self.logs
            .emit(LogLevel::Success, format!("Found article: {}", article.title));
        Some(article)
    }
}

#[derive(Debug, Deserialize)]
struct DevToArticle {
    title: String,
    url: String,
    #[serde(default)]
    tag_list: Vec<String>,
}

impl DevToArticle {
    fn into_article(self) -> Article {
        Article {
            title: self.title,
            url: self.url,
            tags: self.tag_list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_devto_payload() {
        let raw = r#"[{
            "title": "Why your build is slow",
            "url": "https://dev.to/someone/why-your-build-is-slow",
            "tag_list": ["performance", "tooling"]
        }]"#;
        let articles: Vec<DevToArticle> = serde_json::from_str(raw).unwrap();
        let article = articles.into_iter().next().unwrap().into_article();
        assert_eq!(article.title, "Why your build is slow");
        assert_eq!(article.tag_line(), "performance, tooling");
    }

    #[test]
    fn missing_tags_default_to_empty() {
        let raw = r#"[{ "title": "t", "url": "https://dev.to/x" }]"#;
        let articles: Vec<DevToArticle> = serde_json::from_str(raw).unwrap();
        assert!(articles[0].tag_list.is_empty());
    }
}
