//! Environment configuration.

use crate::ApiKey;
use magpie_error::ConfigError;
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Default model roster, most capable first.
pub const DEFAULT_MODELS: [&str; 4] = [
    "gemini-2.0-flash",
    "gemini-1.5-flash",
    "gemini-2.5-flash-lite",
    "gemini-1.5-flash-8b",
];

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_STATE_FILE: &str = "bot_state.json";
const DEFAULT_BASE_HASHTAG: &str = "#codecraftclub";

/// Process-wide configuration, read once at startup.
#[derive(Debug, Clone)]
pub struct MagpieConfig {
    /// HTTP listen port (`MAGPIE_PORT`, default 3000)
    pub port: u16,
    /// Generation API keys (`GEMINI_API_KEYS` comma-separated, or
    /// `GEMINI_API_KEY`), in rotation order
    pub gemini_keys: Vec<ApiKey>,
    /// Model priority order (`MAGPIE_MODELS` comma-separated, or the
    /// built-in roster)
    pub models: Vec<String>,
    /// X API OAuth2 user-context token (`X_ACCESS_TOKEN`)
    pub x_access_token: String,
    /// Where the bot state record lives (`MAGPIE_STATE_FILE`)
    pub state_file: PathBuf,
    /// Public base URL to keep-alive ping (`MAGPIE_KEEPALIVE_URL`), if any
    pub keepalive_url: Option<String>,
    /// Mandatory hashtag appended by the persona (`MAGPIE_BASE_HASHTAG`)
    pub base_hashtag: String,
}

impl MagpieConfig {
    /// Load configuration from the environment, reading `.env` first if
    /// present.
    ///
    /// Missing credentials are warnings, not errors: the bot can still
    /// serve its dashboard, and the rotation controller reports `NoKeys`
    /// at call time.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Missing .env is fine; values may come from the real environment.
        let _ = dotenvy::dotenv();

        let port = match env::var("MAGPIE_PORT").or_else(|_| env::var("PORT")) {
            Ok(raw) => raw
                .parse::<u16>()
                .map_err(|_| ConfigError::new(format!("invalid port value: {raw}")))?,
            Err(_) => DEFAULT_PORT,
        };

        let keys_raw = env::var("GEMINI_API_KEYS")
            .or_else(|_| env::var("GEMINI_API_KEY"))
            .unwrap_or_default();
        let gemini_keys: Vec<ApiKey> = keys_raw
            .split(',')
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(ApiKey::from)
            .collect();
        if gemini_keys.is_empty() {
            warn!("no Gemini API keys configured; content generation will fail");
        }

        let models = match env::var("MAGPIE_MODELS") {
            Ok(raw) => {
                let models: Vec<String> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|m| !m.is_empty())
                    .map(str::to_string)
                    .collect();
                if models.is_empty() {
                    return Err(ConfigError::new("MAGPIE_MODELS is set but empty"));
                }
                models
            }
            Err(_) => DEFAULT_MODELS.iter().map(|m| m.to_string()).collect(),
        };

        let x_access_token = env::var("X_ACCESS_TOKEN").unwrap_or_default();
        if x_access_token.is_empty() {
            warn!("X_ACCESS_TOKEN not set; publishing will fail");
        }

        let state_file = env::var("MAGPIE_STATE_FILE")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_STATE_FILE));

        let keepalive_url = env::var("MAGPIE_KEEPALIVE_URL")
            .or_else(|_| env::var("RENDER_EXTERNAL_URL"))
            .ok()
            .filter(|url| !url.is_empty());

        let base_hashtag = env::var("MAGPIE_BASE_HASHTAG")
            .ok()
            .filter(|tag| !tag.is_empty())
            .unwrap_or_else(|| DEFAULT_BASE_HASHTAG.to_string());

        Ok(Self {
            port,
            gemini_keys,
            models,
            x_access_token,
            state_file,
            keepalive_url,
            base_hashtag,
        })
    }
}
