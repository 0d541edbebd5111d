use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::preview::Stage;

/// Settings of one editor session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EditorConfig {
    /// Root of the settings API, e.g. `http://localhost:8087`.
    pub base_url: String,
    /// Identity sent with every request and compared against lock holders.
    pub user_email: String,
    #[serde(default)]
    pub stage: Stage,
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    /// Release a lock still held by this editor when the session closes.
    #[serde(default = "default_true")]
    pub release_lock_on_close: bool,
}

impl EditorConfig {
    #[must_use]
    pub fn new(base_url: impl Into<String>, user_email: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            user_email: user_email.into(),
            stage: Stage::default(),
            request_timeout: default_request_timeout(),
            release_lock_on_close: true,
        }
    }
}

fn default_request_timeout() -> Duration {
    console_http::DEFAULT_REQUEST_TIMEOUT
}

fn default_true() -> bool {
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn minimal_config_takes_defaults() {
        let config: EditorConfig = serde_json::from_value(json!({
            "base_url": "http://localhost:8087",
            "user_email": "alice@example.com"
        }))
        .unwrap();

        assert_eq!(config, EditorConfig::new("http://localhost:8087", "alice@example.com"));
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert_eq!(config.stage, Stage::Dev);
        assert!(config.release_lock_on_close);
    }

    #[test]
    fn timeout_is_human_readable() {
        let config: EditorConfig = serde_json::from_value(json!({
            "base_url": "https://support.example.com",
            "user_email": "alice@example.com",
            "stage": "PROD",
            "request_timeout": "5s",
            "release_lock_on_close": false
        }))
        .unwrap();

        assert_eq!(config.request_timeout, Duration::from_secs(5));
        assert_eq!(config.stage, Stage::Prod);
        assert!(!config.release_lock_on_close);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let result: Result<EditorConfig, _> = serde_json::from_value(json!({
            "base_url": "http://localhost:8087",
            "user_email": "alice@example.com",
            "retries": 3
        }));
        assert!(result.is_err());
    }
}
