use std::{fs, path::Path, time::Duration};

use anyhow::{anyhow, Context};
use quiz_core::{controller::DEFAULT_ADVANCE_DELAY, DEFAULT_API_URL};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const CONFIG_FILE: &str = "banana-quiz.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub api_url: String,
    pub advance_delay_ms: u64,
    pub request_timeout_secs: Option<u64>,
    pub user: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.into(),
            advance_delay_ms: DEFAULT_ADVANCE_DELAY.as_millis() as u64,
            request_timeout_secs: None,
            user: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    api_url: Option<String>,
    advance_delay_ms: Option<u64>,
    request_timeout_secs: Option<u64>,
    user: Option<String>,
}

impl Settings {
    pub fn advance_delay(&self) -> Duration {
        Duration::from_millis(self.advance_delay_ms)
    }

    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    pub fn validate(&self) -> anyhow::Result<Url> {
        let url = Url::parse(self.api_url.trim())
            .with_context(|| format!("invalid puzzle api url '{}'", self.api_url))?;
        match url.scheme() {
            "http" | "https" => Ok(url),
            other => Err(anyhow!(
                "puzzle api url must use http or https, got '{other}'"
            )),
        }
    }
}

pub fn load_settings(path: &Path) -> Settings {
    load_settings_from(path, |key| std::env::var(key).ok())
}

/// Defaults, then the TOML file (if present), then environment variables.
pub fn load_settings_from(path: &Path, env: impl Fn(&str) -> Option<String>) -> Settings {
    let mut settings = Settings::default();

    if let Ok(raw) = fs::read_to_string(path) {
        match toml::from_str::<FileSettings>(&raw) {
            Ok(file_cfg) => {
                if let Some(v) = file_cfg.api_url {
                    settings.api_url = v;
                }
                if let Some(v) = file_cfg.advance_delay_ms {
                    settings.advance_delay_ms = v;
                }
                if file_cfg.request_timeout_secs.is_some() {
                    settings.request_timeout_secs = file_cfg.request_timeout_secs;
                }
                if file_cfg.user.is_some() {
                    settings.user = file_cfg.user;
                }
            }
            Err(err) => warn!("config: ignoring {}: {err}", path.display()),
        }
    }

    if let Some(v) = env("QUIZ_API_URL") {
        settings.api_url = v;
    }
    if let Some(v) = env("APP__API_URL") {
        settings.api_url = v;
    }

    if let Some(v) = env("APP__ADVANCE_DELAY_MS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.advance_delay_ms = parsed,
            Err(_) => warn!("config: APP__ADVANCE_DELAY_MS is not a number: {v}"),
        }
    }

    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        match v.parse::<u64>() {
            Ok(parsed) => settings.request_timeout_secs = Some(parsed),
            Err(_) => warn!("config: APP__REQUEST_TIMEOUT_SECS is not a number: {v}"),
        }
    }

    if let Some(v) = env("APP__USER") {
        settings.user = Some(v);
    }

    settings
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
