use std::{collections::HashMap, fs, path::Path, time::Duration};

use anyhow::{anyhow, Context, Result};
use serde::Deserialize;
use tracing::warn;
use url::Url;

pub const SETTINGS_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, Deserialize)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub youtube_api_url: String,
    pub youtube_api_key: Option<String>,
    pub trailer_results: u8,
    pub page_size: u32,
    pub request_timeout_secs: u64,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: "http://127.0.0.1:3000".into(),
            youtube_api_url: "https://www.googleapis.com/youtube/v3".into(),
            youtube_api_key: None,
            trailer_results: 1,
            page_size: 20,
            request_timeout_secs: 10,
        }
    }
}

impl ClientSettings {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Shared HTTP client honoring the configured request timeout.
    pub fn http_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.request_timeout())
            .build()
            .context("failed to build http client")
    }
}

/// Defaults, then `catalog.toml` in the working directory, then environment.
pub fn load_settings() -> ClientSettings {
    let mut settings = ClientSettings::default();

    if let Ok(raw) = fs::read_to_string(Path::new(SETTINGS_FILE)) {
        apply_file_overrides(&mut settings, &raw);
    }
    apply_env_overrides(&mut settings, |key| std::env::var(key).ok());

    settings
}

pub(crate) fn apply_file_overrides(settings: &mut ClientSettings, raw: &str) {
    let file_cfg = match toml::from_str::<HashMap<String, String>>(raw) {
        Ok(cfg) => cfg,
        Err(err) => {
            warn!("config: ignoring unreadable {SETTINGS_FILE}: {err}");
            return;
        }
    };

    if let Some(v) = file_cfg.get("api_base_url") {
        settings.api_base_url = v.clone();
    }
    if let Some(v) = file_cfg.get("youtube_api_url") {
        settings.youtube_api_url = v.clone();
    }
    if let Some(v) = file_cfg.get("youtube_api_key") {
        settings.youtube_api_key = Some(v.clone());
    }
    if let Some(v) = file_cfg.get("trailer_results") {
        if let Ok(parsed) = v.parse() {
            settings.trailer_results = parsed;
        }
    }
    if let Some(v) = file_cfg.get("page_size") {
        if let Ok(parsed) = v.parse() {
            settings.page_size = parsed;
        }
    }
    if let Some(v) = file_cfg.get("request_timeout_secs") {
        if let Ok(parsed) = v.parse() {
            settings.request_timeout_secs = parsed;
        }
    }
}

pub(crate) fn apply_env_overrides(
    settings: &mut ClientSettings,
    lookup: impl Fn(&str) -> Option<String>,
) {
    if let Some(v) = lookup("CATALOG_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(v) = lookup("YOUTUBE_API_URL") {
        settings.youtube_api_url = v;
    }

    if let Some(v) = lookup("YOUTUBE_API_KEY") {
        settings.youtube_api_key = Some(v);
    }
    if let Some(v) = lookup("APP__YOUTUBE_API_KEY") {
        settings.youtube_api_key = Some(v);
    }

    if let Some(v) = lookup("APP__TRAILER_RESULTS") {
        if let Ok(parsed) = v.parse() {
            settings.trailer_results = parsed;
        }
    }
    if let Some(v) = lookup("APP__PAGE_SIZE") {
        if let Ok(parsed) = v.parse() {
            settings.page_size = parsed;
        }
    }
    if let Some(v) = lookup("APP__REQUEST_TIMEOUT_SECS") {
        if let Ok(parsed) = v.parse() {
            settings.request_timeout_secs = parsed;
        }
    }
}

/// Trims whitespace and trailing slashes, rejecting anything that is not an
/// absolute http(s) URL.
pub fn normalize_base_url(raw: &str) -> Result<String> {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(anyhow!("base url must not be empty"));
    }

    let parsed = Url::parse(trimmed).with_context(|| format!("invalid base url '{trimmed}'"))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(anyhow!(
            "base url must start with http:// or https://, got '{trimmed}'"
        ));
    }

    Ok(trimmed.to_string())
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
