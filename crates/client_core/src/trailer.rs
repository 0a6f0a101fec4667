use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use shared::{
    error::ApiError,
    protocol::{TrailerResult, TrailerVideo},
};

use crate::{
    config::{normalize_base_url, ClientSettings},
    TrailerSearch,
};

/// Trailer lookup through the YouTube Data API `search` endpoint.
pub struct YoutubeTrailerSearch {
    http: Client,
    api_url: String,
    api_key: Option<String>,
    max_results: u8,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Debug, Deserialize)]
struct SearchItem {
    id: SearchItemId,
    snippet: Option<SearchSnippet>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchItemId {
    video_id: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchSnippet {
    title: String,
    channel_title: Option<String>,
}

impl YoutubeTrailerSearch {
    pub fn new(http: Client, api_url: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            http,
            api_url: api_url.into(),
            api_key,
            max_results: 1,
        }
    }

    pub fn with_max_results(mut self, max_results: u8) -> Self {
        self.max_results = max_results.max(1);
        self
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let api_url = normalize_base_url(&settings.youtube_api_url)?;
        Ok(Self::new(
            settings.http_client()?,
            api_url,
            settings.youtube_api_key.clone(),
        )
        .with_max_results(settings.trailer_results))
    }
}

#[async_trait]
impl TrailerSearch for YoutubeTrailerSearch {
    async fn search_trailer(&self, title: &str) -> Result<TrailerResult> {
        let title = title.trim();
        if title.is_empty() {
            return Err(anyhow!("trailer search requires a movie title"));
        }
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| anyhow!("youtube api key is not configured"))?;

        let url = format!("{}/search", self.api_url);
        let query = format!("{title} trailer");
        let max_results = self.max_results.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[
                ("part", "snippet"),
                ("type", "video"),
                ("maxResults", max_results.as_str()),
                ("q", query.as_str()),
                ("key", api_key),
            ])
            .send()
            .await
            .with_context(|| format!("failed to reach video search at {url}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status.as_u16(), body).into());
        }

        let body: SearchResponse = response
            .json()
            .await
            .context("video search returned an unexpected payload")?;

        let videos = body
            .items
            .into_iter()
            .filter_map(|item| {
                let video_id = item.id.video_id?;
                let (title, channel_title) = match item.snippet {
                    Some(snippet) => (snippet.title, snippet.channel_title),
                    None => (String::new(), None),
                };
                Some(TrailerVideo {
                    video_id,
                    title,
                    channel_title,
                })
            })
            .collect();

        Ok(TrailerResult { videos })
    }
}

#[cfg(test)]
#[path = "tests/trailer_tests.rs"]
mod tests;
