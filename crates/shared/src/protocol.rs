use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Half-open page window over the remote movie list: `start..end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageWindow {
    pub start: u32,
    pub end: u32,
}

impl PageWindow {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// Search criteria forwarded untouched to the movies API.
///
/// Keys and values are not interpreted on the client; they end up as query
/// parameters on the filter request and are kept in state for redisplay.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieFilter {
    criteria: BTreeMap<String, String>,
}

impl MovieFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.criteria.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.criteria.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.criteria.is_empty()
    }

    pub fn query_pairs(&self) -> Vec<(&str, &str)> {
        self.criteria
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect()
    }
}

impl<K, V> FromIterator<(K, V)> for MovieFilter
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            criteria: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerVideo {
    pub video_id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel_title: Option<String>,
}

impl TrailerVideo {
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.video_id)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrailerResult {
    pub videos: Vec<TrailerVideo>,
}

impl TrailerResult {
    pub fn first(&self) -> Option<&TrailerVideo> {
        self.videos.first()
    }
}
