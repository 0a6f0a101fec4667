//! REST binding of [`MoviesService`] for a json-server style catalog API.

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Movie, MovieId},
    error::ApiError,
    protocol::{MovieFilter, PageWindow},
};
use tracing::debug;

use crate::{
    config::{normalize_base_url, ClientSettings},
    MoviesService,
};

pub struct HttpMoviesService {
    http: Client,
    base_url: String,
}

impl HttpMoviesService {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    pub fn with_client(http: Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn from_settings(settings: &ClientSettings) -> Result<Self> {
        let base_url = normalize_base_url(&settings.api_base_url)?;
        Ok(Self::with_client(settings.http_client()?, base_url))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn movies_url(&self) -> String {
        format!("{}/movies", self.base_url)
    }

    fn movie_url(&self, id: MovieId) -> String {
        format!("{}/movies/{id}", self.base_url)
    }
}

fn require_id(movie: &Movie) -> Result<MovieId> {
    movie
        .id
        .ok_or_else(|| anyhow!("movie '{}' has no id", movie.title))
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(ApiError::from_status(status.as_u16(), body).into())
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T> {
    let response = ensure_success(response).await?;
    response
        .json()
        .await
        .context("movies API returned an unexpected payload")
}

#[async_trait]
impl MoviesService for HttpMoviesService {
    async fn get_movies(&self, window: PageWindow) -> Result<Vec<Movie>> {
        let url = self.movies_url();
        debug!(start = window.start, end = window.end, "movies: fetching page");
        let response = self
            .http
            .get(&url)
            .query(&[("_start", window.start), ("_end", window.end)])
            .send()
            .await
            .with_context(|| format!("failed to reach movies API at {url}"))?;
        decode(response).await
    }

    async fn add_movie(&self, movie: &Movie) -> Result<Movie> {
        let url = self.movies_url();
        let response = self
            .http
            .post(&url)
            .json(movie)
            .send()
            .await
            .with_context(|| format!("failed to reach movies API at {url}"))?;
        decode(response).await
    }

    async fn edit_movie(&self, movie: &Movie) -> Result<Movie> {
        let url = self.movie_url(require_id(movie)?);
        let response = self
            .http
            .put(&url)
            .json(movie)
            .send()
            .await
            .with_context(|| format!("failed to reach movies API at {url}"))?;
        decode(response).await
    }

    async fn delete_movie(&self, movie: &Movie) -> Result<()> {
        let url = self.movie_url(require_id(movie)?);
        let response = self
            .http
            .delete(&url)
            .send()
            .await
            .with_context(|| format!("failed to reach movies API at {url}"))?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn filter_movies(&self, filter: &MovieFilter) -> Result<Vec<Movie>> {
        let url = self.movies_url();
        debug!(criteria = filter.query_pairs().len(), "movies: filtering");
        let response = self
            .http
            .get(&url)
            .query(&filter.query_pairs())
            .send()
            .await
            .with_context(|| format!("failed to reach movies API at {url}"))?;
        decode(response).await
    }
}

#[cfg(test)]
#[path = "tests/http_tests.rs"]
mod tests;
