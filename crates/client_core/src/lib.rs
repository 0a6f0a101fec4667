//! Client-side state handling for the movie catalog.
//!
//! Handlers in [`actions`] call a [`MoviesService`] or [`TrailerSearch`]
//! collaborator and patch a [`MovieStore`] with the outcome.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::Movie,
    protocol::{MovieFilter, PageWindow, TrailerResult},
};

pub mod actions;
pub mod config;
pub mod error;
pub mod genres;
pub mod http;
pub mod list_ops;
pub mod store;
pub mod trailer;

pub use actions::{MovieAction, MovieActions, PLACEHOLDER_POSTER_URL};
pub use config::{load_settings, ClientSettings};
pub use error::ActionError;
pub use http::HttpMoviesService;
pub use store::{MovieStore, MoviesPatch, MoviesState};
pub use trailer::YoutubeTrailerSearch;

/// Remote data access for movie records.
#[async_trait]
pub trait MoviesService: Send + Sync {
    async fn get_movies(&self, window: PageWindow) -> Result<Vec<Movie>>;
    async fn add_movie(&self, movie: &Movie) -> Result<Movie>;
    async fn edit_movie(&self, movie: &Movie) -> Result<Movie>;
    async fn delete_movie(&self, movie: &Movie) -> Result<()>;
    async fn filter_movies(&self, filter: &MovieFilter) -> Result<Vec<Movie>>;
}

pub struct MissingMoviesService;

#[async_trait]
impl MoviesService for MissingMoviesService {
    async fn get_movies(&self, window: PageWindow) -> Result<Vec<Movie>> {
        Err(anyhow!(
            "movies service is unavailable (window {}..{})",
            window.start,
            window.end
        ))
    }

    async fn add_movie(&self, movie: &Movie) -> Result<Movie> {
        Err(anyhow!(
            "movies service is unavailable (add '{}')",
            movie.title
        ))
    }

    async fn edit_movie(&self, movie: &Movie) -> Result<Movie> {
        Err(anyhow!(
            "movies service is unavailable (edit '{}')",
            movie.title
        ))
    }

    async fn delete_movie(&self, movie: &Movie) -> Result<()> {
        Err(anyhow!(
            "movies service is unavailable (delete '{}')",
            movie.title
        ))
    }

    async fn filter_movies(&self, _filter: &MovieFilter) -> Result<Vec<Movie>> {
        Err(anyhow!("movies service is unavailable"))
    }
}

/// Video search used to look up a trailer for a title.
#[async_trait]
pub trait TrailerSearch: Send + Sync {
    async fn search_trailer(&self, title: &str) -> Result<TrailerResult>;
}

pub struct MissingTrailerSearch;

#[async_trait]
impl TrailerSearch for MissingTrailerSearch {
    async fn search_trailer(&self, title: &str) -> Result<TrailerResult> {
        Err(anyhow!("trailer search is unavailable (title '{title}')"))
    }
}
