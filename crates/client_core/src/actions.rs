//! One handler per catalog intent.
//!
//! Remote handlers call a collaborator and patch the store only on success.
//! Every collaborator failure is logged and returned as
//! [`ActionError::Remote`]; the store is left exactly as it was.

use std::sync::Arc;

use shared::{
    domain::{Movie, MovieId},
    protocol::{MovieFilter, PageWindow, TrailerVideo},
};
use tracing::{debug, info, warn};

use crate::{
    error::ActionError,
    genres::tag_genre_image,
    list_ops::{with_appended, with_removed, with_replaced},
    store::{MovieStore, MoviesPatch},
    MissingTrailerSearch, MoviesService, TrailerSearch,
};

pub const PLACEHOLDER_POSTER_URL: &str = "https://in.bmscdn.com/iedb/movies/images/website/poster/large/ela-cheppanu-et00016781-24-03-2017-18-31-40.jpg";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MovieAction {
    FetchMovies(PageWindow),
    AddMovie(Movie),
    EditMovie(Movie),
    DeleteMovie(Movie),
    FilterMovies(MovieFilter),
    SaveFilter(MovieFilter),
    GetMovieTrailer { movie_title: String },
    ClearMovies,
    LikeMovie(Movie),
    CommentMovie(Movie),
    FavoriteMovie(Movie),
    DeleteFavoriteMovie(Movie),
    DeleteAllFavorites,
}

impl MovieAction {
    pub fn name(&self) -> &'static str {
        match self {
            Self::FetchMovies(_) => "fetch_movies",
            Self::AddMovie(_) => "add_movie",
            Self::EditMovie(_) => "edit_movie",
            Self::DeleteMovie(_) => "delete_movie",
            Self::FilterMovies(_) => "filter_movies",
            Self::SaveFilter(_) => "save_filter",
            Self::GetMovieTrailer { .. } => "get_movie_trailer",
            Self::ClearMovies => "clear_movies",
            Self::LikeMovie(_) => "like_movie",
            Self::CommentMovie(_) => "comment_movie",
            Self::FavoriteMovie(_) => "favorite_movie",
            Self::DeleteFavoriteMovie(_) => "delete_favorite_movie",
            Self::DeleteAllFavorites => "delete_all_favorites",
        }
    }
}

fn remote_failure(action: &'static str, source: anyhow::Error) -> ActionError {
    warn!(
        action,
        error = %format!("{source:#}"),
        "movie action failed; state unchanged"
    );
    ActionError::Remote { action, source }
}

fn require_id(movie: &Movie, action: &'static str) -> Result<MovieId, ActionError> {
    movie.id.ok_or(ActionError::MissingId { action })
}

pub struct MovieActions {
    movies: Arc<dyn MoviesService>,
    trailers: Arc<dyn TrailerSearch>,
}

impl MovieActions {
    pub fn new(movies: Arc<dyn MoviesService>, trailers: Arc<dyn TrailerSearch>) -> Self {
        Self { movies, trailers }
    }

    pub fn with_movies_service(movies: Arc<dyn MoviesService>) -> Self {
        Self::new(movies, Arc::new(MissingTrailerSearch))
    }

    pub async fn dispatch(
        &self,
        store: &mut MovieStore,
        action: MovieAction,
    ) -> Result<(), ActionError> {
        debug!(command = action.name(), "dispatching movie action");
        match action {
            MovieAction::FetchMovies(window) => self.fetch_movies(store, window).await,
            MovieAction::AddMovie(movie) => self.add_movie(store, movie).await,
            MovieAction::EditMovie(movie) => self.edit_movie(store, movie).await,
            MovieAction::DeleteMovie(movie) => self.delete_movie(store, movie).await,
            MovieAction::FilterMovies(filter) => self.filter_movies(store, filter).await,
            MovieAction::SaveFilter(filter) => {
                save_filter(store, &filter);
                Ok(())
            }
            MovieAction::GetMovieTrailer { movie_title } => {
                self.get_movie_trailer(&movie_title).await
            }
            MovieAction::ClearMovies => {
                clear_movies(store);
                Ok(())
            }
            MovieAction::LikeMovie(movie) => self.like_movie(store, movie).await,
            MovieAction::CommentMovie(movie) => self.comment_movie(store, movie).await,
            MovieAction::FavoriteMovie(movie) => {
                favorite_movie(store, movie);
                Ok(())
            }
            MovieAction::DeleteFavoriteMovie(movie) => {
                delete_favorite_movie(store, &movie);
                Ok(())
            }
            MovieAction::DeleteAllFavorites => {
                delete_all_favorites(store);
                Ok(())
            }
        }
    }

    /// Appends the requested page, tagging genre artwork on the way in.
    pub async fn fetch_movies(
        &self,
        store: &mut MovieStore,
        window: PageWindow,
    ) -> Result<(), ActionError> {
        let mut page = self
            .movies
            .get_movies(window)
            .await
            .map_err(|err| remote_failure("fetch_movies", err))?;
        page.iter_mut().for_each(tag_genre_image);

        let fetched = page.len();
        let movies = with_appended(&store.snapshot().movies, page);
        store.patch(MoviesPatch::new().movies(movies));
        debug!(
            start = window.start,
            end = window.end,
            fetched,
            total = store.snapshot().movies.len(),
            "movies: page appended"
        );
        Ok(())
    }

    pub async fn add_movie(
        &self,
        store: &mut MovieStore,
        mut movie: Movie,
    ) -> Result<(), ActionError> {
        if movie.poster.is_empty() {
            movie.poster = PLACEHOLDER_POSTER_URL.to_string();
        }

        let created = self
            .movies
            .add_movie(&movie)
            .await
            .map_err(|err| remote_failure("add_movie", err))?;
        info!(id = ?created.id, title = %created.title, "movies: created");

        let movies = with_appended(&store.snapshot().movies, [created]);
        store.patch(MoviesPatch::new().movies(movies));
        Ok(())
    }

    pub async fn edit_movie(
        &self,
        store: &mut MovieStore,
        movie: Movie,
    ) -> Result<(), ActionError> {
        self.update_movie(store, movie, "edit_movie").await
    }

    pub async fn like_movie(
        &self,
        store: &mut MovieStore,
        movie: Movie,
    ) -> Result<(), ActionError> {
        self.update_movie(store, movie, "like_movie").await
    }

    pub async fn comment_movie(
        &self,
        store: &mut MovieStore,
        movie: Movie,
    ) -> Result<(), ActionError> {
        self.update_movie(store, movie, "comment_movie").await
    }

    async fn update_movie(
        &self,
        store: &mut MovieStore,
        movie: Movie,
        action: &'static str,
    ) -> Result<(), ActionError> {
        let requested_id = require_id(&movie, action)?;
        let mut updated = self
            .movies
            .edit_movie(&movie)
            .await
            .map_err(|err| remote_failure(action, err))?;
        // Keep the entry addressable when the server echo omits the id.
        let id = *updated.id.get_or_insert(requested_id);

        let movies = with_replaced(&store.snapshot().movies, |m| m.has_id(id), updated);
        store.patch(MoviesPatch::new().movies(movies));
        debug!(action, %id, "movies: entry updated");
        Ok(())
    }

    pub async fn delete_movie(
        &self,
        store: &mut MovieStore,
        movie: Movie,
    ) -> Result<(), ActionError> {
        let id = require_id(&movie, "delete_movie")?;
        self.movies
            .delete_movie(&movie)
            .await
            .map_err(|err| remote_failure("delete_movie", err))?;

        let movies = with_removed(&store.snapshot().movies, |m| m.has_id(id));
        store.patch(MoviesPatch::new().movies(movies));
        info!(%id, "movies: deleted");
        Ok(())
    }

    /// Replaces the whole list with the server-side filter result.
    pub async fn filter_movies(
        &self,
        store: &mut MovieStore,
        filter: MovieFilter,
    ) -> Result<(), ActionError> {
        let result = self
            .movies
            .filter_movies(&filter)
            .await
            .map_err(|err| remote_failure("filter_movies", err))?;
        debug!(matched = result.len(), "movies: filter applied");
        store.patch(MoviesPatch::new().movies(result));
        Ok(())
    }

    /// Looks up a trailer. The result is not merged into state.
    pub async fn get_movie_trailer(&self, movie_title: &str) -> Result<(), ActionError> {
        let result = self
            .trailers
            .search_trailer(movie_title)
            .await
            .map_err(|err| remote_failure("get_movie_trailer", err))?;
        info!(
            title = movie_title,
            videos = result.videos.len(),
            trailer = ?result.first().map(TrailerVideo::watch_url),
            "movies: trailer search finished"
        );
        Ok(())
    }
}

pub fn save_filter(store: &mut MovieStore, filter: &MovieFilter) {
    store.patch(MoviesPatch::new().filter(filter.clone()));
}

pub fn clear_movies(store: &mut MovieStore) {
    store.patch(MoviesPatch::new().movies(Vec::new()));
}

pub fn favorite_movie(store: &mut MovieStore, movie: Movie) {
    let favorites = with_appended(&store.snapshot().favorites, [movie]);
    store.patch(MoviesPatch::new().favorites(favorites));
}

pub fn delete_favorite_movie(store: &mut MovieStore, movie: &Movie) {
    let Some(id) = movie.id else {
        return;
    };
    let favorites = with_removed(&store.snapshot().favorites, |m| m.has_id(id));
    store.patch(MoviesPatch::new().favorites(favorites));
}

pub fn delete_all_favorites(store: &mut MovieStore) {
    store.patch(MoviesPatch::new().favorites(Vec::new()));
}

#[cfg(test)]
#[path = "tests/actions_tests.rs"]
mod tests;
