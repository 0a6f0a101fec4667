use serde::{Deserialize, Serialize};
use shared::{
    domain::{Movie, MovieId},
    protocol::MovieFilter,
};
use tokio::sync::broadcast;

const CHANGE_CHANNEL_CAPACITY: usize = 64;

/// Snapshot of everything the catalog screens render.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoviesState {
    pub movies: Vec<Movie>,
    pub favorites: Vec<Movie>,
    pub filter: MovieFilter,
}

impl MoviesState {
    pub fn movies(&self) -> &[Movie] {
        &self.movies
    }

    pub fn favorites(&self) -> &[Movie] {
        &self.favorites
    }

    pub fn filter(&self) -> &MovieFilter {
        &self.filter
    }

    pub fn movie(&self, id: MovieId) -> Option<&Movie> {
        self.movies.iter().find(|movie| movie.has_id(id))
    }

    pub fn is_favorite(&self, id: MovieId) -> bool {
        self.favorites.iter().any(|movie| movie.has_id(id))
    }
}

/// Partial update of [`MoviesState`]; unset fields keep their current value.
#[derive(Debug, Clone, Default)]
pub struct MoviesPatch {
    movies: Option<Vec<Movie>>,
    favorites: Option<Vec<Movie>>,
    filter: Option<MovieFilter>,
}

impl MoviesPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn movies(mut self, movies: Vec<Movie>) -> Self {
        self.movies = Some(movies);
        self
    }

    pub fn favorites(mut self, favorites: Vec<Movie>) -> Self {
        self.favorites = Some(favorites);
        self
    }

    pub fn filter(mut self, filter: MovieFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_none() && self.favorites.is_none() && self.filter.is_none()
    }
}

/// Single-writer state container.
///
/// Handlers borrow the store mutably for their whole run, so a
/// read-modify-write never interleaves with another handler on the same
/// store. Every applied change is broadcast to subscribers as a full
/// snapshot.
#[derive(Debug)]
pub struct MovieStore {
    state: MoviesState,
    changes: broadcast::Sender<MoviesState>,
}

impl Default for MovieStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MovieStore {
    pub fn new() -> Self {
        Self::with_state(MoviesState::default())
    }

    pub fn with_state(state: MoviesState) -> Self {
        let (changes, _) = broadcast::channel(CHANGE_CHANNEL_CAPACITY);
        Self { state, changes }
    }

    pub fn snapshot(&self) -> &MoviesState {
        &self.state
    }

    pub fn into_state(self) -> MoviesState {
        self.state
    }

    pub fn set_state(&mut self, state: MoviesState) {
        self.state = state;
        self.notify();
    }

    pub fn patch(&mut self, patch: MoviesPatch) {
        if patch.is_empty() {
            return;
        }
        if let Some(movies) = patch.movies {
            self.state.movies = movies;
        }
        if let Some(favorites) = patch.favorites {
            self.state.favorites = favorites;
        }
        if let Some(filter) = patch.filter {
            self.state.filter = filter;
        }
        self.notify();
    }

    pub fn subscribe(&self) -> broadcast::Receiver<MoviesState> {
        self.changes.subscribe()
    }

    fn notify(&self) {
        if self.changes.receiver_count() > 0 {
            let _ = self.changes.send(self.state.clone());
        }
    }
}
