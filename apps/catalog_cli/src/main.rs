use std::sync::Arc;

use anyhow::{anyhow, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use client_core::{
    load_settings, ClientSettings, HttpMoviesService, MovieAction, MovieActions, MovieStore,
    YoutubeTrailerSearch,
};
use shared::{
    domain::{Movie, MovieComment, MovieId},
    protocol::{MovieFilter, PageWindow},
};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Browse and edit the movie catalog from the terminal")]
struct Cli {
    /// Overrides the configured catalog API base url.
    #[arg(long)]
    api_url: Option<String>,
    #[arg(long)]
    youtube_key: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Fetch {
        #[arg(long, default_value_t = 0)]
        start: u32,
        #[arg(long)]
        end: Option<u32>,
    },
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        genre: String,
        #[arg(long, default_value = "")]
        poster: String,
        #[arg(long)]
        year: Option<u16>,
    },
    Edit {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        genre: Option<String>,
        #[arg(long)]
        poster: Option<String>,
    },
    Delete {
        #[arg(long)]
        id: i64,
    },
    Like {
        #[arg(long)]
        id: i64,
    },
    Comment {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        author: String,
        #[arg(long)]
        text: String,
    },
    Favorite {
        #[arg(long)]
        id: i64,
    },
    /// Filters with `key=value` criteria passed through to the API.
    Filter { criteria: Vec<String> },
    Trailer {
        #[arg(long)]
        title: String,
    },
}

fn parse_criteria(raw: &[String]) -> Result<MovieFilter> {
    raw.iter()
        .map(|pair| {
            pair.split_once('=')
                .map(|(k, v)| (k.trim().to_string(), v.trim().to_string()))
                .ok_or_else(|| anyhow!("filter criteria must look like key=value, got '{pair}'"))
        })
        .collect()
}

fn liked(mut movie: Movie) -> Movie {
    movie.likes = movie.likes.saturating_add(1);
    movie
}

/// Loads the first page and returns the listed movie with `id`.
async fn listed_movie(
    actions: &MovieActions,
    store: &mut MovieStore,
    settings: &ClientSettings,
    id: i64,
) -> Result<Movie> {
    actions
        .fetch_movies(store, PageWindow::new(0, settings.page_size))
        .await?;
    store
        .snapshot()
        .movie(MovieId(id))
        .cloned()
        .ok_or_else(|| {
            anyhow!(
                "movie {id} is not among the first {} entries",
                settings.page_size
            )
        })
}

async fn plan(
    command: Command,
    actions: &MovieActions,
    store: &mut MovieStore,
    settings: &ClientSettings,
) -> Result<Vec<MovieAction>> {
    let planned = match command {
        Command::Fetch { start, end } => {
            let end = end.unwrap_or_else(|| start.saturating_add(settings.page_size));
            vec![MovieAction::FetchMovies(PageWindow::new(start, end))]
        }
        Command::Add {
            title,
            genre,
            poster,
            year,
        } => {
            let movie = Movie::new(title, genre).with_poster(poster);
            let movie = match year {
                Some(year) => movie.with_year(year),
                None => movie,
            };
            vec![MovieAction::AddMovie(movie)]
        }
        Command::Edit {
            id,
            title,
            genre,
            poster,
        } => {
            let mut movie = listed_movie(actions, store, settings, id).await?;
            if let Some(title) = title {
                movie.title = title;
            }
            if let Some(genre) = genre {
                movie.genre = genre;
            }
            if let Some(poster) = poster {
                movie.poster = poster;
            }
            vec![MovieAction::EditMovie(movie)]
        }
        Command::Delete { id } => {
            let movie = listed_movie(actions, store, settings, id).await?;
            vec![MovieAction::DeleteMovie(movie)]
        }
        Command::Like { id } => {
            let movie = listed_movie(actions, store, settings, id).await?;
            vec![MovieAction::LikeMovie(liked(movie))]
        }
        Command::Comment { id, author, text } => {
            let mut movie = listed_movie(actions, store, settings, id).await?;
            movie.comments.push(MovieComment {
                author,
                text,
                posted_at: Some(Utc::now()),
            });
            vec![MovieAction::CommentMovie(movie)]
        }
        Command::Favorite { id } => {
            let movie = listed_movie(actions, store, settings, id).await?;
            vec![MovieAction::FavoriteMovie(movie)]
        }
        Command::Filter { criteria } => {
            let filter = parse_criteria(&criteria)?;
            vec![
                MovieAction::SaveFilter(filter.clone()),
                MovieAction::FilterMovies(filter),
            ]
        }
        Command::Trailer { title } => vec![MovieAction::GetMovieTrailer { movie_title: title }],
    };
    Ok(planned)
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(api_url) = cli.api_url {
        settings.api_base_url = api_url;
    }
    if let Some(key) = cli.youtube_key {
        settings.youtube_api_key = Some(key);
    }
    info!(api = %settings.api_base_url, "catalog: using movies API");

    let actions = MovieActions::new(
        Arc::new(HttpMoviesService::from_settings(&settings)?),
        Arc::new(YoutubeTrailerSearch::from_settings(&settings)?),
    );
    let mut store = MovieStore::new();

    for action in plan(cli.command, &actions, &mut store, &settings).await? {
        actions.dispatch(&mut store, action).await?;
    }

    let state = store.into_state();
    println!("{}", serde_json::to_string_pretty(&state)?);
    Ok(())
}
