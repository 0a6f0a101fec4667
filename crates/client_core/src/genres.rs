use shared::domain::Movie;

/// Genres with bundled artwork under [`GENRE_IMAGE_DIR`].
pub const GENRES: [&str; 12] = [
    "action",
    "comedy",
    "crime",
    "documentary",
    "drama",
    "fantasy",
    "film noir",
    "horror",
    "romance",
    "science fiction",
    "westerns",
    "animation",
];

pub const GENRE_IMAGE_DIR: &str = "assets/movies-genres";

/// Lowercased first category of a comma-delimited genre field.
pub fn genre_token(genre: &str) -> String {
    genre
        .split(',')
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

pub fn genre_image_for(genre: &str) -> Option<String> {
    let token = genre_token(genre);
    GENRES
        .contains(&token.as_str())
        .then(|| format!("{GENRE_IMAGE_DIR}/{token}.png"))
}

pub fn tag_genre_image(movie: &mut Movie) {
    movie.genre_image = genre_image_for(&movie.genre);
}
