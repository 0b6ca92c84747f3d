use serde::{Deserialize, Serialize};
use std::{io::Read, path::Path};

use crate::error::{AppError, AppResult};

/// One row of the movies file. Extra columns such as `movieId` are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title: String,
    /// Pipe-delimited genre tags, e.g. `Adventure|Animation|Comedy`
    #[serde(default)]
    pub genres: String,
}

impl MovieRecord {
    pub fn new(title: impl Into<String>, genres: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            genres: genres.into(),
        }
    }

    /// Text fed to the vectorizer: the title followed by the genre tags.
    pub fn document(&self) -> String {
        format!("{} {}", self.title, self.genres.replace('|', " "))
    }

    /// Genre tags split on `|`, empty tags dropped.
    pub fn genre_list(&self) -> Vec<&str> {
        self.genres
            .split('|')
            .map(str::trim)
            .filter(|genre| !genre.is_empty())
            .collect()
    }
}

/// Loads the movie corpus from a CSV file with a header row.
pub fn load_movies(path: impl AsRef<Path>) -> AppResult<Vec<MovieRecord>> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Loading movies");

    let file = std::fs::File::open(path)?;
    let movies = read_movies(file)?;

    tracing::info!(path = %path.display(), movies = movies.len(), "Movies loaded");
    Ok(movies)
}

/// Reads movie records from any CSV source, preserving row order.
pub fn read_movies<R: Read>(reader: R) -> AppResult<Vec<MovieRecord>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let mut movies = Vec::new();
    for record in reader.deserialize::<MovieRecord>() {
        movies.push(record?);
    }

    if movies.is_empty() {
        return Err(AppError::Dataset("movies file contains no rows".to_string()));
    }

    Ok(movies)
}
