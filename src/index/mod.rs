//! In-memory movie index: corpus, TF-IDF rows and the similarity matrix,
//! built once at startup and read-only afterwards.

use std::path::Path;

use crate::error::{AppError, AppResult};

pub mod dataset;
pub mod similarity;
pub mod stopwords;
pub mod vectorizer;

pub use dataset::{load_movies, read_movies, MovieRecord};
pub use similarity::SimilarityMatrix;
pub use stopwords::StopWords;
pub use vectorizer::{SparseVector, TfidfVectorizer};

/// Row `i` of every structure belongs to `movies[i]`.
#[derive(Debug)]
pub struct MovieIndex {
    movies: Vec<MovieRecord>,
    vectors: Vec<SparseVector>,
    similarity: SimilarityMatrix,
    vocabulary_size: usize,
}

impl MovieIndex {
    pub fn build(movies: Vec<MovieRecord>) -> AppResult<Self> {
        if movies.is_empty() {
            return Err(AppError::Dataset(
                "cannot build an index over an empty corpus".to_string(),
            ));
        }

        let documents: Vec<String> = movies.iter().map(MovieRecord::document).collect();
        let mut vectorizer = TfidfVectorizer::default();
        let vectors = vectorizer.fit_transform(&documents);
        let similarity = SimilarityMatrix::compute(&vectors);

        tracing::info!(
            movies = movies.len(),
            vocabulary = vectorizer.vocabulary_size(),
            "Movie index built"
        );

        Ok(Self {
            movies,
            vectors,
            similarity,
            vocabulary_size: vectorizer.vocabulary_size(),
        })
    }

    pub fn from_path(path: impl AsRef<Path>) -> AppResult<Self> {
        Self::build(load_movies(path)?)
    }

    /// Row of `title`: an exact match first, otherwise the first
    /// case-insensitive match. With duplicate titles the earliest row wins.
    pub fn position(&self, title: &str) -> Option<usize> {
        let title = title.trim();
        self.movies
            .iter()
            .position(|movie| movie.title == title)
            .or_else(|| {
                let lowered = title.to_lowercase();
                self.movies
                    .iter()
                    .position(|movie| movie.title.to_lowercase() == lowered)
            })
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    pub fn movies(&self) -> &[MovieRecord] {
        &self.movies
    }

    pub fn get(&self, row: usize) -> Option<&MovieRecord> {
        self.movies.get(row)
    }

    pub fn vector(&self, row: usize) -> Option<&SparseVector> {
        self.vectors.get(row)
    }

    pub fn similarity(&self) -> &SimilarityMatrix {
        &self.similarity
    }

    pub fn vocabulary_size(&self) -> usize {
        self.vocabulary_size
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
