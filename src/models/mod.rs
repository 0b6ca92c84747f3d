use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod tmdb;

pub use crate::index::MovieRecord;

/// Placeholder shown when a catalog entry has no usable description
pub const DESCRIPTION_UNAVAILABLE: &str = "Description not available.";

/// Placeholder shown when the catalog could not be reached at all
pub const DESCRIPTION_UNREACHABLE: &str =
    "Description not available (API limit reached). Try later.";

const POSTER_BASE_URL: &str = "https://image.tmdb.org/t/p/w500";
const MOVIE_PAGE_BASE_URL: &str = "https://www.themoviedb.org/movie";
const TRAILER_BASE_URL: &str = "https://www.youtube.com/watch?v=";

/// A single ranked recommendation
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    /// 1-based position in the result list
    pub rank: usize,
    pub title: String,
    pub genres: String,
    pub score: f32,
}

/// A recommendation paired with whatever the catalog could tell us about it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EnrichedRecommendation {
    #[serde(flatten)]
    pub recommendation: Recommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enrichment: Option<Enrichment>,
}

/// Metadata fetched from the movie catalog
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieDetails {
    pub description: String,
    pub poster_path: Option<String>,
    pub genre_names: Vec<String>,
    pub external_id: Option<u64>,
    /// YouTube video key of the trailer
    pub trailer_key: Option<String>,
    pub fetched_at: DateTime<Utc>,
}

impl MovieDetails {
    pub fn poster_url(&self) -> Option<String> {
        self.poster_path
            .as_ref()
            .map(|path| format!("{}{}", POSTER_BASE_URL, path))
    }

    pub fn trailer_url(&self) -> Option<String> {
        self.trailer_key
            .as_ref()
            .map(|key| format!("{}{}", TRAILER_BASE_URL, key))
    }

    pub fn page_url(&self) -> Option<String> {
        self.external_id
            .map(|id| format!("{}/{}", MOVIE_PAGE_BASE_URL, id))
    }
}

/// Why enrichment produced no data
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum UnavailableReason {
    /// No API key configured
    Disabled,
    /// The catalog has no entry for the title
    NoMatch,
    /// Transport, status or decoding failure
    Unreachable(String),
}

/// Outcome of a metadata lookup. Lookups never fail outright; the caller
/// decides how to present the unavailable case.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Enrichment {
    Available(MovieDetails),
    Unavailable { reason: UnavailableReason },
}

impl Enrichment {
    pub fn unavailable(reason: UnavailableReason) -> Self {
        Enrichment::Unavailable { reason }
    }

    pub fn details(&self) -> Option<&MovieDetails> {
        match self {
            Enrichment::Available(details) => Some(details),
            Enrichment::Unavailable { .. } => None,
        }
    }

    /// Text to display for this lookup, falling back to a placeholder.
    pub fn description(&self) -> &str {
        match self {
            Enrichment::Available(details) => &details.description,
            Enrichment::Unavailable {
                reason: UnavailableReason::Unreachable(_),
            } => DESCRIPTION_UNREACHABLE,
            Enrichment::Unavailable { .. } => DESCRIPTION_UNAVAILABLE,
        }
    }
}
