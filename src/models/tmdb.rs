// ============================================================================
// TMDB API Types
// ============================================================================

use chrono::Utc;
use serde::Deserialize;

use super::{MovieDetails, DESCRIPTION_UNAVAILABLE};

/// Response of `/search/movie`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResponse {
    #[serde(default)]
    pub results: Vec<TmdbSearchResult>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbSearchResult {
    pub id: u64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// Response of `/movie/{id}` with `append_to_response=videos`
#[derive(Debug, Clone, Deserialize)]
pub struct TmdbMovieDetails {
    pub id: u64,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub genres: Vec<TmdbGenre>,
    #[serde(default)]
    pub videos: Option<TmdbVideos>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbGenre {
    pub id: u64,
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideos {
    #[serde(default)]
    pub results: Vec<TmdbVideo>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TmdbVideo {
    pub key: String,
    pub site: String,
    #[serde(rename = "type")]
    pub video_type: String,
}

impl TmdbVideos {
    /// First YouTube trailer, otherwise the first YouTube video of any kind.
    pub fn trailer_key(&self) -> Option<&str> {
        let youtube = || self.results.iter().filter(|v| v.site.eq_ignore_ascii_case("youtube"));
        youtube()
            .find(|v| v.video_type.eq_ignore_ascii_case("trailer"))
            .or_else(|| youtube().next())
            .map(|v| v.key.as_str())
    }
}

impl From<TmdbMovieDetails> for MovieDetails {
    fn from(details: TmdbMovieDetails) -> Self {
        let description = details
            .overview
            .map(|overview| overview.trim().to_string())
            .filter(|overview| !overview.is_empty())
            .unwrap_or_else(|| DESCRIPTION_UNAVAILABLE.to_string());

        let trailer_key = details
            .videos
            .as_ref()
            .and_then(TmdbVideos::trailer_key)
            .map(str::to_string);

        MovieDetails {
            description,
            poster_path: details.poster_path.filter(|path| !path.is_empty()),
            genre_names: details.genres.into_iter().map(|g| g.name).collect(),
            external_id: Some(details.id),
            trailer_key,
            fetched_at: Utc::now(),
        }
    }
}
