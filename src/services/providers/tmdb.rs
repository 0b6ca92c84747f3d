/// TMDB (The Movie Database) API provider
///
/// API Flow:
/// 1. Title Search: /search/movie?query=... → first result's TMDB id
/// 2. Details: /movie/{id}?append_to_response=videos → overview, poster, genres, trailer
///
/// Search results are memoized per query; details are memoized one level up
/// by the enrichment service.
use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    cache::{Cache, CacheKey},
    cached,
    error::{AppError, AppResult},
    models::{
        tmdb::{TmdbMovieDetails, TmdbSearchResponse},
        MovieDetails,
    },
    services::providers::MetadataProvider,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
    cache: Cache,
}

impl TmdbProvider {
    /// Creates a provider whose requests all share `timeout`
    pub fn new(cache: Cache, api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
            cache,
        })
    }

    fn search_url(&self) -> String {
        format!("{}/search/movie", self.api_url)
    }

    fn details_url(&self, movie_id: u64) -> String {
        format!("{}/movie/{}", self.api_url, movie_id)
    }

    /// Issues a GET and decodes the JSON body, turning non-success statuses
    /// into `ExternalApi` errors
    ///
    /// The API key travels in the query string, so transport errors are
    /// stripped of their URL before they leave this function.
    async fn get_json<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> AppResult<T> {
        let response = self
            .http_client
            .get(url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(redact)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB API returned status {}: {}",
                status, body
            )));
        }

        let text = response.text().await.map_err(redact)?;
        serde_json::from_str(&text).map_err(|e| {
            tracing::debug!(error = %e, response = %text, "Failed to deserialize TMDB response");
            AppError::ExternalApi(format!("Failed to parse TMDB response: {}", e))
        })
    }
}

fn redact(error: reqwest::Error) -> AppError {
    AppError::HttpClient(error.without_url())
}

#[async_trait::async_trait]
impl MetadataProvider for TmdbProvider {
    async fn search_movie(&self, query: &str) -> AppResult<Option<u64>> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        cached!(
            self.cache,
            CacheKey::CatalogSearch(query.to_string()),
            async move {
                let response: TmdbSearchResponse = self
                    .get_json(&self.search_url(), &[("query", query)])
                    .await?;

                let movie_id = response.results.first().map(|result| result.id);

                tracing::info!(
                    query = %query,
                    results = response.results.len(),
                    movie_id = ?movie_id,
                    provider = "tmdb",
                    "Title search completed"
                );

                Ok::<_, AppError>(movie_id)
            }
        )
    }

    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieDetails> {
        let details: TmdbMovieDetails = self
            .get_json(
                &self.details_url(movie_id),
                &[("language", "en-US"), ("append_to_response", "videos")],
            )
            .await?;

        let details = MovieDetails::from(details);

        tracing::info!(
            movie_id,
            genres = details.genre_names.len(),
            has_poster = details.poster_path.is_some(),
            has_trailer = details.trailer_key.is_some(),
            provider = "tmdb",
            "Details fetched"
        );

        Ok(details)
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
