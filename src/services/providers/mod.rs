//! Movie metadata provider abstraction
//!
//! Enrichment talks to the catalog only through this trait, so the HTTP client
//! can be swapped for a fake in tests or replaced by another catalog.

use crate::{error::AppResult, models::MovieDetails};

pub mod tmdb;

pub use tmdb::TmdbProvider;

/// Trait for movie metadata providers
///
/// Lookups happen in two steps: a title search that yields the catalog id,
/// then a detail fetch by that id.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Search the catalog by bare title (no year suffix)
    ///
    /// Returns the id of the best match, or `None` when nothing matched.
    async fn search_movie(&self, query: &str) -> AppResult<Option<u64>>;

    /// Fetch description, poster, genres and trailer for a catalog id
    async fn fetch_details(&self, movie_id: u64) -> AppResult<MovieDetails>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
