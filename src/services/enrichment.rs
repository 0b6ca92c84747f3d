use std::sync::{Arc, LazyLock};

use regex::Regex;

use crate::{
    cache::{Cache, CacheKey},
    error::AppResult,
    models::{Enrichment, MovieDetails, UnavailableReason},
    services::providers::MetadataProvider,
};

static YEAR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d{4}\)$").expect("year suffix pattern is valid"));

/// Drops a trailing `(YYYY)` year so the title matches the catalog's naming.
///
/// `"Toy Story (1995)"` becomes `"Toy Story"`.
pub fn strip_year_suffix(title: &str) -> &str {
    let title = title.trim();
    match YEAR_SUFFIX.find(title) {
        Some(suffix) => &title[..suffix.start()],
        None => title,
    }
}

/// Best-effort metadata lookup, memoized per title for the process lifetime
///
/// Every failure mode of the provider collapses into
/// [`Enrichment::Unavailable`]; callers never see an error.
#[derive(Clone)]
pub struct Enricher {
    provider: Option<Arc<dyn MetadataProvider>>,
    cache: Cache,
}

impl Enricher {
    pub fn new(provider: Arc<dyn MetadataProvider>, cache: Cache) -> Self {
        Self {
            provider: Some(provider),
            cache,
        }
    }

    /// An enricher that reports every title as unavailable without any I/O
    pub fn disabled() -> Self {
        Self {
            provider: None,
            cache: Cache::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.provider.is_some()
    }

    pub async fn describe(&self, title: &str) -> Enrichment {
        let Some(provider) = &self.provider else {
            return Enrichment::unavailable(UnavailableReason::Disabled);
        };

        let key = CacheKey::Enrichment(title.to_string());
        match self.cache.get_from_cache::<Enrichment>(&key).await {
            Ok(Some(hit)) => {
                tracing::debug!(title = %title, "Enrichment cache hit");
                return hit;
            }
            Ok(None) => {}
            Err(e) => tracing::warn!(error = %e, title = %title, "Ignoring unreadable cache entry"),
        }

        let enrichment = match Self::lookup(provider.as_ref(), title).await {
            Ok(Some(details)) => Enrichment::Available(details),
            Ok(None) => {
                tracing::info!(title = %title, provider = provider.name(), "No catalog match");
                Enrichment::unavailable(UnavailableReason::NoMatch)
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    title = %title,
                    provider = provider.name(),
                    "Enrichment failed"
                );
                Enrichment::unavailable(UnavailableReason::Unreachable(e.to_string()))
            }
        };

        if let Err(e) = self.cache.store(&key, &enrichment).await {
            tracing::warn!(error = %e, title = %title, "Failed to memoize enrichment");
        }

        enrichment
    }

    async fn lookup(provider: &dyn MetadataProvider, title: &str) -> AppResult<Option<MovieDetails>> {
        let query = strip_year_suffix(title);
        if query.is_empty() {
            return Ok(None);
        }

        match provider.search_movie(query).await? {
            Some(movie_id) => Ok(Some(provider.fetch_details(movie_id).await?)),
            None => Ok(None),
        }
    }
}
