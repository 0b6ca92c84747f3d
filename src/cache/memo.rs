use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::error::AppError;
use crate::error::AppResult;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Catalog id lookup for a bare (year-stripped) title
    CatalogSearch(String),
    /// Full enrichment outcome for a dataset title
    Enrichment(String),
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::CatalogSearch(query) => write!(f, "search:{}", query.to_lowercase()),
            CacheKey::Enrichment(title) => write!(f, "enrich:{}", title),
        }
    }
}

/// Process-lifetime memo of serialized values
///
/// Entries never expire; the map only grows with distinct keys, which is
/// bounded by the size of the corpus.
#[derive(Clone, Default)]
pub struct Cache {
    entries: Arc<RwLock<HashMap<String, String>>>,
}

impl Cache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Retrieves a value from the cache by key
    ///
    /// If the key exists in the cache, the value is deserialized and returned.
    /// If the key does not exist, `None` is returned.
    pub async fn get_from_cache<T: serde::de::DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let entries = self.entries.read().await;

        match entries.get(&key.to_string()) {
            Some(json) => {
                let data = serde_json::from_str(json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(data))
            }
            None => Ok(None),
        }
    }

    /// Stores a value, replacing any previous entry for the key
    pub async fn store<T: serde::Serialize>(&self, key: &CacheKey, value: &T) -> AppResult<()> {
        let json = serde_json::to_string(value)
            .map_err(|e| AppError::Internal(format!("Cache serialization error: {}", e)))?;

        self.entries.write().await.insert(key.to_string(), json);
        tracing::debug!(key = %key, "Cached value");

        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}
