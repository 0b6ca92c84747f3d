/// A macro to simplify memoization through [`Cache`](crate::cache::Cache).
///
/// This macro checks if a value is present in the cache.
/// If found, it returns the cached value.
/// If not found, it executes the provided block to compute the value,
/// stores it in the cache, and then returns the computed value.
/// Errors from the block are returned as-is and never cached.
///
/// # Arguments
/// * `$cache`: The cache instance to use for retrieval and storage. The cache must have
///   `get_from_cache` and `store` methods.
/// * `$key`: The key to use for caching the value.
/// * `$block`: The future to await if the value is not found in cache.
///
/// # Example
/// ```rust,ignore
/// let movie_id = cached!(cache, CacheKey::CatalogSearch(query), async move {
///     search_catalog(query).await
/// });
/// ```
#[macro_export]
macro_rules! cached {
    ($cache:expr, $key:expr, $block:expr) => {{
        if let Some(cached) = $cache.get_from_cache(&$key).await? {
            Ok(cached)
        } else {
            let value = $block.await?;
            $cache.store(&$key, &value).await?;
            Ok(value)
        }
    }};
}
