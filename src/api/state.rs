use std::sync::Arc;

use crate::{index::MovieIndex, services::Enricher};

/// Shared application state
///
/// The index is built once before the server starts and never mutated, so it
/// is shared without a lock. The enricher carries its own memo.
#[derive(Clone)]
pub struct AppState {
    pub index: Arc<MovieIndex>,
    pub enricher: Arc<Enricher>,
    pub default_count: usize,
    pub max_count: usize,
}

impl AppState {
    pub fn new(index: MovieIndex, enricher: Enricher, default_count: usize, max_count: usize) -> Self {
        let max_count = max_count.max(1);
        Self {
            index: Arc::new(index),
            enricher: Arc::new(enricher),
            default_count: default_count.clamp(1, max_count),
            max_count,
        }
    }
}
