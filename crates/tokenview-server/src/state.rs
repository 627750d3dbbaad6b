use std::sync::Arc;

use tokenview_cache::{CacheGate, CacheStore, InMemoryCacheStore};
use tokenview_query::{PaginationConfig, TokenQueryService};
use tokenview_store::LedgerStore;

use crate::config::ServiceConfig;
use crate::error::{ServerError, ServerResult};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    pub queries: TokenQueryService,
    /// `None` when caching is disabled.
    pub gate: Option<CacheGate>,
}

impl AppState {
    pub fn new(store: Arc<dyn LedgerStore>, config: &ServiceConfig) -> ServerResult<Self> {
        if !config.cache.enabled {
            return Ok(Self {
                queries: TokenQueryService::new(store, config.pagination),
                gate: None,
            });
        }
        let cache = InMemoryCacheStore::new(config.cache.max_entries)
            .map_err(|e| ServerError::Config(e.to_string()))?;
        Ok(Self::with_cache(store, config.pagination, Arc::new(cache)))
    }

    /// State backed by an externally provided cache store.
    pub fn with_cache(
        store: Arc<dyn LedgerStore>,
        pagination: PaginationConfig,
        cache: Arc<dyn CacheStore>,
    ) -> Self {
        Self {
            gate: Some(CacheGate::new(cache, Arc::clone(&store))),
            queries: TokenQueryService::new(store, pagination),
        }
    }
}
