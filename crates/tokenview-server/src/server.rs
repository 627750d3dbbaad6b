use std::sync::Arc;

use tokenview_store::{InMemoryLedgerStore, LedgerFixture, LedgerStore};
use tokio::net::TcpListener;

use crate::config::{ServiceConfig, StoreConfig};
use crate::error::{ServerError, ServerResult};
use crate::router::build_router;
use crate::state::AppState;

/// tokenview HTTP server.
pub struct TokenviewServer {
    config: ServiceConfig,
    store: Arc<dyn LedgerStore>,
}

impl TokenviewServer {
    pub fn new(config: ServiceConfig, store: Arc<dyn LedgerStore>) -> Self {
        Self { config, store }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Build the router (useful for testing).
    pub fn router(&self) -> ServerResult<axum::Router> {
        let state = AppState::new(Arc::clone(&self.store), &self.config)?;
        Ok(build_router(state, &self.config.server))
    }

    /// Serve until interrupted.
    pub async fn serve(self) -> ServerResult<()> {
        let app = self.router()?;
        let addr = self.config.server.bind_addr;
        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            prefix = %self.config.server.route_prefix,
            cache = self.config.cache.enabled,
            "tokenview listening on {}",
            addr
        );
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        tracing::info!("tokenview shut down");
        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "cannot listen for shutdown signal");
        std::future::pending::<()>().await;
    }
}

/// Open the in-memory ledger store, replaying the seed fixture if one is
/// configured.
pub fn open_store(config: &StoreConfig) -> ServerResult<Arc<InMemoryLedgerStore>> {
    let store = InMemoryLedgerStore::new();
    if let Some(path) = &config.seed_path {
        let fixture = LedgerFixture::load(path)?;
        fixture.apply(&store)?;
        tracing::info!(path = %path.display(), position = %store.position()?, "ledger store seeded");
    }
    Ok(Arc::new(store))
}
