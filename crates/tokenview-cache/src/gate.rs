use std::sync::Arc;

use tokenview_store::LedgerStore;
use tokenview_types::EventPosition;

use crate::signature::RouteSignature;
use crate::store::{CacheStore, CachedEntry};

/// Result of checking a request against the cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GateOutcome {
    /// A cached entry at least as fresh as the watermark.
    Hit {
        entry: CachedEntry,
        watermark: EventPosition,
    },
    /// Nothing usable is cached. `watermark` is `None` when it could not be
    /// read, in which case the response must not be cached.
    Miss { watermark: Option<EventPosition> },
}

impl GateOutcome {
    pub fn watermark(&self) -> Option<EventPosition> {
        match self {
            Self::Hit { watermark, .. } => Some(*watermark),
            Self::Miss { watermark } => *watermark,
        }
    }
}

/// Watermark-based freshness check in front of the query path.
///
/// An entry is served only if it was recorded at or after the current
/// event position. Failures on either side degrade to a miss; the gate never
/// fails a request.
#[derive(Clone)]
pub struct CacheGate {
    cache: Arc<dyn CacheStore>,
    ledger: Arc<dyn LedgerStore>,
}

impl CacheGate {
    pub fn new(cache: Arc<dyn CacheStore>, ledger: Arc<dyn LedgerStore>) -> Self {
        Self { cache, ledger }
    }

    /// Current event position, or `None` if the store cannot report it.
    pub async fn watermark(&self) -> Option<EventPosition> {
        match self.ledger.event_position().await {
            Ok(position) => Some(position),
            Err(e) => {
                tracing::warn!(error = %e, "watermark unavailable, bypassing cache");
                None
            }
        }
    }

    pub async fn check(&self, signature: &RouteSignature) -> GateOutcome {
        let Some(watermark) = self.watermark().await else {
            return GateOutcome::Miss { watermark: None };
        };

        let cached = match self.cache.get(signature).await {
            Ok(cached) => cached,
            Err(e) => {
                tracing::warn!(%signature, error = %e, "cache lookup failed, treating as miss");
                None
            }
        };

        match cached {
            Some(entry) if entry.position.covers(&watermark) => {
                tracing::debug!(%signature, %watermark, "cache hit");
                GateOutcome::Hit { entry, watermark }
            }
            Some(entry) => {
                tracing::debug!(%signature, %watermark, recorded = %entry.position, "cache entry stale");
                GateOutcome::Miss {
                    watermark: Some(watermark),
                }
            }
            None => {
                tracing::debug!(%signature, %watermark, "cache miss");
                GateOutcome::Miss {
                    watermark: Some(watermark),
                }
            }
        }
    }

    /// Store a freshly computed response. `entry.position` must be the
    /// watermark observed before the read began.
    pub async fn record(&self, signature: RouteSignature, entry: CachedEntry) {
        let position = entry.position;
        if let Err(e) = self.cache.set(signature.clone(), entry).await {
            tracing::warn!(%signature, error = %e, "cache write failed");
        } else {
            tracing::debug!(%signature, %position, "response cached");
        }
    }
}
