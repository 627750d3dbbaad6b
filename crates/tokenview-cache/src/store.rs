use std::collections::HashMap;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::sync::RwLock;
use tokenview_types::EventPosition;

use crate::error::{CacheError, CacheResult};
use crate::signature::RouteSignature;

/// A cached response body tagged with the watermark it was computed at.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedEntry {
    pub position: EventPosition,
    pub payload: Bytes,
    pub content_type: String,
}

impl CachedEntry {
    pub fn json(position: EventPosition, payload: impl Into<Bytes>) -> Self {
        Self {
            position,
            payload: payload.into(),
            content_type: "application/json".to_string(),
        }
    }
}

/// Get/set storage for cached responses, keyed by route signature.
#[async_trait]
pub trait CacheStore: Send + Sync {
    async fn get(&self, signature: &RouteSignature) -> CacheResult<Option<CachedEntry>>;

    async fn set(&self, signature: RouteSignature, entry: CachedEntry) -> CacheResult<()>;
}

/// Bounded in-process cache store.
///
/// When full, the entry recorded at the lowest position is evicted first:
/// it is the first to go stale. An entry never replaces one recorded at a
/// later position.
pub struct InMemoryCacheStore {
    entries: RwLock<HashMap<RouteSignature, CachedEntry>>,
    max_entries: usize,
}

impl InMemoryCacheStore {
    pub fn new(max_entries: usize) -> CacheResult<Self> {
        if max_entries == 0 {
            return Err(CacheError::Config("max_entries must be at least 1".into()));
        }
        Ok(Self {
            entries: RwLock::new(HashMap::new()),
            max_entries,
        })
    }

    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl CacheStore for InMemoryCacheStore {
    async fn get(&self, signature: &RouteSignature) -> CacheResult<Option<CachedEntry>> {
        Ok(self.entries.read().await.get(signature).cloned())
    }

    async fn set(&self, signature: RouteSignature, entry: CachedEntry) -> CacheResult<()> {
        let mut entries = self.entries.write().await;

        if let Some(existing) = entries.get(&signature) {
            if existing.position > entry.position {
                return Ok(());
            }
        } else if entries.len() >= self.max_entries {
            let oldest = entries
                .iter()
                .min_by_key(|(_, cached)| cached.position)
                .map(|(key, _)| key.clone());
            if let Some(key) = oldest {
                entries.remove(&key);
                tracing::debug!(evicted = %key, "cache full, evicted oldest entry");
            }
        }

        entries.insert(signature, entry);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sig(path: &str) -> RouteSignature {
        RouteSignature::new("GET", path, None)
    }

    #[test]
    fn zero_capacity_rejected() {
        assert!(matches!(InMemoryCacheStore::new(0), Err(CacheError::Config(_))));
    }

    #[tokio::test]
    async fn evicts_lowest_position_when_full() {
        let store = InMemoryCacheStore::new(2).unwrap();
        assert!(store.is_empty().await);
        store.set(sig("/a"), CachedEntry::json(EventPosition::new(5), "a")).await.unwrap();
        store.set(sig("/b"), CachedEntry::json(EventPosition::new(3), "b")).await.unwrap();
        store.set(sig("/c"), CachedEntry::json(EventPosition::new(6), "c")).await.unwrap();

        assert_eq!(store.len().await, 2);
        assert!(store.get(&sig("/b")).await.unwrap().is_none());
        assert!(store.get(&sig("/a")).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn older_entry_never_replaces_newer() {
        let store = InMemoryCacheStore::new(4).unwrap();
        store.set(sig("/a"), CachedEntry::json(EventPosition::new(9), "new")).await.unwrap();
        store.set(sig("/a"), CachedEntry::json(EventPosition::new(8), "old")).await.unwrap();

        let entry = store.get(&sig("/a")).await.unwrap().unwrap();
        assert_eq!(entry.payload, Bytes::from_static(b"new"));
    }
}
