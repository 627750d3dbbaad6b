use tokenview_store::{LedgerSnapshot, LedgerStore};
use tokenview_types::EventPosition;

use crate::error::QueryResult;

/// Owns one read snapshot for the duration of a multi-step query.
///
/// The snapshot is rolled back when the scope is closed or dropped, so
/// early returns, `?` propagation and cancelled futures all release it.
/// Every read made through the scope observes the same ledger version.
pub struct ReadScope {
    snapshot: Box<dyn LedgerSnapshot>,
}

impl ReadScope {
    pub async fn open(store: &dyn LedgerStore) -> QueryResult<Self> {
        let snapshot = store.begin_read().await?;
        tracing::debug!(position = %snapshot.position(), "read scope opened");
        Ok(Self { snapshot })
    }

    /// Watermark of the version every read in this scope observes.
    pub fn position(&self) -> EventPosition {
        self.snapshot.position()
    }

    pub(crate) fn snapshot(&self) -> &dyn LedgerSnapshot {
        self.snapshot.as_ref()
    }

    /// Release the snapshot now rather than at end of scope.
    pub fn close(self) {
        drop(self);
    }
}

impl Drop for ReadScope {
    fn drop(&mut self) {
        self.snapshot.release();
        tracing::debug!(position = %self.snapshot.position(), "read scope released");
    }
}
