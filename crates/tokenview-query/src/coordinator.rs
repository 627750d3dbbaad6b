use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tokenview_store::LedgerStore;
use tokenview_types::{Supply, Ticker, Token};

use crate::error::{NotFoundKind, QueryError, QueryResult};
use crate::scope::ReadScope;

/// A token together with its supply, read from one snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenDetails {
    pub token: Token,
    pub supply: Supply,
}

/// Runs multi-step reads as one atomic read against the ledger store.
#[derive(Clone)]
pub struct SnapshotCoordinator {
    store: Arc<dyn LedgerStore>,
}

impl SnapshotCoordinator {
    pub fn new(store: Arc<dyn LedgerStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        &self.store
    }

    /// Open a scope for a caller-driven sequence of reads.
    pub async fn open(&self) -> QueryResult<ReadScope> {
        ReadScope::open(self.store.as_ref()).await
    }

    /// Token existence then supply, both inside one snapshot.
    ///
    /// A deployed token without a supply record is reported as
    /// `NotFound(Supply)`; callers see a plain not-found, logs see the
    /// inconsistency.
    pub async fn token_details(&self, ticker: &Ticker) -> QueryResult<TokenDetails> {
        let scope = self.open().await?;

        let Some(token) = scope.token(ticker).await? else {
            return Err(QueryError::NotFound(NotFoundKind::Token(ticker.clone())));
        };

        let Some(supply) = scope.token_supply(ticker).await? else {
            let kind = NotFoundKind::Supply(ticker.clone());
            tracing::warn!(
                ticker = %ticker,
                position = %scope.position(),
                code = kind.diagnostic_code(),
                "deployed token has no supply record"
            );
            return Err(QueryError::NotFound(kind));
        };

        scope.close();
        Ok(TokenDetails { token, supply })
    }
}
