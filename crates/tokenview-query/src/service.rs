use std::sync::Arc;

use tokenview_store::LedgerStore;
use tokenview_types::{Balance, EventPosition, Holder, Token};

use crate::coordinator::{SnapshotCoordinator, TokenDetails};
use crate::error::QueryResult;
use crate::filter::{normalize_address, normalize_ticker, normalize_tickers};
use crate::pagination::{PageParams, Paginated, PaginationConfig};

/// The four token views.
///
/// Every operation validates its input first, then reads through a single
/// snapshot, then shapes the result. Nothing reaches the store until the
/// input has been normalized.
#[derive(Clone)]
pub struct TokenQueryService {
    coordinator: SnapshotCoordinator,
    pagination: PaginationConfig,
}

impl TokenQueryService {
    pub fn new(store: Arc<dyn LedgerStore>, pagination: PaginationConfig) -> Self {
        Self {
            coordinator: SnapshotCoordinator::new(store),
            pagination,
        }
    }

    pub fn pagination(&self) -> PaginationConfig {
        self.pagination
    }

    pub fn store(&self) -> &Arc<dyn LedgerStore> {
        self.coordinator.store()
    }

    /// Current transfer-event watermark.
    pub async fn event_position(&self) -> QueryResult<EventPosition> {
        Ok(self.coordinator.store().event_position().await?)
    }

    pub async fn tokens<S>(&self, tickers: &[S], page: PageParams) -> QueryResult<Paginated<Token>>
    where
        S: AsRef<str> + Sync,
    {
        let tickers = normalize_tickers(tickers)?;
        let window = self.pagination.window(page)?;

        let scope = self.coordinator.open().await?;
        let rows = scope.tokens(&tickers, window).await?;
        scope.close();
        Ok(Paginated::new(window, rows))
    }

    pub async fn token_details(&self, ticker: &str) -> QueryResult<TokenDetails> {
        let ticker = normalize_ticker(ticker)?;
        self.coordinator.token_details(&ticker).await
    }

    pub async fn holders(&self, ticker: &str, page: PageParams) -> QueryResult<Paginated<Holder>> {
        let ticker = normalize_ticker(ticker)?;
        let window = self.pagination.window(page)?;

        let scope = self.coordinator.open().await?;
        let rows = scope.token_holders(&ticker, window).await?;
        scope.close();
        Ok(Paginated::new(window, rows))
    }

    pub async fn balances<S>(
        &self,
        address: &str,
        tickers: &[S],
        page: PageParams,
    ) -> QueryResult<Paginated<Balance>>
    where
        S: AsRef<str> + Sync,
    {
        let address = normalize_address(address)?;
        let tickers = normalize_tickers(tickers)?;
        let window = self.pagination.window(page)?;

        let scope = self.coordinator.open().await?;
        let rows = scope.balances(&address, &tickers, window).await?;
        scope.close();
        Ok(Paginated::new(window, rows))
    }
}
