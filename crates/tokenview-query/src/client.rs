//! The four ledger reads, issued through a [`ReadScope`].
//!
//! These are thin over the snapshot: they add existence checks, holder
//! ranks and error conversion, nothing else. Ordering and zero-balance
//! exclusion are the store's job.

use tokenview_store::HoldingAxis;
use tokenview_types::{Address, Balance, Holder, Page, PageWindow, Supply, Ticker, Token};

use crate::error::{NotFoundKind, QueryError, QueryResult};
use crate::scope::ReadScope;

impl ReadScope {
    /// Deployed tokens in deploy order, intersected with `tickers` unless it
    /// is empty.
    pub async fn tokens(&self, tickers: &[Ticker], window: PageWindow) -> QueryResult<Page<Token>> {
        Ok(self.snapshot().tokens(tickers, window).await?)
    }

    /// Single-token existence check (page size 1).
    pub async fn token(&self, ticker: &Ticker) -> QueryResult<Option<Token>> {
        let page = self
            .snapshot()
            .tokens(std::slice::from_ref(ticker), PageWindow::single())
            .await?;
        Ok(page.rows.into_iter().next())
    }

    pub async fn token_supply(&self, ticker: &Ticker) -> QueryResult<Option<Supply>> {
        Ok(self.snapshot().token_supply(ticker).await?)
    }

    /// Ranked holders of `ticker`. An undeployed ticker is `NotFound`,
    /// distinct from a deployed ticker with no holders.
    pub async fn token_holders(
        &self,
        ticker: &Ticker,
        window: PageWindow,
    ) -> QueryResult<Page<Holder>> {
        if self.token(ticker).await?.is_none() {
            return Err(QueryError::NotFound(NotFoundKind::Token(ticker.clone())));
        }

        let page = self
            .snapshot()
            .holdings(&HoldingAxis::Ticker(ticker.clone()), window)
            .await?;
        let first_rank = window.offset() + 1;
        Ok(Page {
            total: page.total,
            rows: page
                .rows
                .into_iter()
                .zip(first_rank..)
                .map(|(holding, rank)| Holder::from_holding(holding, rank))
                .collect(),
        })
    }

    /// Positive balances of `address`, ordered by ticker.
    pub async fn balances(
        &self,
        address: &Address,
        tickers: &[Ticker],
        window: PageWindow,
    ) -> QueryResult<Page<Balance>> {
        let axis = HoldingAxis::Address {
            address: address.clone(),
            tickers: tickers.to_vec(),
        };
        let page = self.snapshot().holdings(&axis, window).await?;
        Ok(page.map(Balance::from))
    }
}
