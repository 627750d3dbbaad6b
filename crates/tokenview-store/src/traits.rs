use async_trait::async_trait;
use tokenview_types::{
    Address, Amount, EventPosition, Holding, Page, PageWindow, Supply, Ticker, Token,
};

use crate::error::StoreResult;

/// The fixed dimension of a holdings query.
///
/// Holders of a ticker and balances of an address are the same relation
/// queried from opposite ends.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HoldingAxis {
    /// All positive holdings of one ticker, ranked by descending overall
    /// balance with address ascending as tie-breaker.
    Ticker(Ticker),
    /// All positive holdings of one address, ordered by ticker. An empty
    /// `tickers` list means every ticker.
    Address {
        address: Address,
        tickers: Vec<Ticker>,
    },
}

/// A consistent point-in-time view of the ledger.
///
/// Every read issued through the same snapshot observes the same ledger
/// version, regardless of concurrent ingestion.
#[async_trait]
pub trait LedgerSnapshot: Send + Sync {
    /// Watermark of the version this snapshot observes.
    fn position(&self) -> EventPosition;

    /// Deployed tokens in deploy order. An empty `tickers` slice means no
    /// filter; otherwise the result is the intersection with deployed tokens.
    async fn tokens(&self, tickers: &[Ticker], page: PageWindow) -> StoreResult<Page<Token>>;

    /// Supply record for a ticker, `None` if absent.
    async fn token_supply(&self, ticker: &Ticker) -> StoreResult<Option<Supply>>;

    /// Positive-balance holdings along one axis.
    async fn holdings(&self, axis: &HoldingAxis, page: PageWindow) -> StoreResult<Page<Holding>>;

    /// Release the snapshot (roll back the read transaction).
    ///
    /// Must be idempotent: scope guards call it on every exit path.
    fn release(&mut self);
}

/// Read boundary of the ledger store.
#[async_trait]
pub trait LedgerStore: Send + Sync {
    /// Open a read snapshot.
    async fn begin_read(&self) -> StoreResult<Box<dyn LedgerSnapshot>>;

    /// Current transfer-event watermark.
    async fn event_position(&self) -> StoreResult<EventPosition>;
}

/// Ingestion boundary. Each successful call applies one event and advances
/// the event position by one.
pub trait LedgerWriter: Send + Sync {
    fn deploy(&self, token: Token) -> StoreResult<EventPosition>;

    /// Mint to `address`. A mint that would exceed the remaining supply is
    /// truncated to it; returns the amount actually minted.
    fn mint(&self, ticker: &Ticker, address: &Address, amount: Amount) -> StoreResult<Amount>;

    /// Lock `amount` of available balance into a transfer inscription.
    fn inscribe_transfer(
        &self,
        ticker: &Ticker,
        address: &Address,
        amount: Amount,
    ) -> StoreResult<EventPosition>;

    /// Send a previously inscribed transfer from `from` to `to`.
    fn transfer(
        &self,
        ticker: &Ticker,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> StoreResult<EventPosition>;
}
