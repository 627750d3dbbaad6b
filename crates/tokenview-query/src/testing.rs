//! Store doubles and a seeded ledger shared by this crate's tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokenview_store::{
    HoldingAxis, InMemoryLedgerStore, LedgerSnapshot, LedgerStore, LedgerWriter, StoreError,
    StoreResult,
};
use tokenview_types::{
    Address, Amount, EventPosition, Holding, Page, PageWindow, Supply, Ticker, Token,
};

pub(crate) fn ticker(s: &str) -> Ticker {
    Ticker::parse(s).unwrap()
}

pub(crate) fn addr(n: usize) -> Address {
    let addresses = [
        "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq",
        "bc1p5d7rjq7g6rdk2yhzks9smlaqtedr4dekq08ge8ztwac72sfr9rusxg3297",
        "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2",
        "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy",
    ];
    Address::parse(addresses[n]).unwrap()
}

pub(crate) fn window(limit: i64, offset: i64) -> PageWindow {
    PageWindow::bounded(limit, offset, 60).unwrap()
}

pub(crate) fn token(name: &str, height: u64) -> Token {
    let ticker = ticker(name);
    Token {
        self_mint: ticker.is_self_mint(),
        ticker,
        inscription_id: format!("{}i0", "cd".repeat(32)),
        inscription_number: height as i64 * 10,
        block_height: height,
        tx_id: "cd".repeat(32),
        deployer: addr(0),
        deploy_timestamp: 1_677_000_000_000,
        decimals: 0,
        max_supply: Amount::new(10_000),
        mint_limit: Amount::new(1_000),
    }
}

/// `ordi` held by addr(0):500, addr(1):300, addr(2):200 (addr(3) minted and
/// sent everything away), `sats` deployed but never minted, and `pepe` held
/// only by addr(0).
pub(crate) fn seeded_store() -> InMemoryLedgerStore {
    let store = InMemoryLedgerStore::new();
    let ordi = ticker("ordi");
    store.deploy(token("ordi", 779_832)).unwrap();
    store.deploy(token("sats", 779_900)).unwrap();
    store.deploy(token("pepe", 780_001)).unwrap();

    store.mint(&ordi, &addr(0), Amount::new(400)).unwrap();
    store.mint(&ordi, &addr(1), Amount::new(300)).unwrap();
    store.mint(&ordi, &addr(2), Amount::new(200)).unwrap();
    store.mint(&ordi, &addr(3), Amount::new(100)).unwrap();
    store.inscribe_transfer(&ordi, &addr(3), Amount::new(100)).unwrap();
    store.transfer(&ordi, &addr(3), &addr(0), Amount::new(100)).unwrap();

    store.mint(&ticker("pepe"), &addr(0), Amount::new(50)).unwrap();
    store
}

/// How a [`ScriptedStore`] misbehaves.
#[derive(Clone, Copy, Debug)]
pub(crate) enum Script {
    /// `begin_read` fails.
    BeginFails,
    /// `ordi` is deployed but has no supply record.
    SupplyMissing,
    /// The supply read fails.
    SupplyFails,
    /// The supply read never completes.
    SupplyHangs,
}

/// A store holding only `ordi`, failing at a scripted point. Counts opened
/// and released snapshots.
pub(crate) struct ScriptedStore {
    script: Script,
    pub(crate) opened: Arc<AtomicUsize>,
    pub(crate) released: Arc<AtomicUsize>,
}

impl ScriptedStore {
    pub(crate) fn new(script: Script) -> Self {
        Self {
            script,
            opened: Arc::new(AtomicUsize::new(0)),
            released: Arc::new(AtomicUsize::new(0)),
        }
    }
}

#[async_trait]
impl LedgerStore for ScriptedStore {
    async fn begin_read(&self) -> StoreResult<Box<dyn LedgerSnapshot>> {
        self.opened.fetch_add(1, Ordering::SeqCst);
        if let Script::BeginFails = self.script {
            return Err(StoreError::TransactionAborted("could not serialize access".into()));
        }
        Ok(Box::new(ScriptedSnapshot {
            script: self.script,
            token: token("ordi", 779_832),
            released: Arc::clone(&self.released),
            done: false,
        }))
    }

    async fn event_position(&self) -> StoreResult<EventPosition> {
        Ok(EventPosition::new(7))
    }
}

struct ScriptedSnapshot {
    script: Script,
    token: Token,
    released: Arc<AtomicUsize>,
    done: bool,
}

#[async_trait]
impl LedgerSnapshot for ScriptedSnapshot {
    fn position(&self) -> EventPosition {
        EventPosition::new(7)
    }

    async fn tokens(&self, tickers: &[Ticker], page: PageWindow) -> StoreResult<Page<Token>> {
        let rows = if tickers.is_empty() || tickers.contains(&self.token.ticker) {
            vec![self.token.clone()]
        } else {
            Vec::new()
        };
        Ok(page.apply(rows))
    }

    async fn token_supply(&self, _ticker: &Ticker) -> StoreResult<Option<Supply>> {
        match self.script {
            Script::SupplyFails => Err(StoreError::Unavailable("connection reset".into())),
            Script::SupplyHangs => std::future::pending().await,
            Script::BeginFails | Script::SupplyMissing => Ok(None),
        }
    }

    async fn holdings(&self, _axis: &HoldingAxis, _page: PageWindow) -> StoreResult<Page<Holding>> {
        Ok(Page::empty())
    }

    fn release(&mut self) {
        if !self.done {
            self.done = true;
            self.released.fetch_add(1, Ordering::SeqCst);
        }
    }
}

type Mutation = dyn Fn(&InMemoryLedgerStore) -> StoreResult<()> + Send + Sync;

/// Wraps an in-memory store and applies a write to it every time a snapshot
/// lists tokens, i.e. between a token-details existence check and its
/// supply read.
pub(crate) struct MutatingStore {
    inner: Arc<InMemoryLedgerStore>,
    mutate: Arc<Mutation>,
}

impl MutatingStore {
    pub(crate) fn new(
        inner: Arc<InMemoryLedgerStore>,
        mutate: impl Fn(&InMemoryLedgerStore) -> StoreResult<()> + Send + Sync + 'static,
    ) -> Self {
        Self {
            inner,
            mutate: Arc::new(mutate),
        }
    }
}

#[async_trait]
impl LedgerStore for MutatingStore {
    async fn begin_read(&self) -> StoreResult<Box<dyn LedgerSnapshot>> {
        Ok(Box::new(MutatingSnapshot {
            inner: self.inner.begin_read().await?,
            store: Arc::clone(&self.inner),
            mutate: Arc::clone(&self.mutate),
        }))
    }

    async fn event_position(&self) -> StoreResult<EventPosition> {
        self.inner.event_position().await
    }
}

struct MutatingSnapshot {
    inner: Box<dyn LedgerSnapshot>,
    store: Arc<InMemoryLedgerStore>,
    mutate: Arc<Mutation>,
}

#[async_trait]
impl LedgerSnapshot for MutatingSnapshot {
    fn position(&self) -> EventPosition {
        self.inner.position()
    }

    async fn tokens(&self, tickers: &[Ticker], page: PageWindow) -> StoreResult<Page<Token>> {
        let rows = self.inner.tokens(tickers, page).await?;
        (self.mutate)(self.store.as_ref())?;
        Ok(rows)
    }

    async fn token_supply(&self, ticker: &Ticker) -> StoreResult<Option<Supply>> {
        self.inner.token_supply(ticker).await
    }

    async fn holdings(&self, axis: &HoldingAxis, page: PageWindow) -> StoreResult<Page<Holding>> {
        self.inner.holdings(axis, page).await
    }

    fn release(&mut self) {
        self.inner.release();
    }
}
