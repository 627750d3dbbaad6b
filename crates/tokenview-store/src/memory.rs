use std::collections::{BTreeMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use tokenview_types::amount::MAX_DECIMALS;
use tokenview_types::{
    Address, Amount, EventPosition, Holding, Page, PageWindow, Supply, Ticker, Token,
};

use crate::error::{StoreError, StoreResult};
use crate::traits::{HoldingAxis, LedgerSnapshot, LedgerStore, LedgerWriter};

/// In-memory ledger store for tests, local demos, and embedding.
///
/// Multi-version: every write publishes a fresh immutable [`LedgerState`]
/// behind an `Arc`, and a snapshot pins the version that was current when
/// it was opened. Readers never block writers and never observe a
/// half-applied event.
pub struct InMemoryLedgerStore {
    current: RwLock<Arc<LedgerState>>,
    open_reads: Arc<AtomicUsize>,
}

#[derive(Clone, Default)]
struct LedgerState {
    position: EventPosition,
    tokens: BTreeMap<Ticker, Token>,
    supplies: BTreeMap<Ticker, Supply>,
    holdings: BTreeMap<Ticker, BTreeMap<Address, Holding>>,
}

impl InMemoryLedgerStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(Arc::new(LedgerState::default())),
            open_reads: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Number of snapshots currently open against this store.
    pub fn open_read_count(&self) -> usize {
        self.open_reads.load(Ordering::SeqCst)
    }

    /// Current watermark, without going through the async boundary.
    pub fn position(&self) -> StoreResult<EventPosition> {
        Ok(self.load()?.position)
    }

    fn load(&self) -> StoreResult<Arc<LedgerState>> {
        let guard = self.current.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(Arc::clone(&guard))
    }

    /// Apply one event to a private copy of the current version and publish
    /// it. A failed event leaves the published version untouched.
    fn apply<T>(
        &self,
        event: impl FnOnce(&mut LedgerState) -> StoreResult<T>,
    ) -> StoreResult<(T, EventPosition)> {
        let mut guard = self.current.write().map_err(|_| StoreError::LockPoisoned)?;
        let mut next = LedgerState::clone(&guard);
        let output = event(&mut next)?;
        next.position = next.position.next();
        let position = next.position;
        *guard = Arc::new(next);
        Ok((output, position))
    }
}

impl Default for InMemoryLedgerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl LedgerState {
    fn token(&self, ticker: &Ticker) -> StoreResult<&Token> {
        self.tokens
            .get(ticker)
            .ok_or_else(|| StoreError::UnknownTicker(ticker.clone()))
    }

    fn select_tokens(&self, tickers: &[Ticker]) -> Vec<Token> {
        let wanted: HashSet<&Ticker> = tickers.iter().collect();
        let mut rows: Vec<Token> = self
            .tokens
            .values()
            .filter(|token| wanted.is_empty() || wanted.contains(&token.ticker))
            .cloned()
            .collect();
        rows.sort_by_key(Token::deploy_order);
        rows
    }

    /// The only place holdings are read; zero rows never leave this function.
    fn select_holdings(&self, axis: &HoldingAxis) -> Vec<Holding> {
        let candidates: Vec<&Holding> = match axis {
            HoldingAxis::Ticker(ticker) => self
                .holdings
                .get(ticker)
                .into_iter()
                .flat_map(BTreeMap::values)
                .collect(),
            HoldingAxis::Address { address, tickers } => {
                let wanted: HashSet<&Ticker> = tickers.iter().collect();
                self.holdings
                    .iter()
                    .filter(|(ticker, _)| wanted.is_empty() || wanted.contains(ticker))
                    .filter_map(|(_, by_address)| by_address.get(address))
                    .collect()
            }
        };

        let mut rows: Vec<Holding> = candidates
            .into_iter()
            .filter(|holding| holding.is_positive())
            .cloned()
            .collect();

        if let HoldingAxis::Ticker(_) = axis {
            rows.sort_by(|a, b| {
                b.overall()
                    .cmp(&a.overall())
                    .then_with(|| a.address.cmp(&b.address))
            });
        }
        rows
    }

    /// Run `change` against the (ticker, address) holding, keeping the
    /// supply's holder count and the zero-row deletion rule in step.
    fn adjust_holding(
        &mut self,
        ticker: &Ticker,
        address: &Address,
        change: impl FnOnce(&mut Holding) -> StoreResult<()>,
    ) -> StoreResult<()> {
        let decimals = self.token(ticker)?.decimals;
        let by_address = self.holdings.entry(ticker.clone()).or_default();
        let holding = by_address.entry(address.clone()).or_insert_with(|| Holding {
            ticker: ticker.clone(),
            address: address.clone(),
            decimals,
            available: Amount::ZERO,
            transferrable: Amount::ZERO,
        });

        let was_positive = holding.is_positive();
        change(holding)?;
        let is_positive = holding.is_positive();
        if !is_positive {
            by_address.remove(address);
        }

        let supply = self
            .supplies
            .get_mut(ticker)
            .ok_or_else(|| StoreError::Corrupt(format!("no supply record for {ticker}")))?;
        match (was_positive, is_positive) {
            (false, true) => supply.holders += 1,
            (true, false) => supply.holders = supply.holders.saturating_sub(1),
            _ => {}
        }
        Ok(())
    }

    fn deploy(&mut self, token: Token) -> StoreResult<()> {
        let ticker = token.ticker.clone();
        if self.tokens.contains_key(&ticker) {
            return Err(StoreError::DuplicateTicker(ticker));
        }

        let invalid = |reason: &str| StoreError::InvalidDeploy {
            ticker: ticker.clone(),
            reason: reason.to_string(),
        };
        if token.decimals > MAX_DECIMALS {
            return Err(invalid("decimals exceed 18"));
        }
        if token.max_supply.is_zero() {
            return Err(invalid("max supply must be positive"));
        }
        if token.mint_limit.is_zero() || token.mint_limit > token.max_supply {
            return Err(invalid("mint limit must be in (0, max supply]"));
        }
        if token.self_mint != ticker.is_self_mint() {
            return Err(invalid("self-mint flag must match ticker length"));
        }

        self.supplies.insert(
            ticker.clone(),
            Supply {
                ticker: ticker.clone(),
                decimals: token.decimals,
                max_supply: token.max_supply,
                minted_supply: Amount::ZERO,
                holders: 0,
            },
        );
        self.tokens.insert(ticker, token);
        Ok(())
    }

    fn mint(&mut self, ticker: &Ticker, address: &Address, amount: Amount) -> StoreResult<Amount> {
        if amount.is_zero() {
            return Err(StoreError::ZeroAmount);
        }
        let limit = self.token(ticker)?.mint_limit;
        if amount > limit {
            return Err(StoreError::MintLimitExceeded {
                ticker: ticker.clone(),
                amount,
                limit,
            });
        }

        let supply = self
            .supplies
            .get(ticker)
            .ok_or_else(|| StoreError::Corrupt(format!("no supply record for {ticker}")))?;
        let remaining = supply.max_supply.saturating_sub(supply.minted_supply);
        if remaining.is_zero() {
            return Err(StoreError::SupplyExhausted(ticker.clone()));
        }
        let minted = amount.min(remaining);

        self.adjust_holding(ticker, address, |holding| {
            holding.available = holding
                .available
                .checked_add(minted)
                .ok_or_else(|| StoreError::Corrupt("balance overflow".into()))?;
            Ok(())
        })?;

        if let Some(supply) = self.supplies.get_mut(ticker) {
            supply.minted_supply = supply
                .minted_supply
                .checked_add(minted)
                .ok_or_else(|| StoreError::Corrupt("minted supply overflow".into()))?;
        }
        Ok(minted)
    }

    fn inscribe_transfer(
        &mut self,
        ticker: &Ticker,
        address: &Address,
        amount: Amount,
    ) -> StoreResult<()> {
        if amount.is_zero() {
            return Err(StoreError::ZeroAmount);
        }
        self.adjust_holding(ticker, address, |holding| {
            holding.available = holding.available.checked_sub(amount).ok_or_else(|| {
                StoreError::InsufficientBalance {
                    ticker: ticker.clone(),
                    kind: "available",
                    needed: amount,
                    available: holding.available,
                }
            })?;
            holding.transferrable = holding
                .transferrable
                .checked_add(amount)
                .ok_or_else(|| StoreError::Corrupt("balance overflow".into()))?;
            Ok(())
        })
    }

    fn transfer(
        &mut self,
        ticker: &Ticker,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> StoreResult<()> {
        if amount.is_zero() {
            return Err(StoreError::ZeroAmount);
        }
        self.adjust_holding(ticker, from, |holding| {
            holding.transferrable = holding.transferrable.checked_sub(amount).ok_or_else(|| {
                StoreError::InsufficientBalance {
                    ticker: ticker.clone(),
                    kind: "transferrable",
                    needed: amount,
                    available: holding.transferrable,
                }
            })?;
            Ok(())
        })?;
        self.adjust_holding(ticker, to, |holding| {
            holding.available = holding
                .available
                .checked_add(amount)
                .ok_or_else(|| StoreError::Corrupt("balance overflow".into()))?;
            Ok(())
        })
    }
}

impl LedgerWriter for InMemoryLedgerStore {
    fn deploy(&self, token: Token) -> StoreResult<EventPosition> {
        let ticker = token.ticker.clone();
        let ((), position) = self.apply(|state| state.deploy(token))?;
        tracing::debug!(%ticker, %position, "token deployed");
        Ok(position)
    }

    fn mint(&self, ticker: &Ticker, address: &Address, amount: Amount) -> StoreResult<Amount> {
        let (minted, position) = self.apply(|state| state.mint(ticker, address, amount))?;
        tracing::debug!(%ticker, %address, %minted, %position, "mint applied");
        Ok(minted)
    }

    fn inscribe_transfer(
        &self,
        ticker: &Ticker,
        address: &Address,
        amount: Amount,
    ) -> StoreResult<EventPosition> {
        let ((), position) =
            self.apply(|state| state.inscribe_transfer(ticker, address, amount))?;
        Ok(position)
    }

    fn transfer(
        &self,
        ticker: &Ticker,
        from: &Address,
        to: &Address,
        amount: Amount,
    ) -> StoreResult<EventPosition> {
        let ((), position) = self.apply(|state| state.transfer(ticker, from, to, amount))?;
        tracing::debug!(%ticker, %from, %to, %amount, %position, "transfer applied");
        Ok(position)
    }
}

/// Decrements the open-read counter when dropped.
struct ReadLease(Arc<AtomicUsize>);

impl ReadLease {
    fn acquire(counter: &Arc<AtomicUsize>) -> Self {
        counter.fetch_add(1, Ordering::SeqCst);
        Self(Arc::clone(counter))
    }
}

impl Drop for ReadLease {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

struct MemorySnapshot {
    state: Arc<LedgerState>,
    lease: Option<ReadLease>,
}

#[async_trait]
impl LedgerSnapshot for MemorySnapshot {
    fn position(&self) -> EventPosition {
        self.state.position
    }

    async fn tokens(&self, tickers: &[Ticker], page: PageWindow) -> StoreResult<Page<Token>> {
        Ok(page.apply(self.state.select_tokens(tickers)))
    }

    async fn token_supply(&self, ticker: &Ticker) -> StoreResult<Option<Supply>> {
        Ok(self.state.supplies.get(ticker).cloned())
    }

    async fn holdings(&self, axis: &HoldingAxis, page: PageWindow) -> StoreResult<Page<Holding>> {
        Ok(page.apply(self.state.select_holdings(axis)))
    }

    fn release(&mut self) {
        self.lease.take();
    }
}

#[async_trait]
impl LedgerStore for InMemoryLedgerStore {
    async fn begin_read(&self) -> StoreResult<Box<dyn LedgerSnapshot>> {
        let state = self.load()?;
        Ok(Box::new(MemorySnapshot {
            state,
            lease: Some(ReadLease::acquire(&self.open_reads)),
        }))
    }

    async fn event_position(&self) -> StoreResult<EventPosition> {
        self.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ticker(s: &str) -> Ticker {
        Ticker::parse(s).unwrap()
    }

    fn addr(n: u8) -> Address {
        let addresses = [
            "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq",
            "bc1p5d7rjq7g6rdk2yhzks9smlaqtedr4dekq08ge8ztwac72sfr9rusxg3297",
            "1BvBMSEYstWetqTFn5Au4m4GFg7xJaNVN2",
            "3J98t1WpEZ73CNmQviecrnyiWrnqRhWNLy",
        ];
        Address::parse(addresses[n as usize]).unwrap()
    }

    fn token(name: &str, height: u64, max: u128, limit: u128) -> Token {
        let ticker = ticker(name);
        Token {
            self_mint: ticker.is_self_mint(),
            ticker,
            inscription_id: format!("{}i0", "ab".repeat(32)),
            inscription_number: height as i64,
            block_height: height,
            tx_id: "ab".repeat(32),
            deployer: addr(0),
            deploy_timestamp: 1_700_000_000_000,
            decimals: 0,
            max_supply: Amount::new(max),
            mint_limit: Amount::new(limit),
        }
    }

    fn window(limit: i64, offset: i64) -> PageWindow {
        PageWindow::bounded(limit, offset, 60).unwrap()
    }

    #[test]
    fn every_event_advances_position() {
        let store = InMemoryLedgerStore::new();
        assert_eq!(store.position().unwrap(), EventPosition::GENESIS);

        store.deploy(token("ordi", 1, 1000, 1000)).unwrap();
        store.mint(&ticker("ordi"), &addr(0), Amount::new(10)).unwrap();
        store.inscribe_transfer(&ticker("ordi"), &addr(0), Amount::new(4)).unwrap();
        let last = store
            .transfer(&ticker("ordi"), &addr(0), &addr(1), Amount::new(4))
            .unwrap();
        assert_eq!(last, EventPosition::new(4));
    }

    #[test]
    fn failed_event_does_not_advance_position() {
        let store = InMemoryLedgerStore::new();
        store.deploy(token("ordi", 1, 1000, 1000)).unwrap();
        let err = store.deploy(token("ordi", 2, 1000, 1000)).unwrap_err();
        assert_eq!(err, StoreError::DuplicateTicker(ticker("ordi")));
        assert_eq!(store.position().unwrap(), EventPosition::new(1));
    }

    #[test]
    fn deploy_validation() {
        let store = InMemoryLedgerStore::new();
        assert!(matches!(
            store.deploy(token("ordi", 1, 0, 0)),
            Err(StoreError::InvalidDeploy { .. })
        ));
        assert!(matches!(
            store.deploy(token("ordi", 1, 10, 11)),
            Err(StoreError::InvalidDeploy { .. })
        ));
        let mut mislabeled = token("ordi", 1, 10, 10);
        mislabeled.self_mint = true;
        assert!(matches!(
            store.deploy(mislabeled),
            Err(StoreError::InvalidDeploy { .. })
        ));
    }

    #[test]
    fn mint_truncates_to_remaining_supply() {
        let store = InMemoryLedgerStore::new();
        store.deploy(token("ordi", 1, 100, 60)).unwrap();
        assert_eq!(store.mint(&ticker("ordi"), &addr(0), Amount::new(60)).unwrap(), Amount::new(60));
        assert_eq!(store.mint(&ticker("ordi"), &addr(1), Amount::new(60)).unwrap(), Amount::new(40));
        assert_eq!(
            store.mint(&ticker("ordi"), &addr(2), Amount::new(1)).unwrap_err(),
            StoreError::SupplyExhausted(ticker("ordi"))
        );
        assert!(matches!(
            store.mint(&ticker("ordi"), &addr(2), Amount::new(61)),
            Err(StoreError::MintLimitExceeded { .. })
        ));
    }

    #[test]
    fn transfer_requires_inscribed_balance() {
        let store = InMemoryLedgerStore::new();
        store.deploy(token("ordi", 1, 100, 100)).unwrap();
        store.mint(&ticker("ordi"), &addr(0), Amount::new(50)).unwrap();
        let err = store
            .transfer(&ticker("ordi"), &addr(0), &addr(1), Amount::new(10))
            .unwrap_err();
        assert!(matches!(err, StoreError::InsufficientBalance { kind: "transferrable", .. }));
        let err = store
            .inscribe_transfer(&ticker("ordi"), &addr(0), Amount::new(51))
            .unwrap_err();
        assert!(matches!(err, StoreError::InsufficientBalance { kind: "available", .. }));
    }

    #[tokio::test]
    async fn holders_ranked_and_zero_rows_excluded() {
        let store = InMemoryLedgerStore::new();
        let ordi = ticker("ordi");
        store.deploy(token("ordi", 1, 10_000, 1000)).unwrap();
        store.mint(&ordi, &addr(0), Amount::new(300)).unwrap();
        store.mint(&ordi, &addr(1), Amount::new(500)).unwrap();
        store.mint(&ordi, &addr(2), Amount::new(200)).unwrap();
        store.mint(&ordi, &addr(3), Amount::new(100)).unwrap();

        // addr(3) sends everything away and drops out of the relation.
        store.inscribe_transfer(&ordi, &addr(3), Amount::new(100)).unwrap();
        store.transfer(&ordi, &addr(3), &addr(2), Amount::new(100)).unwrap();

        let snapshot = store.begin_read().await.unwrap();
        let page = snapshot
            .holdings(&HoldingAxis::Ticker(ordi.clone()), window(10, 0))
            .await
            .unwrap();
        assert_eq!(page.total, 3);
        let ranked: Vec<_> = page.rows.iter().map(|h| (h.address.clone(), h.overall())).collect();
        // Equal balances fall back to address order ("1..." sorts before "bc1...").
        assert_eq!(
            ranked,
            vec![
                (addr(1), Amount::new(500)),
                (addr(2), Amount::new(300)),
                (addr(0), Amount::new(300)),
            ]
        );

        let supply = snapshot.token_supply(&ordi).await.unwrap().unwrap();
        assert_eq!(supply.holders, 3);
        assert_eq!(supply.minted_supply, Amount::new(1100));
        let sum: u128 = page.rows.iter().map(|h| h.overall().units()).sum();
        assert_eq!(sum, supply.minted_supply.units());
    }

    #[tokio::test]
    async fn balances_filtered_by_ticker_set() {
        let store = InMemoryLedgerStore::new();
        for (i, name) in ["ordi", "sats", "pepe"].iter().enumerate() {
            store.deploy(token(name, i as u64 + 1, 1000, 1000)).unwrap();
            store.mint(&ticker(name), &addr(0), Amount::new(10)).unwrap();
        }

        let snapshot = store.begin_read().await.unwrap();
        let all = snapshot
            .holdings(
                &HoldingAxis::Address { address: addr(0), tickers: vec![] },
                window(10, 0),
            )
            .await
            .unwrap();
        let names: Vec<_> = all.rows.iter().map(|h| h.ticker.to_string()).collect();
        assert_eq!(names, vec!["ordi", "pepe", "sats"]);

        let some = snapshot
            .holdings(
                &HoldingAxis::Address {
                    address: addr(0),
                    tickers: vec![ticker("sats"), ticker("zzzz")],
                },
                window(10, 0),
            )
            .await
            .unwrap();
        assert_eq!(some.total, 1);
        assert_eq!(some.rows[0].ticker, ticker("sats"));

        let nobody = snapshot
            .holdings(
                &HoldingAxis::Address { address: addr(3), tickers: vec![] },
                window(10, 0),
            )
            .await
            .unwrap();
        assert_eq!(nobody, Page::empty());
    }

    #[tokio::test]
    async fn tokens_in_deploy_order_with_intersection() {
        let store = InMemoryLedgerStore::new();
        store.deploy(token("sats", 2, 1000, 1000)).unwrap();
        store.deploy(token("ordi", 1, 1000, 1000)).unwrap();
        store.deploy(token("pepe", 3, 1000, 1000)).unwrap();

        let snapshot = store.begin_read().await.unwrap();
        let all = snapshot.tokens(&[], window(10, 0)).await.unwrap();
        let names: Vec<_> = all.rows.iter().map(|t| t.ticker.to_string()).collect();
        assert_eq!(names, vec!["ordi", "sats", "pepe"]);

        let some = snapshot
            .tokens(&[ticker("pepe"), ticker("zzzz"), ticker("ordi")], window(10, 0))
            .await
            .unwrap();
        let names: Vec<_> = some.rows.iter().map(|t| t.ticker.to_string()).collect();
        assert_eq!(names, vec!["ordi", "pepe"]);
        assert_eq!(some.total, 2);
    }

    #[tokio::test]
    async fn snapshot_pins_its_version() {
        let store = InMemoryLedgerStore::new();
        let ordi = ticker("ordi");
        store.deploy(token("ordi", 1, 1000, 1000)).unwrap();

        let snapshot = store.begin_read().await.unwrap();
        store.mint(&ordi, &addr(0), Amount::new(10)).unwrap();

        assert_eq!(snapshot.position(), EventPosition::new(1));
        let supply = snapshot.token_supply(&ordi).await.unwrap().unwrap();
        assert_eq!(supply.minted_supply, Amount::ZERO);

        let fresh = store.begin_read().await.unwrap();
        assert_eq!(fresh.position(), EventPosition::new(2));
        let supply = fresh.token_supply(&ordi).await.unwrap().unwrap();
        assert_eq!(supply.minted_supply, Amount::new(10));
    }

    #[tokio::test]
    async fn release_is_idempotent_and_drop_releases() {
        let store = InMemoryLedgerStore::new();
        let mut first = store.begin_read().await.unwrap();
        let second = store.begin_read().await.unwrap();
        assert_eq!(store.open_read_count(), 2);

        first.release();
        first.release();
        assert_eq!(store.open_read_count(), 1);

        drop(second);
        assert_eq!(store.open_read_count(), 0);
    }
}
