use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::Amount;
use crate::ticker::Ticker;

/// One row of the (ticker, address) balance relation.
///
/// Both the holders view and the balances view are projections of this
/// relation. A holding exists logically only while its overall balance is
/// positive.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub ticker: Ticker,
    pub address: Address,
    pub decimals: u8,
    /// Balance free to inscribe transfers against.
    pub available: Amount,
    /// Balance locked in inscribed-but-unsent transfer inscriptions.
    pub transferrable: Amount,
}

impl Holding {
    pub fn overall(&self) -> Amount {
        // Guarded on write: available + transferrable never exceeds minted supply.
        Amount::new(self.available.units().saturating_add(self.transferrable.units()))
    }

    pub fn is_positive(&self) -> bool {
        !self.overall().is_zero()
    }
}

/// A holding seen from the ticker side, with its rank in the holder list.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holder {
    pub address: Address,
    pub balance: Amount,
    pub decimals: u8,
    /// 1-based rank by descending balance.
    pub rank: u64,
}

impl Holder {
    pub fn from_holding(holding: Holding, rank: u64) -> Self {
        Self {
            balance: holding.overall(),
            address: holding.address,
            decimals: holding.decimals,
            rank,
        }
    }
}

/// A holding seen from the address side.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Balance {
    pub ticker: Ticker,
    pub decimals: u8,
    pub available: Amount,
    pub transferrable: Amount,
    pub overall: Amount,
}

impl From<Holding> for Balance {
    fn from(holding: Holding) -> Self {
        Self {
            overall: holding.overall(),
            ticker: holding.ticker,
            decimals: holding.decimals,
            available: holding.available,
            transferrable: holding.transferrable,
        }
    }
}
