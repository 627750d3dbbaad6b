use serde::{Deserialize, Serialize};

use crate::address::Address;
use crate::amount::Amount;
use crate::ticker::Ticker;

/// Deploy metadata for a token. Immutable once deployed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Token {
    pub ticker: Ticker,
    /// Inscription id of the deploy inscription (`<txid>i<index>`).
    pub inscription_id: String,
    pub inscription_number: i64,
    pub block_height: u64,
    pub tx_id: String,
    /// Address that inscribed the deploy.
    pub deployer: Address,
    /// Milliseconds since the UNIX epoch of the deploy block.
    pub deploy_timestamp: u64,
    pub decimals: u8,
    pub max_supply: Amount,
    pub mint_limit: Amount,
    pub self_mint: bool,
}

impl Token {
    /// Total order used for paginating the token list: deploy block, then
    /// inscription number.
    pub fn deploy_order(&self) -> (u64, i64) {
        (self.block_height, self.inscription_number)
    }
}

/// Supply figures for one ticker, derived by the ingestion pipeline.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supply {
    pub ticker: Ticker,
    pub decimals: u8,
    pub max_supply: Amount,
    pub minted_supply: Amount,
    /// Number of addresses with a strictly positive balance.
    pub holders: u64,
}

impl Supply {
    /// Mint progress as a percentage string with two decimals, e.g. `"42.17"`.
    pub fn mint_progress(&self) -> String {
        let max = self.max_supply.units();
        if max == 0 {
            return "0.00".to_string();
        }
        let minted = self.minted_supply.units();
        let basis_points = minted
            .checked_mul(10_000)
            .map(|scaled| scaled / max)
            .unwrap_or_else(|| minted / (max / 10_000).max(1));
        let basis_points = basis_points.min(10_000);
        format!("{}.{:02}", basis_points / 100, basis_points % 100)
    }
}
