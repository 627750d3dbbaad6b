//! Wire representations. Amounts are rendered as decimal strings scaled by
//! the token's `decimals`.

use serde::Serialize;
use tokenview_query::TokenDetails;
use tokenview_types::{Balance, Holder, Supply, Token};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenDto {
    pub id: String,
    pub number: i64,
    pub block_height: u64,
    pub tx_id: String,
    pub address: String,
    pub ticker: String,
    pub max_supply: String,
    pub mint_limit: String,
    pub decimals: u8,
    pub deploy_timestamp: u64,
    pub self_mint: bool,
}

impl From<Token> for TokenDto {
    fn from(token: Token) -> Self {
        Self {
            max_supply: token.max_supply.to_decimal_string(token.decimals),
            mint_limit: token.mint_limit.to_decimal_string(token.decimals),
            id: token.inscription_id,
            number: token.inscription_number,
            block_height: token.block_height,
            tx_id: token.tx_id,
            address: token.deployer.into(),
            ticker: token.ticker.into(),
            decimals: token.decimals,
            deploy_timestamp: token.deploy_timestamp,
            self_mint: token.self_mint,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SupplyDto {
    pub max_supply: String,
    pub minted_supply: String,
    pub holders: u64,
    /// Percentage with two decimals, e.g. `"42.50"`.
    pub mint_progress: String,
}

impl From<Supply> for SupplyDto {
    fn from(supply: Supply) -> Self {
        Self {
            max_supply: supply.max_supply.to_decimal_string(supply.decimals),
            minted_supply: supply.minted_supply.to_decimal_string(supply.decimals),
            holders: supply.holders,
            mint_progress: supply.mint_progress(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TokenDetailsDto {
    pub token: TokenDto,
    pub supply: SupplyDto,
}

impl From<TokenDetails> for TokenDetailsDto {
    fn from(details: TokenDetails) -> Self {
        Self {
            token: details.token.into(),
            supply: details.supply.into(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct HolderDto {
    pub address: String,
    pub overall_balance: String,
    pub rank: u64,
}

impl From<Holder> for HolderDto {
    fn from(holder: Holder) -> Self {
        Self {
            overall_balance: holder.balance.to_decimal_string(holder.decimals),
            address: holder.address.into(),
            rank: holder.rank,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BalanceDto {
    pub ticker: String,
    pub available_balance: String,
    pub transferrable_balance: String,
    pub overall_balance: String,
}

impl From<Balance> for BalanceDto {
    fn from(balance: Balance) -> Self {
        Self {
            available_balance: balance.available.to_decimal_string(balance.decimals),
            transferrable_balance: balance.transferrable.to_decimal_string(balance.decimals),
            overall_balance: balance.overall.to_decimal_string(balance.decimals),
            ticker: balance.ticker.into(),
        }
    }
}
