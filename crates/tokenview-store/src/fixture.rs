//! JSON ledger fixtures: an ordered event list replayed through a
//! [`LedgerWriter`]. Used to seed the in-memory store for demos and tests.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tokenview_types::{Address, Amount, Ticker, Token};

use crate::error::StoreResult;
use crate::traits::LedgerWriter;

/// One ingestion event.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    Deploy(Token),
    Mint {
        ticker: Ticker,
        address: Address,
        amount: Amount,
    },
    InscribeTransfer {
        ticker: Ticker,
        address: Address,
        amount: Amount,
    },
    Transfer {
        ticker: Ticker,
        from: Address,
        to: Address,
        amount: Amount,
    },
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LedgerFixture {
    pub events: Vec<LedgerEvent>,
}

impl LedgerFixture {
    pub fn from_json(text: &str) -> StoreResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load(path: impl AsRef<Path>) -> StoreResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    /// Replay every event in order, stopping at the first rejected one.
    pub fn apply(&self, writer: &dyn LedgerWriter) -> StoreResult<()> {
        for event in &self.events {
            match event {
                LedgerEvent::Deploy(token) => {
                    writer.deploy(token.clone())?;
                }
                LedgerEvent::Mint {
                    ticker,
                    address,
                    amount,
                } => {
                    writer.mint(ticker, address, *amount)?;
                }
                LedgerEvent::InscribeTransfer {
                    ticker,
                    address,
                    amount,
                } => {
                    writer.inscribe_transfer(ticker, address, *amount)?;
                }
                LedgerEvent::Transfer {
                    ticker,
                    from,
                    to,
                    amount,
                } => {
                    writer.transfer(ticker, from, to, *amount)?;
                }
            }
        }
        tracing::info!(events = self.events.len(), "ledger fixture applied");
        Ok(())
    }
}
