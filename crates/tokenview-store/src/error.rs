use std::time::Duration;

use tokenview_types::{Amount, Ticker};

/// Errors from ledger store operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or refused the request.
    #[error("store unavailable: {0}")]
    Unavailable(String),

    /// The read transaction was aborted by the backend.
    #[error("transaction aborted: {0}")]
    TransactionAborted(String),

    /// The backend did not answer in time.
    #[error("store operation timed out after {0:?}")]
    Timeout(Duration),

    /// A lock protecting in-process state was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,

    /// Stored data violates a ledger invariant.
    #[error("corrupt ledger state: {0}")]
    Corrupt(String),

    /// Serialization or deserialization failure.
    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),

    #[error("ticker already deployed: {0}")]
    DuplicateTicker(Ticker),

    #[error("ticker not deployed: {0}")]
    UnknownTicker(Ticker),

    #[error("invalid deploy for {ticker}: {reason}")]
    InvalidDeploy { ticker: Ticker, reason: String },

    #[error("supply of {0} is fully minted")]
    SupplyExhausted(Ticker),

    #[error("mint of {amount} {ticker} exceeds limit per mint {limit}")]
    MintLimitExceeded {
        ticker: Ticker,
        amount: Amount,
        limit: Amount,
    },

    #[error("insufficient {kind} balance of {ticker}: need {needed}, have {available}")]
    InsufficientBalance {
        ticker: Ticker,
        kind: &'static str,
        needed: Amount,
        available: Amount,
    },

    #[error("amount must be positive")]
    ZeroAmount,
}

impl From<std::io::Error> for StoreError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(error: serde_json::Error) -> Self {
        Self::Serialization(error.to_string())
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
