use thiserror::Error;

/// Malformed or out-of-range request input.
///
/// Produced before any store access; a request rejected with one of these
/// has no side effects.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid ticker {ticker:?}: {reason}")]
    InvalidTicker { ticker: String, reason: String },

    #[error("invalid address {address:?}: {reason}")]
    InvalidAddress { address: String, reason: String },

    #[error("limit must be between 1 and {max}, got {value}")]
    LimitOutOfRange { value: i64, max: u32 },

    #[error("offset must be non-negative, got {0}")]
    NegativeOffset(i64),

    #[error("parameter {name} is not an integer: {value:?}")]
    NotAnInteger { name: String, value: String },

    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
}

impl ValidationError {
    pub fn ticker(ticker: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidTicker {
            ticker: ticker.into(),
            reason: reason.into(),
        }
    }

    pub fn address(address: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidAddress {
            address: address.into(),
            reason: reason.into(),
        }
    }
}
