use std::fmt;

use tokenview_store::StoreError;
use tokenview_types::{Ticker, ValidationError};

/// Which lookup came back empty.
///
/// Both kinds surface identically to clients; the distinction is kept for
/// logs because `Supply` means a deployed token has no supply record, which
/// is an ingestion inconsistency rather than a bad request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundKind {
    Token(Ticker),
    Supply(Ticker),
}

impl NotFoundKind {
    /// Stable code for log fields and metrics labels.
    pub fn diagnostic_code(&self) -> &'static str {
        match self {
            Self::Token(_) => "token_not_deployed",
            Self::Supply(_) => "supply_missing",
        }
    }
}

impl fmt::Display for NotFoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(ticker) => write!(f, "token {ticker}"),
            Self::Supply(ticker) => write!(f, "supply for {ticker}"),
        }
    }
}

/// Errors produced by query operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("not found: {0}")]
    NotFound(NotFoundKind),

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl QueryError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}

pub type QueryResult<T> = Result<T, QueryError>;
