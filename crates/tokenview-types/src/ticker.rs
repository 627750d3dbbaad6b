use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Byte length of a regular ticker.
pub const TICKER_LENGTH: usize = 4;

/// Byte length of a self-mint ticker.
pub const SELF_MINT_TICKER_LENGTH: usize = 5;

/// Canonical token identifier.
///
/// Tickers are case-insensitive; the canonical form is lowercase. A ticker is
/// 4 UTF-8 bytes, or 5 bytes for self-mint tokens, and contains no whitespace
/// or control characters.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Ticker(String);

impl Ticker {
    /// Validate and canonicalize a raw ticker string.
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::ticker(raw, "ticker must not be empty"));
        }

        if let Some(ch) = raw.chars().find(|c| c.is_whitespace() || c.is_control()) {
            return Err(ValidationError::ticker(
                raw,
                format!("contains forbidden character: {ch:?}"),
            ));
        }

        let canonical = raw.to_lowercase();
        match canonical.len() {
            TICKER_LENGTH | SELF_MINT_TICKER_LENGTH => Ok(Self(canonical)),
            len => Err(ValidationError::ticker(
                raw,
                format!(
                    "must be {TICKER_LENGTH} or {SELF_MINT_TICKER_LENGTH} bytes, got {len}"
                ),
            )),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Five-byte tickers are reserved for self-mint deploys.
    pub fn is_self_mint(&self) -> bool {
        self.0.len() == SELF_MINT_TICKER_LENGTH
    }
}

impl FromStr for Ticker {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Ticker {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Ticker> for String {
    fn from(ticker: Ticker) -> Self {
        ticker.0
    }
}

impl AsRef<str> for Ticker {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ticker({})", self.0)
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
