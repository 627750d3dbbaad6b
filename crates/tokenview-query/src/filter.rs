//! Ticker and address normalization.
//!
//! Everything here runs before a snapshot is opened: malformed input fails
//! with a [`ValidationError`] and never reaches the store.

use std::collections::HashSet;

use tokenview_types::{Address, Ticker, ValidationError};

pub fn normalize_ticker(raw: &str) -> Result<Ticker, ValidationError> {
    Ticker::parse(raw)
}

/// Validate, canonicalize and deduplicate a ticker list, keeping first
/// occurrences in request order. An empty result means "no filter".
pub fn normalize_tickers<S: AsRef<str>>(raw: &[S]) -> Result<Vec<Ticker>, ValidationError> {
    let mut seen = HashSet::with_capacity(raw.len());
    let mut tickers = Vec::with_capacity(raw.len());
    for entry in raw {
        let ticker = Ticker::parse(entry.as_ref())?;
        if seen.insert(ticker.clone()) {
            tickers.push(ticker);
        }
    }
    Ok(tickers)
}

pub fn normalize_address(raw: &str) -> Result<Address, ValidationError> {
    Address::parse(raw)
}
