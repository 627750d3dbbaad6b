use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Human-readable parts accepted for segwit addresses (mainnet, testnet/signet, regtest).
const SEGWIT_HRPS: &[&str] = &["bc", "tb", "bcrt"];

/// Bech32 data-part alphabet.
const BECH32_CHARSET: &str = "qpzry9x8gf2tvdw0s3jn54khce6mua7l";

/// Base58 alphabet (no `0`, `O`, `I`, `l`).
const BASE58_CHARSET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Leading characters of legacy P2PKH/P2SH addresses across networks.
const BASE58_PREFIXES: &[char] = &['1', '3', 'm', 'n', '2'];

const SEGWIT_LENGTH: std::ops::RangeInclusive<usize> = 14..=90;
const BASE58_LENGTH: std::ops::RangeInclusive<usize> = 26..=35;

/// Bech32 checksum length in data characters.
const BECH32_CHECKSUM_LENGTH: usize = 6;

/// Address encoding family; decides canonicalization.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum AddressKind {
    /// Bech32/bech32m witness address (`bc1...`).
    Segwit,
    /// Base58 P2PKH or P2SH address.
    Legacy,
}

/// A syntactically valid Bitcoin address.
///
/// Only the address grammar is checked (prefix, alphabet, length). Segwit
/// addresses canonicalize to lowercase; base58 addresses are case-sensitive
/// and kept verbatim.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Address(String);

impl Address {
    pub fn parse(raw: &str) -> Result<Self, ValidationError> {
        match Self::classify(raw)? {
            AddressKind::Segwit => Ok(Self(raw.to_ascii_lowercase())),
            AddressKind::Legacy => Ok(Self(raw.to_string())),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn classify(raw: &str) -> Result<AddressKind, ValidationError> {
        if raw.is_empty() {
            return Err(ValidationError::address(raw, "address must not be empty"));
        }
        if !raw.is_ascii() {
            return Err(ValidationError::address(raw, "address must be ASCII"));
        }

        if is_segwit_candidate(raw) {
            validate_segwit(raw)?;
            return Ok(AddressKind::Segwit);
        }

        if raw.starts_with(BASE58_PREFIXES) {
            validate_base58(raw)?;
            return Ok(AddressKind::Legacy);
        }

        Err(ValidationError::address(raw, "unrecognized address prefix"))
    }
}

fn is_segwit_candidate(raw: &str) -> bool {
    let lower = raw.to_ascii_lowercase();
    SEGWIT_HRPS
        .iter()
        .any(|hrp| lower.strip_prefix(hrp).is_some_and(|rest| rest.starts_with('1')))
}

fn validate_segwit(raw: &str) -> Result<(), ValidationError> {
    let has_lower = raw.chars().any(|c| c.is_ascii_lowercase());
    let has_upper = raw.chars().any(|c| c.is_ascii_uppercase());
    if has_lower && has_upper {
        return Err(ValidationError::address(raw, "mixed-case bech32 address"));
    }

    if !SEGWIT_LENGTH.contains(&raw.len()) {
        return Err(ValidationError::address(
            raw,
            format!(
                "bech32 address length must be {}-{}, got {}",
                SEGWIT_LENGTH.start(),
                SEGWIT_LENGTH.end(),
                raw.len()
            ),
        ));
    }

    let lower = raw.to_ascii_lowercase();
    let Some((hrp, data)) = lower.rsplit_once('1') else {
        return Err(ValidationError::address(raw, "missing bech32 separator"));
    };

    if !SEGWIT_HRPS.contains(&hrp) {
        return Err(ValidationError::address(
            raw,
            format!("unknown human-readable part: {hrp}"),
        ));
    }

    if data.len() <= BECH32_CHECKSUM_LENGTH {
        return Err(ValidationError::address(raw, "bech32 data part too short"));
    }

    if let Some(ch) = data.chars().find(|c| !BECH32_CHARSET.contains(*c)) {
        return Err(ValidationError::address(
            raw,
            format!("invalid bech32 character: {ch:?}"),
        ));
    }

    // Witness versions 0..=16 map to the first 17 charset symbols.
    let version_ok = data
        .chars()
        .next()
        .and_then(|c| BECH32_CHARSET.find(c))
        .is_some_and(|v| v <= 16);
    if !version_ok {
        return Err(ValidationError::address(raw, "invalid witness version"));
    }

    Ok(())
}

fn validate_base58(raw: &str) -> Result<(), ValidationError> {
    if !BASE58_LENGTH.contains(&raw.len()) {
        return Err(ValidationError::address(
            raw,
            format!(
                "base58 address length must be {}-{}, got {}",
                BASE58_LENGTH.start(),
                BASE58_LENGTH.end(),
                raw.len()
            ),
        ));
    }

    if let Some(ch) = raw.chars().find(|c| !BASE58_CHARSET.contains(*c)) {
        return Err(ValidationError::address(
            raw,
            format!("invalid base58 character: {ch:?}"),
        ));
    }

    Ok(())
}

impl FromStr for Address {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Address {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Address> for String {
    fn from(address: Address) -> Self {
        address.0
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.0)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
