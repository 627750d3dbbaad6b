//! Entity tags for conditional requests.
//!
//! A response body is a pure function of its route signature and the ledger
//! version it was read at, so the tag is a hash of exactly those two.

use tokenview_types::EventPosition;

use crate::signature::RouteSignature;

const TAG_BYTES: usize = 16;

/// Strong ETag (quoted) for `signature` at `position`.
pub fn entity_tag(signature: &RouteSignature, position: EventPosition) -> String {
    let mut hasher = blake3::Hasher::new();
    hasher.update(signature.as_str().as_bytes());
    hasher.update(&position.seq().to_be_bytes());
    let hash = hasher.finalize();
    format!("\"{}\"", hex::encode(&hash.as_bytes()[..TAG_BYTES]))
}

/// Whether an `If-None-Match` header value matches `etag`.
///
/// Accepts `*`, comma-separated lists, and weak (`W/`) validators, which
/// compare weakly as GET conditional requests allow.
pub fn if_none_match(header: &str, etag: &str) -> bool {
    header.split(',').map(str::trim).any(|candidate| {
        candidate == "*" || candidate.strip_prefix("W/").unwrap_or(candidate) == etag
    })
}
