//! Response cache gate for tokenview.
//!
//! Cached responses are keyed by [`RouteSignature`] and tagged with the
//! [`EventPosition`](tokenview_types::EventPosition) observed before they
//! were computed. The [`CacheGate`] serves an entry only while no event has
//! been applied since; freshness is watermark-based, never time-based.

pub mod error;
pub mod etag;
pub mod gate;
pub mod signature;
pub mod store;

pub use error::{CacheError, CacheResult};
pub use etag::{entity_tag, if_none_match};
pub use gate::{CacheGate, GateOutcome};
pub use signature::RouteSignature;
pub use store::{CacheStore, CachedEntry, InMemoryCacheStore};
