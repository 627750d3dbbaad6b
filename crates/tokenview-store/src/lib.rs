//! Ledger store boundary for tokenview.
//!
//! The production ledger store (the system of record fed by the ingestion
//! pipeline) lives outside tokenview. This crate defines the narrow interface
//! tokenview reads it through, plus a reference implementation.
//!
//! # Traits
//!
//! - [`LedgerStore`] -- opens read snapshots and reports the event watermark
//! - [`LedgerSnapshot`] -- the four read operations, all evaluated against one
//!   consistent point-in-time view
//! - [`LedgerWriter`] -- ingestion seam used by the reference store, fixtures
//!   and tests; never called on the request path
//!
//! # Storage Backends
//!
//! - [`InMemoryLedgerStore`] -- copy-on-write multi-version store for tests,
//!   demos and embedding
//!
//! # Design Rules
//!
//! 1. Reads never mutate ledger state.
//! 2. Holders and balances are one relation ([`HoldingAxis`] picks the fixed
//!    dimension); zero-balance rows are filtered in exactly one place.
//! 3. A snapshot observes one version of the ledger for its whole lifetime.
//! 4. Every snapshot is released exactly once; releasing is idempotent.

pub mod error;
pub mod fixture;
pub mod memory;
pub mod traits;

pub use error::{StoreError, StoreResult};
pub use fixture::{LedgerEvent, LedgerFixture};
pub use memory::InMemoryLedgerStore;
pub use traits::{HoldingAxis, LedgerSnapshot, LedgerStore, LedgerWriter};
