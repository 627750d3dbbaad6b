//! Query semantics for tokenview.
//!
//! Sits between the HTTP surface and the ledger store:
//!
//! - [`pagination`] -- bounds `limit`/`offset` and shapes the
//!   `{limit, offset, total, results}` envelope
//! - [`filter`] -- ticker and address normalization, run before any store
//!   access
//! - [`ReadScope`] -- scope guard over one read snapshot, released on every
//!   exit path; carries the four ledger reads
//! - [`SnapshotCoordinator`] -- multi-step atomic reads (token details)
//! - [`TokenQueryService`] -- the four views, end to end

mod client;
pub mod coordinator;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod scope;
pub mod service;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{SnapshotCoordinator, TokenDetails};
pub use error::{NotFoundKind, QueryError, QueryResult};
pub use pagination::{PageParams, Paginated, PaginationConfig};
pub use scope::ReadScope;
pub use service::TokenQueryService;
