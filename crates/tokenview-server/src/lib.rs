//! HTTP surface for tokenview.
//!
//! Serves the token list, token details, holders and balances views over
//! axum, with a watermark-gated response cache in front of the token routes.

pub mod config;
pub mod dto;
pub mod error;
pub mod handler;
pub mod middleware;
pub mod router;
pub mod server;
pub mod state;

pub use config::{CacheConfig, LoggingConfig, ServerConfig, ServiceConfig, StoreConfig};
pub use error::{ServerError, ServerResult};
pub use server::{open_store, TokenviewServer};
pub use state::AppState;
