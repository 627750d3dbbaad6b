//! Foundation types for tokenview.
//!
//! tokenview is a read-side query façade over a fungible-token ledger derived
//! from inscription events. This crate holds the value types shared by every
//! other tokenview crate.
//!
//! # Key Types
//!
//! - [`Ticker`] -- Canonical (lowercase) token identifier
//! - [`Address`] -- Syntactically valid Bitcoin address
//! - [`Amount`] -- Token quantity in the smallest unit
//! - [`Token`] / [`Supply`] -- Deploy metadata and supply figures
//! - [`Holding`] -- The (ticker, address) balance relation
//! - [`Holder`] / [`Balance`] -- The two views over a holding
//! - [`PageWindow`] / [`Page`] -- Bounded page request and store page result
//! - [`EventPosition`] -- Watermark in the transfer-event stream

pub mod address;
pub mod amount;
pub mod error;
pub mod holding;
pub mod page;
pub mod position;
pub mod ticker;
pub mod token;

pub use address::Address;
pub use amount::Amount;
pub use error::ValidationError;
pub use holding::{Balance, Holder, Holding};
pub use page::{Page, PageWindow};
pub use position::EventPosition;
pub use ticker::Ticker;
pub use token::{Supply, Token};
