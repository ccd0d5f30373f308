//! Café list library entry points.
//!
//! This crate owns the immutable café [`Catalog`] and the [`QueryResolver`]
//! that validates and answers "list cafés in a city" queries. Transports
//! (the HTTP service and the CLI) should only depend on the items exported
//! here instead of reimplementing validation or filtering.

#![deny(warnings)]

pub mod catalog;
pub mod error;
pub mod query;

pub use catalog::{CafeRecord, Catalog};
pub use error::{Error, Result};
pub use query::{parse_count, CafeQuery, QueryResolver};
