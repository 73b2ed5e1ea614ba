//! Core domain model for bookstock.
//!
//! This crate defines the `Book` record, the SQLite-backed catalog store,
//! seed data, and the command engine (flag parsing, catalog queries, and
//! stock mutations) that the interactive shell drives.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod error;
pub mod model;
pub mod schema;
pub mod seed;
pub mod store;

pub use error::{Error, Result};
pub use store::CatalogStore;
