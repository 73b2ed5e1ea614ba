//! Catalog population for bookstock.
//!
//! Fetches candidate books from the Open Library search API, loads them
//! into an empty catalog, and falls back to the offline seed books when
//! nothing could be imported. Also owns the layered configuration.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod bootstrap;
pub mod config;
pub mod error;
pub mod importer;
pub mod openlibrary;

pub use bootstrap::{populate, Populated};
pub use config::Config;
pub use error::{ImportError, ImportResult};
pub use importer::{Candidate, CatalogImporter};
pub use openlibrary::OpenLibraryClient;
