//! The bulk-import seam between a remote source and the catalog.

use async_trait::async_trait;
use bookstock_core::model::NewBook;

use crate::error::ImportResult;

/// A complete record offered by an import source.
///
/// Only records with a non-blank title and author make it this far.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub title: String,
    pub author: String,
    pub year: Option<i32>,
}

impl Candidate {
    /// Build a candidate from loosely-typed source fields, discarding the
    /// record when the title or author is missing or blank.
    pub fn from_parts(
        title: Option<String>,
        author: Option<String>,
        year: Option<i32>,
    ) -> Option<Self> {
        let title = title.filter(|t| !t.trim().is_empty())?;
        let author = author.filter(|a| !a.trim().is_empty())?;
        Some(Self {
            title,
            author,
            year,
        })
    }
}

impl From<Candidate> for NewBook {
    /// Imported books start with a single copy in stock.
    fn from(candidate: Candidate) -> Self {
        Self::new(candidate.title, candidate.author)
            .with_year(candidate.year.unwrap_or(0))
            .with_count(1)
    }
}

/// A one-shot source of candidate books.
#[async_trait]
pub trait CatalogImporter: Send + Sync {
    /// Human-readable name of the source, for logs.
    fn source_name(&self) -> &str;

    /// Fetch up to `limit` candidates. A single attempt is made; the
    /// caller decides what to do on failure.
    async fn fetch_candidates(&self, limit: usize) -> ImportResult<Vec<Candidate>>;
}
