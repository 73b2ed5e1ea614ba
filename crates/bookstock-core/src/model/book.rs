use chrono::{DateTime, Utc};
use std::fmt;

use crate::model::ids::BookId;

/// A catalog record with its current stock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,

    /// Year of first publication; `0` when unknown.
    pub year: i32,

    /// Copies on hand. Purchases never take this below zero.
    pub count: i64,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Book {
    /// Whether at least one copy can be sold.
    #[must_use]
    pub const fn in_stock(&self) -> bool {
        self.count > 0
    }
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Id: {}, Author: {}, Title: {}, Year: {}, Count: {}",
            self.id, self.author, self.title, self.year, self.count
        )
    }
}

/// A book that has not been stored yet.
///
/// The store assigns the id and timestamps on insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub count: i64,
}

impl NewBook {
    /// A single copy of an undated book.
    #[must_use]
    pub fn new(title: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year: 0,
            count: 1,
        }
    }

    #[must_use]
    pub const fn with_year(mut self, year: i32) -> Self {
        self.year = year;
        self
    }

    #[must_use]
    pub const fn with_count(mut self, count: i64) -> Self {
        self.count = count;
        self
    }
}
