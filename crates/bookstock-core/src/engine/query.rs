//! Filtering and ordering the catalog for the `get` command.

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use std::str::FromStr;

use super::command::Flags;
use super::error::{CommandError, CommandResult};
use crate::model::Book;
use crate::store::CatalogStore;

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d.%m.%Y"];
const DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"];

/// Field a query result can be ordered by (always ascending).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Title,
    Author,
    /// Publication year.
    Date,
    Count,
}

impl FromStr for SortKey {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "author" => Ok(Self::Author),
            "date" => Ok(Self::Date),
            "count" => Ok(Self::Count),
            _ => Err(CommandError::InvalidSortKey(s.to_string())),
        }
    }
}

impl SortKey {
    fn sort(self, books: &mut [Book]) {
        match self {
            Self::Title => books.sort_by(|a, b| a.title.cmp(&b.title)),
            Self::Author => books.sort_by(|a, b| a.author.cmp(&b.author)),
            Self::Date => books.sort_by_key(|b| b.year),
            Self::Count => books.sort_by_key(|b| b.count),
        }
    }
}

/// Parse a date string in any of the accepted layouts.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
        .or_else(|| {
            DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(value, fmt).ok())
                .map(|dt| dt.date())
        })
        .or_else(|| {
            DateTime::parse_from_rfc3339(value)
                .ok()
                .map(|dt| dt.date_naive())
        })
}

/// A conjunctive filter plus optional ordering over the catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookQuery {
    pub title: Option<String>,
    pub author: Option<String>,
    pub year: Option<i32>,
    pub order_by: Option<SortKey>,
}

impl BookQuery {
    /// A query that matches every book in store order.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a query from `--title`, `--author`, `--date`, and `--order-by`.
    ///
    /// Fails before touching the store if the date or sort key is invalid.
    pub fn from_flags(flags: &Flags) -> CommandResult<Self> {
        let year = flags
            .text("date")
            .map(|raw| {
                parse_date(raw)
                    .map(|date| date.year())
                    .ok_or_else(|| CommandError::InvalidDate(raw.to_string()))
            })
            .transpose()?;

        let order_by = flags
            .text("order-by")
            .map(str::parse::<SortKey>)
            .transpose()?;

        Ok(Self {
            title: flags.text("title").map(str::to_string),
            author: flags.text("author").map(str::to_string),
            year,
            order_by,
        })
    }

    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    #[must_use]
    pub const fn ordered_by(mut self, key: SortKey) -> Self {
        self.order_by = Some(key);
        self
    }

    pub fn matches(&self, book: &Book) -> bool {
        self.title
            .as_deref()
            .map_or(true, |t| book.title.contains(t))
            && self
                .author
                .as_deref()
                .map_or(true, |a| book.author.contains(a))
            && self.year.map_or(true, |y| book.year == y)
    }

    /// Filter and order an already-loaded list of books.
    pub fn apply(&self, books: Vec<Book>) -> Vec<Book> {
        let mut selected: Vec<Book> = books.into_iter().filter(|b| self.matches(b)).collect();
        if let Some(key) = self.order_by {
            key.sort(&mut selected);
        }
        selected
    }

    /// Run the query against the store.
    pub fn run<S: CatalogStore + ?Sized>(&self, store: &S) -> CommandResult<Vec<Book>> {
        let books = store.list_all()?;
        let results = self.apply(books);
        log::debug!("Query {:?} matched {} books", self, results.len());
        Ok(results)
    }
}
