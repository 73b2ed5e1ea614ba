//! Failures a single command can report back to the operator.

use thiserror::Error;

use crate::model::BookId;

/// Errors raised while parsing or executing one shell command.
///
/// None of these are fatal: the shell prints them and waits for the next
/// command.
#[derive(Debug, Error)]
pub enum CommandError {
    /// The first token did not name a known command.
    #[error("invalid command: {0}")]
    UnknownCommand(String),

    /// A flag the command cannot run without was not given.
    #[error("missing required flag --{0}")]
    MissingFlag(&'static str),

    /// A flag was given but its value could not be parsed.
    #[error("invalid value for --{key}: {value:?}")]
    InvalidFlag { key: &'static str, value: String },

    /// `--date` did not parse as a calendar date.
    #[error("wrong date format: {0:?}")]
    InvalidDate(String),

    /// `--order-by` named a field that cannot be sorted on.
    #[error("invalid order-by field: {0:?} (expected title, author, date, or count)")]
    InvalidSortKey(String),

    /// No book has the requested id.
    #[error("book {0} not found")]
    NotFound(BookId),

    /// The book exists but has no copies left to sell.
    #[error("{title} (id {id}) is out of stock")]
    OutOfStock { id: BookId, title: String },

    /// A random restock was requested against an empty catalog.
    #[error("no books available to restock")]
    NoBooks,

    /// Applying the restock amount would overflow the stock counter.
    #[error("restocking book {id} by {amount} overflows its count")]
    StockOverflow { id: BookId, amount: i64 },

    /// The catalog store failed underneath the command.
    #[error("store error: {0}")]
    Store(#[from] crate::Error),
}

impl CommandError {
    /// Returns `true` when the operator typed something the engine could
    /// not interpret, as opposed to a valid request the catalog refused.
    pub fn is_user_input(&self) -> bool {
        matches!(
            self,
            Self::UnknownCommand(_)
                | Self::MissingFlag(_)
                | Self::InvalidFlag { .. }
                | Self::InvalidDate(_)
                | Self::InvalidSortKey(_)
        )
    }
}

/// Convenience alias for engine results.
pub type CommandResult<T> = std::result::Result<T, CommandError>;
