//! The command engine behind the interactive shell.
//!
//! A raw line is parsed into a [`CommandLine`], turned into a typed
//! [`Action`], and executed against a [`CatalogStore`]. The engine never
//! prints; the caller decides how to render an [`Outcome`] or a
//! [`CommandError`].

pub mod command;
pub mod error;
pub mod query;
pub mod stock;

pub use command::{CommandLine, Flags};
pub use error::{CommandError, CommandResult};
pub use query::{BookQuery, SortKey};
pub use stock::{RestockRequest, Restocked, StockMutator, DEFAULT_RESTOCK_RANGE};

use rand::Rng;

use crate::model::{Book, BookId};
use crate::store::CatalogStore;

/// A validated shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// `get`: list books matching a query.
    Get(BookQuery),
    /// `buy --id=N`: sell one copy.
    Buy(BookId),
    /// `restock [--id=N] [--count=N]`: add copies.
    Restock(RestockRequest),
}

impl Action {
    /// Validate a parsed line into an action.
    ///
    /// All flag checking happens here, so a failed action never reads or
    /// writes the store.
    pub fn from_command(command: &CommandLine) -> CommandResult<Self> {
        let flags = &command.flags;
        match command.name.as_str() {
            "get" => Ok(Self::Get(BookQuery::from_flags(flags)?)),
            "buy" => Ok(Self::Buy(flags.require("id")?)),
            "restock" => Ok(Self::Restock(RestockRequest {
                id: flags.parse_value("id")?,
                amount: flags.parse_value("count")?,
            })),
            other => Err(CommandError::UnknownCommand(other.to_string())),
        }
    }

    /// Progress line shown before the action runs.
    pub const fn banner(&self) -> &'static str {
        match self {
            Self::Get(_) => "Getting books...",
            Self::Buy(_) => "Buying book...",
            Self::Restock(_) => "Restocking books...",
        }
    }
}

/// What a successful action produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Books(Vec<Book>),
    Bought(Book),
    Restocked(Restocked),
}

/// Runs actions against one store with one source of randomness.
#[derive(Debug)]
pub struct Engine<'a, S: ?Sized, R> {
    store: &'a S,
    rng: R,
}

impl<'a, S: CatalogStore + ?Sized, R: Rng> Engine<'a, S, R> {
    pub const fn new(store: &'a S, rng: R) -> Self {
        Self { store, rng }
    }

    pub fn execute(&mut self, action: Action) -> CommandResult<Outcome> {
        match action {
            Action::Get(query) => query.run(self.store).map(Outcome::Books),
            Action::Buy(id) => StockMutator::new(self.store).buy(id).map(Outcome::Bought),
            Action::Restock(request) => StockMutator::new(self.store)
                .restock(request, &mut self.rng)
                .map(Outcome::Restocked),
        }
    }
}
