//! Purchases and restocks against a single catalog book.

use rand::seq::SliceRandom;
use rand::Rng;
use std::ops::RangeInclusive;

use super::error::{CommandError, CommandResult};
use crate::model::{Book, BookId};
use crate::store::CatalogStore;

/// Copies added by a restock that does not name an amount.
pub const DEFAULT_RESTOCK_RANGE: RangeInclusive<i64> = 1..=9;

/// What a `restock` command asked for.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestockRequest {
    /// Book to restock; a random one when `None`.
    pub id: Option<BookId>,
    /// Copies to add; a random amount from [`DEFAULT_RESTOCK_RANGE`] when `None`.
    pub amount: Option<i64>,
}

/// Result of a successful restock.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Restocked {
    pub book: Book,
    pub amount: i64,
}

/// Applies stock changes to books held in a [`CatalogStore`].
#[derive(Debug)]
pub struct StockMutator<'a, S: ?Sized> {
    store: &'a S,
}

impl<'a, S: CatalogStore + ?Sized> StockMutator<'a, S> {
    pub const fn new(store: &'a S) -> Self {
        Self { store }
    }

    /// Sell one copy of a book.
    ///
    /// Returns the book with its reduced count. A missing book or one with
    /// no copies left is reported as unavailable and nothing changes.
    pub fn buy(&self, id: BookId) -> CommandResult<Book> {
        let mut book = self.store.get(id)?.ok_or(CommandError::NotFound(id))?;
        if !book.in_stock() {
            return Err(CommandError::OutOfStock {
                id,
                title: book.title,
            });
        }

        book.count -= 1;
        self.store.update(&book)?;
        log::debug!("Sold one copy of book {}, {} left", book.id, book.count);
        Ok(book)
    }

    /// Add copies to a book.
    ///
    /// The amount is applied as-is, including a zero or negative one.
    pub fn restock<R: Rng + ?Sized>(
        &self,
        request: RestockRequest,
        rng: &mut R,
    ) -> CommandResult<Restocked> {
        let amount = request
            .amount
            .unwrap_or_else(|| rng.gen_range(DEFAULT_RESTOCK_RANGE));

        let mut book = match request.id {
            Some(id) => self.store.get(id)?.ok_or(CommandError::NotFound(id))?,
            None => self.pick_random(rng)?,
        };

        book.count = book
            .count
            .checked_add(amount)
            .ok_or(CommandError::StockOverflow {
                id: book.id,
                amount,
            })?;
        self.store.update(&book)?;
        log::debug!(
            "Restocked book {} by {}, now {}",
            book.id,
            amount,
            book.count
        );

        Ok(Restocked { book, amount })
    }

    fn pick_random<R: Rng + ?Sized>(&self, rng: &mut R) -> CommandResult<Book> {
        let books = self.store.list_all()?;
        books
            .choose(rng)
            .cloned()
            .ok_or(CommandError::NoBooks)
    }
}
