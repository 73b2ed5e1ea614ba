//! The catalog store abstraction the command engine runs against.

use crate::error::Result;
use crate::model::{Book, BookId, NewBook};

/// Durable keyed collection of books.
///
/// The store never enforces stock rules; that is the engine's job.
pub trait CatalogStore {
    /// Insert a new book and return its assigned id.
    fn insert(&self, book: &NewBook) -> Result<BookId>;

    /// Insert a batch of books as one unit. Returns how many were stored.
    fn insert_many(&self, books: &[NewBook]) -> Result<usize>;

    /// Look up a book by id.
    fn get(&self, id: BookId) -> Result<Option<Book>>;

    /// All books in natural (ascending id) order.
    fn list_all(&self) -> Result<Vec<Book>>;

    /// Persist an in-place mutation of an existing book.
    ///
    /// Fails with [`Error::NotFound`](crate::Error::NotFound) when no book
    /// has the given id.
    fn update(&self, book: &Book) -> Result<()>;

    fn count(&self) -> Result<usize> {
        Ok(self.list_all()?.len())
    }

    fn is_empty(&self) -> Result<bool> {
        Ok(self.count()? == 0)
    }
}
