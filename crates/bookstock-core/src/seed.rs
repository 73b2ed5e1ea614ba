//! Fixed sample records that keep the tool usable without network access.

use crate::error::Result;
use crate::model::NewBook;
use crate::store::CatalogStore;

/// Stock level given to each seed book.
pub const SEED_STOCK: i64 = 999_999;

/// The offline sample catalog.
#[must_use]
pub fn seed_books() -> Vec<NewBook> {
    vec![
        NewBook::new("Animal Farm", "George Orwell")
            .with_year(1945)
            .with_count(SEED_STOCK),
        NewBook::new("1984", "George Orwell")
            .with_year(1948)
            .with_count(SEED_STOCK),
    ]
}

/// Insert the seed books if the store holds nothing.
///
/// Returns the number of books inserted (zero when the store already had
/// data).
pub fn seed_if_empty<S: CatalogStore + ?Sized>(store: &S) -> Result<usize> {
    if !store.is_empty()? {
        return Ok(0);
    }
    let inserted = store.insert_many(&seed_books())?;
    log::info!("Seeded catalog with {} offline books", inserted);
    Ok(inserted)
}
