use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{Book, BookId, NewBook};
use crate::store::CatalogStore;

use super::migrations::MIGRATIONS;

const BOOK_COLUMNS: &str = "id, title, author, year, count, created_at, updated_at";

/// A database connection holding the book catalog.
#[derive(Debug)]
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) a database at the given path and apply migrations.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path)?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    /// Open an in-memory database (for tests).
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let db = Self { conn };
        db.apply_migrations()?;
        Ok(db)
    }

    fn apply_migrations(&self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                applied_at TEXT NOT NULL DEFAULT (datetime('now'))
            )",
            [],
        )?;

        let mut stmt = self
            .conn
            .prepare("SELECT version FROM schema_migrations ORDER BY version")?;
        let applied: Vec<u32> = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        for migration in MIGRATIONS {
            if !applied.contains(&migration.version) {
                log::info!(
                    "Applying migration {} ({})",
                    migration.version,
                    migration.name
                );
                self.conn.execute_batch(migration.sql)?;
                self.conn.execute(
                    "INSERT INTO schema_migrations (version, name) VALUES (?1, ?2)",
                    rusqlite::params![migration.version, migration.name],
                )?;
            }
        }

        Ok(())
    }

    fn insert_with(conn: &Connection, book: &NewBook, now: &str) -> Result<BookId> {
        conn.execute(
            "INSERT INTO books (title, author, year, count, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
            rusqlite::params![book.title, book.author, book.year, book.count, now],
        )?;
        Ok(BookId::new(conn.last_insert_rowid()))
    }

    fn row_to_book(row: &rusqlite::Row) -> rusqlite::Result<Book> {
        Ok(Book {
            id: BookId::new(row.get(0)?),
            title: row.get(1)?,
            author: row.get(2)?,
            year: row.get(3)?,
            count: row.get(4)?,
            created_at: parse_timestamp(5, &row.get::<_, String>(5)?)?,
            updated_at: parse_timestamp(6, &row.get::<_, String>(6)?)?,
        })
    }
}

fn parse_timestamp(idx: usize, value: &str) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(Into::into)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

// Book CRUD
impl CatalogStore for Database {
    fn insert(&self, book: &NewBook) -> Result<BookId> {
        Self::insert_with(&self.conn, book, &Utc::now().to_rfc3339())
    }

    fn insert_many(&self, books: &[NewBook]) -> Result<usize> {
        let tx = self.conn.unchecked_transaction()?;
        let now = Utc::now().to_rfc3339();
        for book in books {
            Self::insert_with(&tx, book, &now)?;
        }
        tx.commit()?;
        Ok(books.len())
    }

    fn get(&self, id: BookId) -> Result<Option<Book>> {
        let book = self
            .conn
            .query_row(
                &format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?1"),
                [id.get()],
                Self::row_to_book,
            )
            .optional()?;
        Ok(book)
    }

    fn list_all(&self) -> Result<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {BOOK_COLUMNS} FROM books ORDER BY id"))?;

        let books = stmt
            .query_map([], Self::row_to_book)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(books)
    }

    fn update(&self, book: &Book) -> Result<()> {
        let changed = self.conn.execute(
            "UPDATE books SET
                title = ?2, author = ?3, year = ?4, count = ?5, updated_at = ?6
             WHERE id = ?1",
            rusqlite::params![
                book.id.get(),
                book.title,
                book.author,
                book.year,
                book.count,
                Utc::now().to_rfc3339(),
            ],
        )?;

        if changed == 0 {
            return Err(Error::NotFound {
                entity: "book",
                id: book.id.to_string(),
            });
        }
        Ok(())
    }

    fn count(&self) -> Result<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM books", [], |row| row.get(0))?;
        Ok(usize::try_from(count).unwrap_or(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_database_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        let count: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(count, 1);
        assert!(db.is_empty().unwrap());
    }

    #[test]
    fn test_insert_assigns_sequential_ids() {
        let db = Database::open_in_memory().unwrap();
        let first = db.insert(&NewBook::new("Animal Farm", "George Orwell")).unwrap();
        let second = db.insert(&NewBook::new("1984", "George Orwell")).unwrap();
        assert_eq!(first, BookId::new(1));
        assert_eq!(second, BookId::new(2));
    }

    #[test]
    fn test_book_round_trip() {
        let db = Database::open_in_memory().unwrap();
        let id = db
            .insert(
                &NewBook::new("Homage to Catalonia", "George Orwell")
                    .with_year(1938)
                    .with_count(4),
            )
            .unwrap();

        let book = db.get(id).unwrap().unwrap();
        assert_eq!(book.title, "Homage to Catalonia");
        assert_eq!(book.author, "George Orwell");
        assert_eq!(book.year, 1938);
        assert_eq!(book.count, 4);
    }

    #[test]
    fn test_get_missing_returns_none() {
        let db = Database::open_in_memory().unwrap();
        assert!(db.get(BookId::new(99)).unwrap().is_none());
    }

    #[test]
    fn test_list_all_in_id_order() {
        let db = Database::open_in_memory().unwrap();
        db.insert_many(&[
            NewBook::new("B", "x"),
            NewBook::new("A", "y"),
            NewBook::new("C", "z"),
        ])
        .unwrap();

        let titles: Vec<_> = db
            .list_all()
            .unwrap()
            .into_iter()
            .map(|b| b.title)
            .collect();
        assert_eq!(titles, ["B", "A", "C"]);
        assert_eq!(db.count().unwrap(), 3);
    }

    #[test]
    fn test_update_persists_count() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert(&NewBook::new("1984", "George Orwell")).unwrap();

        let mut book = db.get(id).unwrap().unwrap();
        book.count = 17;
        db.update(&book).unwrap();

        assert_eq!(db.get(id).unwrap().unwrap().count, 17);
    }

    #[test]
    fn test_update_missing_is_not_found() {
        let db = Database::open_in_memory().unwrap();
        let id = db.insert(&NewBook::new("1984", "George Orwell")).unwrap();
        let mut book = db.get(id).unwrap().unwrap();
        book.id = BookId::new(500);

        let err = db.update(&book).unwrap_err();
        assert!(matches!(err, Error::NotFound { entity: "book", .. }));
    }

    #[test]
    fn test_catalog_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();
        let db_path = temp_dir.path().join("books.db");

        {
            let db = Database::open(&db_path).unwrap();
            db.insert(&NewBook::new("Animal Farm", "George Orwell").with_count(3))
                .unwrap();
        }

        let db = Database::open(&db_path).unwrap();
        let books = db.list_all().unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].count, 3);

        let migrations: i64 = db
            .conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert_eq!(migrations, 1);
    }
}
