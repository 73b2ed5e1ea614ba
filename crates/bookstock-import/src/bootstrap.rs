//! First-run population of the catalog: import, then seed if still empty.

use bookstock_core::model::NewBook;
use bookstock_core::seed::seed_if_empty;
use bookstock_core::CatalogStore;
use std::fmt;

use crate::error::ImportResult;
use crate::importer::CatalogImporter;

/// How the catalog ended up with books at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Populated {
    /// The catalog already had this many books; nothing was fetched.
    Existing(usize),
    /// This many books were imported from the remote source.
    Imported(usize),
    /// Import was skipped, failed, or came back empty; this many seed books
    /// were stored.
    Seeded(usize),
}

impl fmt::Display for Populated {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Existing(n) => write!(f, "Have data ({n} books)"),
            Self::Imported(n) => write!(f, "{n} books saved to database online"),
            Self::Seeded(n) => write!(f, "{n} books saved to database offline for testing"),
        }
    }
}

/// Make sure the catalog has books before the shell starts.
///
/// When the store is empty a single import attempt is made through
/// `importer` (skipped when `None`). A remote failure is logged, not
/// returned: the seed books are stored instead. Only store failures
/// surface as errors.
pub async fn populate<S, I>(
    store: &S,
    importer: Option<&I>,
    limit: usize,
) -> ImportResult<Populated>
where
    S: CatalogStore + ?Sized,
    I: CatalogImporter + ?Sized,
{
    if !store.is_empty()? {
        return Ok(Populated::Existing(store.count()?));
    }

    if let Some(importer) = importer {
        log::info!(
            "Importing up to {} books from {}",
            limit,
            importer.source_name()
        );
        match importer.fetch_candidates(limit).await {
            Ok(candidates) => {
                let books: Vec<NewBook> = candidates.into_iter().map(NewBook::from).collect();
                let imported = store.insert_many(&books)?;
                if imported > 0 {
                    log::info!("Imported {} books", imported);
                    return Ok(Populated::Imported(imported));
                }
                log::info!("{} offered no usable books", importer.source_name());
            }
            Err(e) if !e.is_remote() => return Err(e),
            Err(e) => {
                log::warn!("Import from {} failed: {}", importer.source_name(), e);
            }
        }
    }

    Ok(Populated::Seeded(seed_if_empty(store)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ImportError;
    use crate::importer::Candidate;
    use async_trait::async_trait;
    use bookstock_core::schema::Database;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Importer that replays a canned result and counts calls.
    #[derive(Debug, Default)]
    struct FakeImporter {
        candidates: Option<Vec<Candidate>>,
        calls: AtomicUsize,
    }

    impl FakeImporter {
        fn returning(candidates: Vec<Candidate>) -> Self {
            Self {
                candidates: Some(candidates),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self::default()
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl CatalogImporter for FakeImporter {
        fn source_name(&self) -> &str {
            "fake"
        }

        async fn fetch_candidates(&self, limit: usize) -> ImportResult<Vec<Candidate>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.candidates {
                Some(c) => Ok(c.iter().take(limit).cloned().collect()),
                None => Err(ImportError::Http {
                    source_name: "fake".to_string(),
                    status: 502,
                }),
            }
        }
    }

    /// Importer whose failure comes from the local side, not the source.
    #[derive(Debug)]
    struct LocalFailureImporter;

    #[async_trait]
    impl CatalogImporter for LocalFailureImporter {
        fn source_name(&self) -> &str {
            "local"
        }

        async fn fetch_candidates(&self, _limit: usize) -> ImportResult<Vec<Candidate>> {
            Err(ImportError::Database(bookstock_core::Error::NotFound {
                entity: "book",
                id: "1".to_string(),
            }))
        }
    }

    fn candidate(title: &str, author: &str, year: Option<i32>) -> Candidate {
        Candidate::from_parts(Some(title.to_string()), Some(author.to_string()), year).unwrap()
    }

    #[tokio::test]
    async fn test_failed_import_seeds_catalog() {
        let db = Database::open_in_memory().unwrap();
        let importer = FakeImporter::failing();

        let outcome = populate(&db, Some(&importer), 50).await.unwrap();
        assert_eq!(outcome, Populated::Seeded(2));
        assert_eq!(importer.calls(), 1);

        let books = db.list_all().unwrap();
        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["Animal Farm", "1984"]);
        assert_eq!(books[0].year, 1945);
        assert_eq!(books[1].year, 1948);
        assert!(books.iter().all(|b| b.count >= 999_999));
    }

    #[tokio::test]
    async fn test_successful_import_stores_single_copies() {
        let db = Database::open_in_memory().unwrap();
        let importer = FakeImporter::returning(vec![
            candidate("Dune", "Frank Herbert", Some(1965)),
            candidate("Undated", "A. Writer", None),
        ]);

        let outcome = populate(&db, Some(&importer), 50).await.unwrap();
        assert_eq!(outcome, Populated::Imported(2));

        let books = db.list_all().unwrap();
        assert_eq!(books.len(), 2);
        assert!(books.iter().all(|b| b.count == 1));
        assert_eq!(books[0].year, 1965);
        assert_eq!(books[1].year, 0);
    }

    #[tokio::test]
    async fn test_empty_import_seeds_catalog() {
        let db = Database::open_in_memory().unwrap();
        let importer = FakeImporter::returning(Vec::new());

        let outcome = populate(&db, Some(&importer), 50).await.unwrap();
        assert_eq!(outcome, Populated::Seeded(2));
    }

    #[tokio::test]
    async fn test_populated_store_skips_import() {
        let db = Database::open_in_memory().unwrap();
        db.insert(&NewBook::new("Existing", "Someone")).unwrap();
        let importer = FakeImporter::returning(vec![candidate("Dune", "Frank Herbert", None)]);

        let outcome = populate(&db, Some(&importer), 50).await.unwrap();
        assert_eq!(outcome, Populated::Existing(1));
        assert_eq!(importer.calls(), 0);
        assert_eq!(db.count().unwrap(), 1);
    }

    #[tokio::test]
    async fn test_offline_goes_straight_to_seed() {
        let db = Database::open_in_memory().unwrap();
        let outcome = populate::<_, FakeImporter>(&db, None, 50).await.unwrap();
        assert_eq!(outcome, Populated::Seeded(2));
    }

    #[tokio::test]
    async fn test_local_failure_is_returned_without_seeding() {
        let db = Database::open_in_memory().unwrap();
        let err = populate(&db, Some(&LocalFailureImporter), 50)
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::Database(_)));
        assert!(db.is_empty().unwrap());
    }

    #[test]
    fn test_outcome_messages() {
        assert_eq!(Populated::Existing(3).to_string(), "Have data (3 books)");
        assert!(Populated::Seeded(2).to_string().contains("offline"));
        assert!(Populated::Imported(9).to_string().contains("online"));
    }
}
