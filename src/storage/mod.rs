//! Storage layer for livraria
//!
//! Owns the single SQLite connection used for the whole process and makes
//! sure the `livros` table exists before anything reads or writes it.
//!
//! Writes outside [`Storage::with_transaction`] run in autocommit mode, so
//! every mutating statement is committed before it returns.

pub mod books;

pub use books::BookRepository;

use std::path::Path;
use std::time::Instant;

use log::{error, info};
use rusqlite::Connection;

use crate::config::paths::LivrariaPaths;
use crate::error::LivrariaResult;

const CREATE_BOOKS_TABLE_SQL: &str = "CREATE TABLE IF NOT EXISTS livros (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    titulo TEXT NOT NULL,
    autor TEXT NOT NULL,
    ano_publicacao INTEGER NOT NULL,
    preco REAL NOT NULL
)";

/// Main storage coordinator
pub struct Storage {
    conn: Connection,
}

impl Storage {
    /// Open the catalog database under `paths`, creating directories first
    pub fn new(paths: &LivrariaPaths) -> LivrariaResult<Self> {
        paths.ensure_directories()?;
        Self::open(paths.database_file())
    }

    /// Open (or create) a catalog database file
    pub fn open(path: impl AsRef<Path>) -> LivrariaResult<Self> {
        let path = path.as_ref();
        let started_at = Instant::now();
        info!("event=db_open module=storage status=start mode=file");

        let result = Connection::open(path)
            .map_err(Into::into)
            .and_then(Self::bootstrap);

        match &result {
            Ok(_) => info!(
                "event=db_open module=storage status=ok mode=file path={} duration_ms={}",
                path.display(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=db_open module=storage status=error mode=file path={} duration_ms={} error={}",
                path.display(),
                started_at.elapsed().as_millis(),
                err
            ),
        }

        result
    }

    /// Open an in-memory catalog (useful for testing)
    pub fn open_in_memory() -> LivrariaResult<Self> {
        Self::bootstrap(Connection::open_in_memory()?)
    }

    fn bootstrap(conn: Connection) -> LivrariaResult<Self> {
        conn.execute_batch(CREATE_BOOKS_TABLE_SQL)?;
        Ok(Self { conn })
    }

    /// Repository over the shared connection
    pub fn books(&self) -> BookRepository<'_> {
        BookRepository::new(&self.conn)
    }

    /// Run `f` inside one transaction
    ///
    /// Commits when `f` returns `Ok`; any error rolls back every statement
    /// `f` executed.
    pub fn with_transaction<T, F>(&self, f: F) -> LivrariaResult<T>
    where
        F: FnOnce(&BookRepository<'_>) -> LivrariaResult<T>,
    {
        let tx = self.conn.unchecked_transaction()?;
        let value = f(&BookRepository::new(&tx))?;
        tx.commit()?;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LivrariaError;
    use crate::models::NewBook;
    use tempfile::TempDir;

    #[test]
    fn test_storage_creation() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();

        assert!(paths.database_file().exists());
        assert!(paths.backup_dir().exists());
        assert!(paths.exports_dir().exists());
        assert_eq!(storage.books().count().unwrap(), 0);
    }

    #[test]
    fn test_reopen_keeps_data() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());

        {
            let storage = Storage::new(&paths).unwrap();
            storage
                .books()
                .insert(&NewBook::new("O Hobbit", "J.R.R. Tolkien", 1937, 39.9))
                .unwrap();
        }

        let storage = Storage::new(&paths).unwrap();
        assert_eq!(storage.books().count().unwrap(), 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let storage = Storage::open_in_memory().unwrap();

        let result: LivrariaResult<()> = storage.with_transaction(|books| {
            books.insert(&NewBook::new("A", "B", 2000, 1.0))?;
            Err(LivrariaError::Import("boom".into()))
        });

        assert!(result.is_err());
        assert_eq!(storage.books().count().unwrap(), 0);
    }

    #[test]
    fn test_transaction_commits_on_success() {
        let storage = Storage::open_in_memory().unwrap();

        let id = storage
            .with_transaction(|books| books.insert(&NewBook::new("A", "B", 2000, 1.0)))
            .unwrap();

        assert!(storage.books().exists(id).unwrap());
    }
}
