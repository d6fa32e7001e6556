//! Book repository for SQLite storage
//!
//! Every method is a single parameterized statement against the `livros`
//! table. Outside a transaction SQLite commits each statement on its own.

use rusqlite::{params, Connection, OptionalExtension, Row};

use crate::error::LivrariaResult;
use crate::models::{Book, BookId, NewBook};

const BOOK_SELECT_SQL: &str = "SELECT id, titulo, autor, ano_publicacao, preco FROM livros";

/// Repository for book persistence
pub struct BookRepository<'a> {
    conn: &'a Connection,
}

impl<'a> BookRepository<'a> {
    /// Create a repository over an open connection (or transaction)
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Insert a new book and return the identifier storage assigned to it
    pub fn insert(&self, book: &NewBook) -> LivrariaResult<BookId> {
        self.conn.execute(
            "INSERT INTO livros (titulo, autor, ano_publicacao, preco) VALUES (?1, ?2, ?3, ?4)",
            params![book.title, book.author, book.year, book.price],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Insert a book keeping its explicit identifier
    ///
    /// Fails with a constraint error if the identifier is already taken.
    pub fn insert_with_id(&self, book: &Book) -> LivrariaResult<()> {
        self.conn.execute(
            "INSERT INTO livros (id, titulo, autor, ano_publicacao, preco) VALUES (?1, ?2, ?3, ?4, ?5)",
            params![book.id, book.title, book.author, book.year, book.price],
        )?;
        Ok(())
    }

    /// Get a book by ID
    pub fn get(&self, id: BookId) -> LivrariaResult<Option<Book>> {
        let book = self
            .conn
            .query_row(
                &format!("{BOOK_SELECT_SQL} WHERE id = ?1"),
                params![id],
                book_from_row,
            )
            .optional()?;
        Ok(book)
    }

    /// Check whether a book with this ID exists
    pub fn exists(&self, id: BookId) -> LivrariaResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM livros WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    /// Get all books, ordered by ID
    pub fn get_all(&self) -> LivrariaResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} ORDER BY id"))?;
        let books = stmt
            .query_map([], book_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }

    /// Get every book whose author matches exactly
    pub fn find_by_author(&self, author: &str) -> LivrariaResult<Vec<Book>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{BOOK_SELECT_SQL} WHERE autor = ?1 ORDER BY id"))?;
        let books = stmt
            .query_map(params![author], book_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(books)
    }

    /// Set a new price. Returns `false` when no row has this ID.
    pub fn update_price(&self, id: BookId, price: f64) -> LivrariaResult<bool> {
        let changed = self.conn.execute(
            "UPDATE livros SET preco = ?1 WHERE id = ?2",
            params![price, id],
        )?;
        Ok(changed > 0)
    }

    /// Delete a book. Returns `false` when no row has this ID.
    pub fn delete(&self, id: BookId) -> LivrariaResult<bool> {
        let changed = self
            .conn
            .execute("DELETE FROM livros WHERE id = ?1", params![id])?;
        Ok(changed > 0)
    }

    /// Number of books in the catalog
    pub fn count(&self) -> LivrariaResult<usize> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM livros", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn book_from_row(row: &Row<'_>) -> rusqlite::Result<Book> {
    Ok(Book {
        id: row.get(0)?,
        title: row.get(1)?,
        author: row.get(2)?,
        year: row.get(3)?,
        price: row.get(4)?,
    })
}
