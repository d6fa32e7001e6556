//! Book service
//!
//! Record operations on the catalog: add, list, update price, remove, and
//! lookup by author. Each mutating operation validates its input, runs one
//! statement, and is committed when it returns.

use log::info;

use crate::error::{LivrariaError, LivrariaResult};
use crate::models::{validate_price, Book, BookId, NewBook};
use crate::storage::Storage;

/// Service for book management
pub struct BookService<'a> {
    storage: &'a Storage,
}

impl<'a> BookService<'a> {
    /// Create a new book service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Add a new book to the catalog
    pub fn add(&self, book: NewBook) -> LivrariaResult<Book> {
        let book = NewBook {
            title: book.title.trim().to_string(),
            author: book.author.trim().to_string(),
            ..book
        };

        book.validate()
            .map_err(|e| LivrariaError::Validation(e.to_string()))?;

        let id = self.storage.books().insert(&book)?;
        info!("event=book_add module=services status=ok id={}", id);

        Ok(book.with_id(id))
    }

    /// Get a book by ID
    pub fn get(&self, id: BookId) -> LivrariaResult<Option<Book>> {
        self.storage.books().get(id)
    }

    /// List every book in the catalog
    pub fn list(&self) -> LivrariaResult<Vec<Book>> {
        self.storage.books().get_all()
    }

    /// Books by an author (exact match)
    pub fn find_by_author(&self, author: &str) -> LivrariaResult<Vec<Book>> {
        self.storage.books().find_by_author(author.trim())
    }

    /// Change the price of a book
    ///
    /// Returns the updated record, or `NotFound` if the ID doesn't exist.
    pub fn update_price(&self, id: BookId, price: f64) -> LivrariaResult<Book> {
        validate_price(price).map_err(|e| LivrariaError::Validation(e.to_string()))?;

        let books = self.storage.books();
        if !books.update_price(id, price)? {
            info!(
                "event=book_update_price module=services status=not_found id={}",
                id
            );
            return Err(LivrariaError::book_not_found(id));
        }

        info!("event=book_update_price module=services status=ok id={}", id);
        books
            .get(id)?
            .ok_or_else(|| LivrariaError::book_not_found(id))
    }

    /// Remove a book from the catalog
    ///
    /// Returns the removed record, or `NotFound` if the ID doesn't exist.
    pub fn remove(&self, id: BookId) -> LivrariaResult<Book> {
        let books = self.storage.books();
        let book = books.get(id)?.ok_or_else(|| {
            info!("event=book_remove module=services status=not_found id={}", id);
            LivrariaError::book_not_found(id)
        })?;

        books.delete(id)?;
        info!("event=book_remove module=services status=ok id={}", id);

        Ok(book)
    }

    /// Number of books in the catalog
    pub fn count(&self) -> LivrariaResult<usize> {
        self.storage.books().count()
    }
}
