//! Core data models for livraria
//!
//! The catalog is a single flat entity set: books.

pub mod book;

pub use book::{validate_price, Book, BookId, BookValidationError, NewBook};
