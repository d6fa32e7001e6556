//! Service layer for livraria
//!
//! The service layer provides business logic on top of the storage layer:
//! input validation, not-found reporting, and the all-or-nothing CSV import.

pub mod book;
pub mod import;

pub use book::BookService;
pub use import::{ImportPreview, ImportResult, ImportService, ParsedBook};
