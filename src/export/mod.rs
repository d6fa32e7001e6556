//! Export module for livraria
//!
//! CSV is the only export format; the importer reads the same layout back.

pub mod csv;

pub use self::csv::{export_books_csv, export_books_to_file, CSV_HEADER};
