//! CSV Import service
//!
//! Reads books from the CSV layout produced by the exporter and inserts them
//! with their original identifiers. Columns are matched by position: the
//! first row is skipped as a header whatever its contents.
//!
//! An import is all-or-nothing. Rows are parsed up front, then inserted in a
//! single transaction; a malformed row or an identifier that is already taken
//! leaves the catalog untouched.

use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use log::{error, info};

use crate::error::{LivrariaError, LivrariaResult};
use crate::models::{Book, BookId};
use crate::storage::Storage;

/// Number of columns every row must have
pub const EXPECTED_COLUMNS: usize = 5;

/// A parsed row from the CSV before import
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBook {
    /// The book exactly as written in the file
    pub book: Book,
    /// Data row number in the CSV (1-based, header excluded)
    pub row_number: usize,
}

/// Result of checking parsed rows against the catalog without writing
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImportPreview {
    /// Number of rows that would be inserted
    pub total: usize,
    /// IDs already present in the catalog
    pub existing_ids: Vec<BookId>,
    /// IDs that appear more than once in the file
    pub repeated_ids: Vec<BookId>,
}

impl ImportPreview {
    /// Whether an import of these rows would succeed
    pub fn is_clean(&self) -> bool {
        self.existing_ids.is_empty() && self.repeated_ids.is_empty()
    }
}

/// Result of a completed import
#[derive(Debug, Clone, PartialEq)]
pub struct ImportResult {
    /// Number of books imported
    pub imported: usize,
    /// IDs of imported books, in file order
    pub imported_ids: Vec<BookId>,
}

/// Service for CSV import
pub struct ImportService<'a> {
    storage: &'a Storage,
}

impl<'a> ImportService<'a> {
    /// Create a new import service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Parse CSV data into books
    ///
    /// Fails on the first row with the wrong column count or a value that
    /// doesn't fit its column type.
    pub fn parse_csv<R: Read>(&self, reader: R) -> LivrariaResult<Vec<ParsedBook>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let mut parsed = Vec::new();
        let mut record = StringRecord::new();
        let mut row_number = 0;

        loop {
            row_number += 1;
            let has_record = reader
                .read_record(&mut record)
                .map_err(|e| LivrariaError::Import(format!("Row {}: {}", row_number, e)))?;
            if !has_record {
                break;
            }

            if record.len() != EXPECTED_COLUMNS {
                return Err(LivrariaError::Import(format!(
                    "Row {}: expected {} columns, found {}",
                    row_number,
                    EXPECTED_COLUMNS,
                    record.len()
                )));
            }

            let book: Book = record
                .deserialize(None)
                .map_err(|e| LivrariaError::Import(format!("Row {}: {}", row_number, e)))?;

            parsed.push(ParsedBook { book, row_number });
        }

        Ok(parsed)
    }

    /// Check which rows would collide, without writing anything
    pub fn preview(&self, rows: &[ParsedBook]) -> LivrariaResult<ImportPreview> {
        let books = self.storage.books();
        let mut seen = HashSet::new();
        let mut preview = ImportPreview {
            total: rows.len(),
            ..ImportPreview::default()
        };

        for row in rows {
            let id = row.book.id;
            if !seen.insert(id) && !preview.repeated_ids.contains(&id) {
                preview.repeated_ids.push(id);
            }
            if books.exists(id)? && !preview.existing_ids.contains(&id) {
                preview.existing_ids.push(id);
            }
        }

        Ok(preview)
    }

    /// Insert parsed rows in one transaction
    pub fn import_rows(&self, rows: &[ParsedBook]) -> LivrariaResult<ImportResult> {
        self.storage.with_transaction(|books| {
            let mut imported_ids = Vec::with_capacity(rows.len());
            for row in rows {
                books.insert_with_id(&row.book).map_err(|e| {
                    LivrariaError::Import(format!(
                        "Row {} (id {}): {}",
                        row.row_number, row.book.id, e
                    ))
                })?;
                imported_ids.push(row.book.id);
            }
            Ok(ImportResult {
                imported: imported_ids.len(),
                imported_ids,
            })
        })
    }

    /// Parse and import a CSV file
    pub fn import_file(&self, path: &Path) -> LivrariaResult<ImportResult> {
        let result = self.open(path).and_then(|file| {
            let rows = self.parse_csv(BufReader::new(file))?;
            self.import_rows(&rows)
        });

        match &result {
            Ok(done) => info!(
                "event=csv_import module=services status=ok path={} rows={}",
                path.display(),
                done.imported
            ),
            Err(err) => error!(
                "event=csv_import module=services status=error path={} error={}",
                path.display(),
                err
            ),
        }

        result
    }

    /// Parse a CSV file and preview it against the catalog
    pub fn preview_file(&self, path: &Path) -> LivrariaResult<ImportPreview> {
        let file = self.open(path)?;
        let rows = self.parse_csv(BufReader::new(file))?;
        self.preview(&rows)
    }

    fn open(&self, path: &Path) -> LivrariaResult<File> {
        if !path.exists() {
            return Err(LivrariaError::Import(format!(
                "File not found: {}",
                path.display()
            )));
        }
        File::open(path).map_err(|e| {
            LivrariaError::Import(format!("Failed to open {}: {}", path.display(), e))
        })
    }
}
