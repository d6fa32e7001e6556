//! CSV Export functionality
//!
//! Writes the whole catalog as UTF-8 CSV, one row per book, in the column
//! order of the `livros` table. The importer reads this layout back.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use log::{error, info};

use crate::error::{LivrariaError, LivrariaResult};
use crate::storage::Storage;

/// Header row of every exported file
pub const CSV_HEADER: [&str; 5] = ["id", "titulo", "autor", "ano_publicacao", "preco"];

/// Export all books to CSV, returning how many rows were written
pub fn export_books_csv<W: Write>(storage: &Storage, writer: W) -> LivrariaResult<usize> {
    let books = storage.books().get_all()?;

    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer
        .write_record(CSV_HEADER)
        .map_err(|e| LivrariaError::Export(e.to_string()))?;

    for book in &books {
        csv_writer
            .serialize(book)
            .map_err(|e| LivrariaError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| LivrariaError::Export(e.to_string()))?;

    Ok(books.len())
}

/// Export all books to a file, replacing anything already there
pub fn export_books_to_file(storage: &Storage, output: &Path) -> LivrariaResult<usize> {
    let result = File::create(output)
        .map_err(|e| {
            LivrariaError::Export(format!(
                "Failed to create file {}: {}",
                output.display(),
                e
            ))
        })
        .and_then(|file| export_books_csv(storage, BufWriter::new(file)));

    match &result {
        Ok(count) => info!(
            "event=csv_export module=export status=ok path={} rows={}",
            output.display(),
            count
        ),
        Err(err) => error!(
            "event=csv_export module=export status=error path={} error={}",
            output.display(),
            err
        ),
    }

    result
}
