//! CLI command for CSV export

use std::path::PathBuf;

use crate::config::LivrariaPaths;
use crate::error::LivrariaResult;
use crate::export::export_books_to_file;
use crate::storage::Storage;

/// Handle the export command
///
/// Writes to `output` when given, otherwise to the fixed export file under
/// the base directory. An existing file is overwritten.
pub fn handle_export_command(
    storage: &Storage,
    paths: &LivrariaPaths,
    output: Option<PathBuf>,
) -> LivrariaResult<()> {
    let output = output.unwrap_or_else(|| paths.export_file());
    let count = export_books_to_file(storage, &output)?;

    println!("Dados exportados para {}", output.display());
    println!("{} livro(s) exportado(s).", count);
    Ok(())
}
