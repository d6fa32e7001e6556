//! CLI command handler for CSV import
//!
//! Imports books with their ids from a CSV file. `--dry-run` only checks the
//! file against the catalog and reports the ids that would collide.

use std::path::Path;

use crate::config::{LivrariaPaths, Settings};
use crate::error::LivrariaResult;
use crate::services::{ImportPreview, ImportService};
use crate::storage::Storage;

/// Handle the import command
pub fn handle_import_command(
    storage: &Storage,
    paths: &LivrariaPaths,
    settings: &Settings,
    file: &Path,
    dry_run: bool,
) -> LivrariaResult<()> {
    let service = ImportService::new(storage);

    if dry_run {
        let preview = service.preview_file(file)?;
        print_preview(file, &preview);
        return Ok(());
    }

    let result = service.import_file(file)?;
    println!("Dados importados com sucesso!");
    println!("{} livro(s) importado(s).", result.imported);
    super::auto_backup(paths, settings);
    Ok(())
}

fn print_preview(file: &Path, preview: &ImportPreview) {
    println!("Import Preview for '{}'", file.display());
    println!("{}", "=".repeat(40));
    println!("  Rows:                {}", preview.total);
    println!("  Existing IDs:        {}", join_ids(&preview.existing_ids));
    println!("  Repeated in file:    {}", join_ids(&preview.repeated_ids));
    println!();

    if preview.is_clean() {
        println!("Run without --dry-run to import.");
    } else {
        println!("Import would fail: resolve the conflicting IDs first.");
    }
}

fn join_ids(ids: &[i64]) -> String {
    if ids.is_empty() {
        return "-".to_string();
    }
    ids.iter()
        .map(|id| id.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::BookService;
    use tempfile::TempDir;

    const SAMPLE: &str = "id,titulo,autor,ano_publicacao,preco\n\
                          3,Dom Casmurro,Machado de Assis,1899,25.0\n";

    #[test]
    fn test_dry_run_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();
        let file = temp_dir.path().join("livros.csv");
        std::fs::write(&file, SAMPLE).unwrap();

        handle_import_command(&storage, &paths, &Settings::default(), &file, true).unwrap();

        assert_eq!(BookService::new(&storage).count().unwrap(), 0);
        assert_eq!(std::fs::read_dir(paths.backup_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_import_triggers_backup() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(&paths).unwrap();
        let file = temp_dir.path().join("livros.csv");
        std::fs::write(&file, SAMPLE).unwrap();

        handle_import_command(&storage, &paths, &Settings::default(), &file, false).unwrap();

        let book = BookService::new(&storage).get(3).unwrap().unwrap();
        assert_eq!(book.title, "Dom Casmurro");
        assert_eq!(std::fs::read_dir(paths.backup_dir()).unwrap().count(), 1);
    }

    #[test]
    fn test_join_ids() {
        assert_eq!(join_ids(&[]), "-");
        assert_eq!(join_ids(&[1, 4]), "1, 4");
    }
}
