use std::fs;

use livraria::backup::BackupManager;
use livraria::config::LivrariaPaths;
use livraria::export::{export_books_csv, export_books_to_file};
use livraria::models::NewBook;
use livraria::services::{BookService, ImportService};
use livraria::storage::Storage;
use tempfile::TempDir;

fn catalog() -> (Storage, LivrariaPaths, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());
    let storage = Storage::new(&paths).unwrap();
    (storage, paths, temp_dir)
}

#[test]
fn hobbit_lifecycle() {
    let (storage, paths, _temp) = catalog();
    let service = BookService::new(&storage);

    let book = service
        .add(NewBook::new("O Hobbit", "J.R.R. Tolkien", 1937, 39.90))
        .unwrap();
    assert_eq!(book.id, 1);

    let updated = service.update_price(1, 45.0).unwrap();
    assert_eq!(updated.price, 45.0);

    let found = service.find_by_author("J.R.R. Tolkien").unwrap();
    assert_eq!(found.len(), 1);

    export_books_to_file(&storage, &paths.export_file()).unwrap();
    assert_eq!(
        fs::read_to_string(paths.export_file()).unwrap(),
        "id,titulo,autor,ano_publicacao,preco\n1,O Hobbit,J.R.R. Tolkien,1937,45.0\n"
    );

    service.remove(1).unwrap();
    assert!(service.list().unwrap().is_empty());
    assert!(service.remove(1).unwrap_err().is_not_found());
}

#[test]
fn export_then_import_into_fresh_catalog() {
    let (source, _paths, _temp) = catalog();
    let service = BookService::new(&source);
    service
        .add(NewBook::new("O Hobbit", "J.R.R. Tolkien", 1937, 39.90))
        .unwrap();
    service
        .add(NewBook::new("Dom Casmurro", "Machado de Assis", 1899, 25.0))
        .unwrap();
    service
        .add(NewBook::new("Memórias, Póstumas", "Machado de Assis", 1881, 32.5))
        .unwrap();
    service.remove(2).unwrap();

    let mut buffer = Vec::new();
    export_books_csv(&source, &mut buffer).unwrap();

    let (target, _target_paths, _target_temp) = catalog();
    let importer = ImportService::new(&target);
    let rows = importer.parse_csv(buffer.as_slice()).unwrap();
    let result = importer.import_rows(&rows).unwrap();

    assert_eq!(result.imported, 2);
    assert_eq!(result.imported_ids, vec![1, 3]);
    assert_eq!(
        BookService::new(&target).list().unwrap(),
        BookService::new(&source).list().unwrap()
    );
}

#[test]
fn failed_import_leaves_catalog_untouched() {
    let (storage, _paths, temp) = catalog();
    BookService::new(&storage)
        .add(NewBook::new("O Hobbit", "J.R.R. Tolkien", 1937, 39.90))
        .unwrap();

    let file = temp.path().join("conflito.csv");
    fs::write(
        &file,
        "id,titulo,autor,ano_publicacao,preco\n\
         5,Dom Casmurro,Machado de Assis,1899,25.0\n\
         1,Outro Livro,Alguém,2000,10.0\n",
    )
    .unwrap();

    let err = ImportService::new(&storage).import_file(&file).unwrap_err();
    assert!(err.to_string().contains("Row 2"));

    let books = BookService::new(&storage).list().unwrap();
    assert_eq!(books.len(), 1);
    assert_eq!(books[0].title, "O Hobbit");
}

#[test]
fn six_backups_leave_five() {
    let (storage, paths, _temp) = catalog();
    BookService::new(&storage)
        .add(NewBook::new("O Hobbit", "J.R.R. Tolkien", 1937, 39.90))
        .unwrap();

    let manager = BackupManager::new(&paths, 5);
    let mut created = Vec::new();
    for _ in 0..6 {
        let (path, report) = manager.create_backup_with_retention().unwrap();
        assert!(report.is_clean());
        created.push(path);
    }

    let remaining = manager.list_backups().unwrap();
    assert_eq!(remaining.len(), 5);
    assert!(!created[0].exists());
    for path in &created[1..] {
        assert!(path.exists());
    }
}
