//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod backup;
pub mod book;
pub mod export;
pub mod import;

pub use backup::{handle_backup_command, BackupCommands};
pub use book::{handle_book_command, BookCommands};
pub use export::handle_export_command;
pub use import::handle_import_command;

use crate::backup::BackupManager;
use crate::config::{LivrariaPaths, Settings};
use crate::display::format_prune_report;

/// Take a snapshot after a committed change, when enabled in settings
///
/// Failures are printed as warnings; the change itself already stands.
pub(crate) fn auto_backup(paths: &LivrariaPaths, settings: &Settings) {
    if !settings.auto_backup {
        return;
    }

    let manager = BackupManager::new(paths, settings.backup_retention);
    match manager.create_backup_with_retention() {
        Ok((path, report)) => {
            println!("Backup realizado em {}", path.display());
            if !report.is_clean() {
                eprintln!("{}", format_prune_report(&report));
            }
        }
        Err(e) => eprintln!("Warning: automatic backup failed: {}", e),
    }
}
