//! Backup CLI commands
//!
//! Implements CLI commands for database snapshot management.

use clap::Subcommand;
use std::path::PathBuf;

use crate::backup::BackupManager;
use crate::config::{LivrariaPaths, Settings};
use crate::display::backup::format_size;
use crate::display::{format_backup_list, format_prune_report};
use crate::error::{LivrariaError, LivrariaResult};

/// Backup subcommands
#[derive(Subcommand)]
pub enum BackupCommands {
    /// Create a new backup and apply the retention policy
    Create,

    /// List all available backups, newest first
    List {
        /// Show detailed information
        #[arg(short, long)]
        verbose: bool,
    },

    /// Show information about a specific backup
    Info {
        /// Backup filename or path (use 'latest' for most recent)
        backup: String,
    },

    /// Delete backups beyond the retention count
    Prune {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },
}

/// Handle a backup command
pub fn handle_backup_command(
    paths: &LivrariaPaths,
    settings: &Settings,
    cmd: BackupCommands,
) -> LivrariaResult<()> {
    let manager = BackupManager::new(paths, settings.backup_retention);

    match cmd {
        BackupCommands::Create => {
            let (backup_path, report) = manager.create_backup_with_retention()?;
            println!("Backup realizado em {}", backup_path.display());
            if !report.deleted.is_empty() || !report.is_clean() {
                println!("{}", format_prune_report(&report));
            }
        }

        BackupCommands::List { verbose } => {
            let backups = manager.list_backups()?;
            println!("{}", format_backup_list(&backups, verbose));
            if backups.is_empty() {
                println!("Create one with: livraria backup create");
            }
        }

        BackupCommands::Info { backup } => {
            let backup_path = resolve_backup_path(&manager, paths, &backup)?;
            let metadata = std::fs::metadata(&backup_path)?;

            println!("Backup Details");
            println!("==============");
            println!("File: {}", backup_path.display());
            println!("Size: {}", format_size(metadata.len()));
            if let Some(info) = manager
                .list_backups()?
                .into_iter()
                .find(|b| b.path == backup_path)
            {
                println!("Taken: {}", info.taken_at.format("%Y-%m-%d %H:%M:%S"));
                println!("Modified: {}", info.modified.format("%Y-%m-%d %H:%M:%S"));
            }
        }

        BackupCommands::Prune { force } => {
            let backups = manager.list_backups()?;
            let to_delete = backups.len().saturating_sub(manager.retention());

            if to_delete == 0 {
                println!("No backups to prune.");
                println!(
                    "Retention policy keeps {} backup(s); you have {}.",
                    manager.retention(),
                    backups.len()
                );
                return Ok(());
            }

            println!("Prune Summary");
            println!("=============");
            println!("Retention policy: {} backup(s)", manager.retention());
            println!("Current backups:  {}", backups.len());
            println!("To be deleted:    {}", to_delete);
            println!();

            if !force {
                println!("To delete old backups, run again with --force flag:");
                println!("  livraria backup prune --force");
                return Ok(());
            }

            let report = manager.prune_old_snapshots()?;
            println!("{}", format_prune_report(&report));
        }
    }

    Ok(())
}

/// Resolve a backup identifier to a full path
fn resolve_backup_path(
    manager: &BackupManager,
    paths: &LivrariaPaths,
    backup: &str,
) -> LivrariaResult<PathBuf> {
    if backup.eq_ignore_ascii_case("latest") {
        return manager
            .get_latest_backup()?
            .map(|b| b.path)
            .ok_or_else(|| LivrariaError::backup_not_found("latest"));
    }

    let path = PathBuf::from(backup);
    if path.exists() {
        return Ok(path);
    }

    let backup_path = paths.backup_dir().join(backup);
    if backup_path.exists() {
        return Ok(backup_path);
    }

    let with_ext = paths.backup_dir().join(format!("{}.db", backup));
    if with_ext.exists() {
        return Ok(with_ext);
    }

    Err(LivrariaError::backup_not_found(backup))
}
