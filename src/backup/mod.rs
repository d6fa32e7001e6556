//! Backup system for livraria
//!
//! Snapshots the catalog database file into the backup directory and keeps
//! only the newest few.
//!
//! # Backup Format
//!
//! Each snapshot is a full byte copy of `data/livraria.db`, named
//! `backup_livraria_<YYYY-MM-DD_HH-MM-SS>.db`.
//!
//! # Retention Policy
//!
//! After every snapshot the manager keeps the 5 most recently modified
//! snapshots (configurable in settings) and deletes the rest.
//!
//! # Example
//!
//! ```rust,ignore
//! use livraria::backup::BackupManager;
//! use livraria::config::paths::LivrariaPaths;
//!
//! let paths = LivrariaPaths::new()?;
//! let manager = BackupManager::new(&paths, 5);
//!
//! let (backup_path, report) = manager.create_backup_with_retention()?;
//! println!("{} ({} pruned)", backup_path.display(), report.deleted.len());
//! ```

mod manager;

pub use manager::{BackupInfo, BackupManager, PruneReport, BACKUP_EXTENSION, BACKUP_PREFIX};
