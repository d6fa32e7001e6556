//! Backup manager for livraria
//!
//! Snapshots are byte copies of the catalog database named
//! `backup_livraria_<YYYY-MM-DD_HH-MM-SS>.db` after the local time they were
//! taken. Later snapshots from the same second get a `_<n>` suffix one past
//! the highest suffix already present for that second, so nothing is
//! overwritten and a name is never reused after pruning.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime};
use log::{error, info, warn};

use crate::config::paths::LivrariaPaths;
use crate::error::{LivrariaError, LivrariaResult};

/// Filename prefix shared by every snapshot
pub const BACKUP_PREFIX: &str = "backup_livraria_";

/// Filename extension of every snapshot
pub const BACKUP_EXTENSION: &str = "db";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d_%H-%M-%S";
const TIMESTAMP_LEN: usize = 19;

/// Metadata about a backup
#[derive(Debug, Clone)]
pub struct BackupInfo {
    /// Backup filename
    pub filename: String,
    /// Full path to backup
    pub path: PathBuf,
    /// Local time encoded in the filename
    pub taken_at: NaiveDateTime,
    /// Same-second disambiguation number (1 when there is no suffix)
    pub sequence: u32,
    /// Filesystem modification time
    pub modified: DateTime<Local>,
    /// Size in bytes
    pub size_bytes: u64,
}

/// Outcome of a retention pass
#[derive(Debug, Clone, Default)]
pub struct PruneReport {
    /// Snapshots that were deleted
    pub deleted: Vec<PathBuf>,
    /// Snapshots that could not be deleted, with the reason
    pub failed: Vec<(PathBuf, String)>,
}

impl PruneReport {
    /// True when every deletion that was attempted succeeded
    pub fn is_clean(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Manages backup creation and retention
pub struct BackupManager {
    /// Path to backup directory
    backup_dir: PathBuf,
    /// Database file being snapshotted
    database_file: PathBuf,
    /// Number of snapshots to keep
    retention: usize,
}

impl BackupManager {
    /// Create a new BackupManager
    pub fn new(paths: &LivrariaPaths, retention: usize) -> Self {
        Self {
            backup_dir: paths.backup_dir(),
            database_file: paths.database_file(),
            retention,
        }
    }

    /// Copy the database file into the backup directory
    ///
    /// Returns the path to the created backup file. Does not prune.
    pub fn create_backup(&self) -> LivrariaResult<PathBuf> {
        if !self.database_file.exists() {
            error!(
                "event=backup_create module=backup status=error error_code=db_missing path={}",
                self.database_file.display()
            );
            return Err(LivrariaError::Backup(format!(
                "Database file not found: {}",
                self.database_file.display()
            )));
        }

        fs::create_dir_all(&self.backup_dir).map_err(|e| {
            LivrariaError::Backup(format!("Failed to create backup directory: {}", e))
        })?;

        let stamp = Local::now().format(TIMESTAMP_FORMAT).to_string();
        let backup_path = self.next_free_path(&stamp)?;

        fs::copy(&self.database_file, &backup_path).map_err(|e| {
            error!(
                "event=backup_create module=backup status=error path={} error={}",
                backup_path.display(),
                e
            );
            LivrariaError::Backup(format!(
                "Failed to copy database to {}: {}",
                backup_path.display(),
                e
            ))
        })?;

        info!(
            "event=backup_create module=backup status=ok path={}",
            backup_path.display()
        );

        Ok(backup_path)
    }

    /// Snapshot path for this timestamp, numbered after every existing one
    ///
    /// The sequence only grows within a second, even after pruning removed
    /// the lower-numbered snapshots, so name order follows creation order.
    fn next_free_path(&self, stamp: &str) -> LivrariaResult<PathBuf> {
        let prefix = format!("{}{}", BACKUP_PREFIX, stamp);

        let highest = fs::read_dir(&self.backup_dir)
            .map_err(|e| LivrariaError::Backup(format!("Failed to read backup directory: {}", e)))?
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
            .filter(|name| name.starts_with(&prefix))
            .filter_map(|name| parse_backup_filename(&name).map(|(_, sequence)| sequence))
            .max();

        let filename = match highest {
            None => format!("{}.{}", prefix, BACKUP_EXTENSION),
            Some(sequence) => format!("{}_{}.{}", prefix, sequence + 1, BACKUP_EXTENSION),
        };
        Ok(self.backup_dir.join(filename))
    }

    /// List all snapshots, newest first
    ///
    /// Ordered by modification time, then by the timestamp and sequence in
    /// the filename. Files that don't follow the snapshot naming are ignored.
    pub fn list_backups(&self) -> LivrariaResult<Vec<BackupInfo>> {
        if !self.backup_dir.exists() {
            return Ok(Vec::new());
        }

        let mut backups = Vec::new();

        for entry in fs::read_dir(&self.backup_dir).map_err(|e| {
            LivrariaError::Io(format!("Failed to read backup directory: {}", e))
        })? {
            let entry = entry.map_err(|e| {
                LivrariaError::Io(format!("Failed to read directory entry: {}", e))
            })?;

            if let Some(info) = parse_backup_info(&entry.path()) {
                backups.push(info);
            }
        }

        backups.sort_by(|a, b| {
            b.modified
                .cmp(&a.modified)
                .then_with(|| b.taken_at.cmp(&a.taken_at))
                .then_with(|| b.sequence.cmp(&a.sequence))
        });

        Ok(backups)
    }

    /// Delete every snapshot beyond the newest `retention`
    ///
    /// A failed deletion is recorded in the report and the remaining
    /// deletions still run.
    pub fn prune_old_snapshots(&self) -> LivrariaResult<PruneReport> {
        self.prune_with(|path| fs::remove_file(path))
    }

    fn prune_with<F>(&self, mut remove: F) -> LivrariaResult<PruneReport>
    where
        F: FnMut(&Path) -> std::io::Result<()>,
    {
        let backups = self.list_backups()?;
        let mut report = PruneReport::default();

        for backup in backups.into_iter().skip(self.retention) {
            match remove(&backup.path) {
                Ok(()) => {
                    info!(
                        "event=backup_prune module=backup status=ok path={}",
                        backup.path.display()
                    );
                    report.deleted.push(backup.path);
                }
                Err(e) => {
                    warn!(
                        "event=backup_prune module=backup status=error path={} error={}",
                        backup.path.display(),
                        e
                    );
                    report.failed.push((backup.path, e.to_string()));
                }
            }
        }

        Ok(report)
    }

    /// Create a backup and then enforce the retention count
    ///
    /// Pruning only runs when the copy succeeded.
    pub fn create_backup_with_retention(&self) -> LivrariaResult<(PathBuf, PruneReport)> {
        let backup_path = self.create_backup()?;
        let report = self.prune_old_snapshots()?;
        Ok((backup_path, report))
    }

    /// Number of snapshots kept by pruning
    pub fn retention(&self) -> usize {
        self.retention
    }

    /// Get the most recent backup
    pub fn get_latest_backup(&self) -> LivrariaResult<Option<BackupInfo>> {
        let backups = self.list_backups()?;
        Ok(backups.into_iter().next())
    }
}

/// Build backup info for a path, if it is a snapshot file
fn parse_backup_info(path: &Path) -> Option<BackupInfo> {
    let filename = path.file_name()?.to_str()?.to_string();
    let (taken_at, sequence) = parse_backup_filename(&filename)?;

    let metadata = fs::metadata(path).ok()?;
    if !metadata.is_file() {
        return None;
    }
    let modified: DateTime<Local> = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH).into();

    Some(BackupInfo {
        filename,
        path: path.to_path_buf(),
        taken_at,
        sequence,
        modified,
        size_bytes: metadata.len(),
    })
}

/// Parse `backup_livraria_<timestamp>[_<n>].db` into its timestamp and sequence
fn parse_backup_filename(filename: &str) -> Option<(NaiveDateTime, u32)> {
    let stem = filename
        .strip_prefix(BACKUP_PREFIX)?
        .strip_suffix(BACKUP_EXTENSION)?
        .strip_suffix('.')?;

    if stem.len() < TIMESTAMP_LEN || !stem.is_char_boundary(TIMESTAMP_LEN) {
        return None;
    }
    let (stamp, rest) = stem.split_at(TIMESTAMP_LEN);
    let taken_at = NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()?;

    let sequence = if rest.is_empty() {
        1
    } else {
        rest.strip_prefix('_')?.parse().ok()?
    };

    Some((taken_at, sequence))
}
