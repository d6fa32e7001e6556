//! Backup display formatting

use chrono::Local;

use crate::backup::{BackupInfo, PruneReport};

/// Format the snapshot list, newest first
pub fn format_backup_list(backups: &[BackupInfo], verbose: bool) -> String {
    if backups.is_empty() {
        return "No backups found.".to_string();
    }

    let now = Local::now();
    let mut output = String::new();

    for (i, backup) in backups.iter().enumerate() {
        let age = format_duration(now.signed_duration_since(backup.modified));
        if verbose {
            output.push_str(&format!(
                "{}. {}\n   Taken:    {}\n   Modified: {}\n   Size:     {}\n   Age:      {}\n",
                i + 1,
                backup.filename,
                backup.taken_at.format("%Y-%m-%d %H:%M:%S"),
                backup.modified.format("%Y-%m-%d %H:%M:%S"),
                format_size(backup.size_bytes),
                age,
            ));
        } else {
            output.push_str(&format!(
                "  {}. {} ({} ago, {})\n",
                i + 1,
                backup.filename,
                age,
                format_size(backup.size_bytes),
            ));
        }
    }

    output.push_str(&format!("Total: {} backup(s)", backups.len()));
    output
}

/// Summarize a retention pass, including each deletion that failed
pub fn format_prune_report(report: &PruneReport) -> String {
    let mut output = format!("Deleted {} old backup(s).", report.deleted.len());
    for (path, reason) in &report.failed {
        output.push_str(&format!(
            "\nFailed to delete {}: {}",
            path.display(),
            reason
        ));
    }
    output
}

/// Format a duration in human-readable form
pub fn format_duration(duration: chrono::Duration) -> String {
    let total_seconds = duration.num_seconds().max(0);

    if total_seconds < 60 {
        return format!("{}s", total_seconds);
    }

    let minutes = total_seconds / 60;
    if minutes < 60 {
        return format!("{}m", minutes);
    }

    let hours = minutes / 60;
    if hours < 24 {
        return format!("{}h", hours);
    }

    format!("{}d", hours / 24)
}

/// Format a file size in human-readable form
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.1} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
