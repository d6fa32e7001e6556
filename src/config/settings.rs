//! User settings for livraria
//!
//! Manages user preferences: backup retention, automatic backups after
//! changes, the currency symbol used when printing prices, and the log level.

use serde::{Deserialize, Serialize};

use super::paths::LivrariaPaths;
use crate::error::LivrariaError;

/// Number of snapshots kept when nothing else is configured
pub const DEFAULT_BACKUP_RETENTION: usize = 5;

/// User settings for livraria
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Schema version for migration support
    #[serde(default = "default_schema_version")]
    pub schema_version: u32,

    /// How many backup snapshots to keep
    #[serde(default = "default_backup_retention")]
    pub backup_retention: usize,

    /// Take a snapshot after every change to the catalog
    #[serde(default = "default_auto_backup")]
    pub auto_backup: bool,

    /// Currency symbol shown before prices
    #[serde(default = "default_currency")]
    pub currency_symbol: String,

    /// Log level passed to the file logger
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_schema_version() -> u32 {
    1
}

fn default_backup_retention() -> usize {
    DEFAULT_BACKUP_RETENTION
}

fn default_auto_backup() -> bool {
    true
}

fn default_currency() -> String {
    "R$".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: default_schema_version(),
            backup_retention: default_backup_retention(),
            auto_backup: default_auto_backup(),
            currency_symbol: default_currency(),
            log_level: default_log_level(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or use default settings if the file doesn't exist
    pub fn load_or_create(paths: &LivrariaPaths) -> Result<Self, LivrariaError> {
        let settings_path = paths.settings_file();

        if !settings_path.exists() {
            // Don't save yet - let caller decide when to persist
            return Ok(Settings::default());
        }

        let contents = std::fs::read_to_string(&settings_path)
            .map_err(|e| LivrariaError::Io(format!("Failed to read settings file: {}", e)))?;

        let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
            LivrariaError::Config(format!("Failed to parse settings file: {}", e))
        })?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject values the rest of the program cannot work with
    pub fn validate(&self) -> Result<(), LivrariaError> {
        if self.backup_retention == 0 {
            return Err(LivrariaError::Config(
                "backup_retention must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LivrariaPaths) -> Result<(), LivrariaError> {
        paths.ensure_directories()?;

        let contents = serde_json::to_string_pretty(self)
            .map_err(|e| LivrariaError::Config(format!("Failed to serialize settings: {}", e)))?;

        std::fs::write(paths.settings_file(), contents)
            .map_err(|e| LivrariaError::Io(format!("Failed to write settings file: {}", e)))?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.backup_retention, 5);
        assert!(settings.auto_backup);
        assert_eq!(settings.currency_symbol, "R$");
        assert_eq!(settings.log_level, "info");
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.backup_retention = 3;
        settings.auto_backup = false;

        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.backup_retention, 3);
        assert!(!loaded.auto_backup);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"currency_symbol": "€"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.currency_symbol, "€");
        assert_eq!(loaded.backup_retention, DEFAULT_BACKUP_RETENTION);
    }

    #[test]
    fn test_zero_retention_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"backup_retention": 0}"#).unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LivrariaError::Config(_)));
    }
}
