//! Path management for livraria
//!
//! Every file the program touches lives under one base directory.
//!
//! ## Path Resolution Order
//!
//! 1. An explicit base directory (the `--base-dir` flag)
//! 2. `LIVRARIA_DATA_DIR` environment variable (if set)
//! 3. The directory containing the running executable

use std::path::PathBuf;

use crate::error::LivrariaError;

/// Environment variable that overrides the base directory
pub const DATA_DIR_ENV: &str = "LIVRARIA_DATA_DIR";

/// Manages all paths used by livraria
#[derive(Debug, Clone)]
pub struct LivrariaPaths {
    /// Base directory for all livraria data
    base_dir: PathBuf,
}

impl LivrariaPaths {
    /// Create a new LivrariaPaths instance
    ///
    /// Path resolution:
    /// 1. `LIVRARIA_DATA_DIR` env var (explicit override)
    /// 2. Directory of the current executable
    ///
    /// # Errors
    ///
    /// Returns an error if the executable location cannot be determined.
    pub fn new() -> Result<Self, LivrariaError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            resolve_default_path()?
        };

        Ok(Self { base_dir })
    }

    /// Create LivrariaPaths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory (<base>/data/)
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the backup directory (<base>/backups/)
    pub fn backup_dir(&self) -> PathBuf {
        self.base_dir.join("backups")
    }

    /// Get the exports directory (<base>/exports/)
    pub fn exports_dir(&self) -> PathBuf {
        self.base_dir.join("exports")
    }

    /// Get the log directory (<base>/logs/)
    pub fn log_dir(&self) -> PathBuf {
        self.base_dir.join("logs")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to the catalog database
    pub fn database_file(&self) -> PathBuf {
        self.data_dir().join("livraria.db")
    }

    /// Get the fixed destination of CSV exports
    pub fn export_file(&self) -> PathBuf {
        self.exports_dir().join("livros_exportados.csv")
    }

    /// Ensure all required directories exist
    ///
    /// Creates the base, data, backup and exports directories.
    pub fn ensure_directories(&self) -> Result<(), LivrariaError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LivrariaError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| LivrariaError::Io(format!("Failed to create data directory: {}", e)))?;

        std::fs::create_dir_all(self.backup_dir())
            .map_err(|e| LivrariaError::Io(format!("Failed to create backup directory: {}", e)))?;

        std::fs::create_dir_all(self.exports_dir()).map_err(|e| {
            LivrariaError::Io(format!("Failed to create exports directory: {}", e))
        })?;

        Ok(())
    }
}

/// Resolve the default base directory: wherever the binary lives
fn resolve_default_path() -> Result<PathBuf, LivrariaError> {
    let exe = std::env::current_exe().map_err(|e| {
        LivrariaError::Config(format!("Could not determine executable location: {}", e))
    })?;

    exe.parent()
        .map(|dir| dir.to_path_buf())
        .ok_or_else(|| LivrariaError::Config("Executable has no parent directory".into()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    #[test]
    fn test_custom_base_dir() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.base_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("data"));
        assert_eq!(paths.backup_dir(), temp_dir.path().join("backups"));
        assert_eq!(paths.exports_dir(), temp_dir.path().join("exports"));
    }

    #[test]
    fn test_env_var_override() {
        let temp_dir = TempDir::new().unwrap();
        let custom_path = temp_dir.path().to_str().unwrap();

        env::set_var(DATA_DIR_ENV, custom_path);

        let paths = LivrariaPaths::new().unwrap();
        assert_eq!(paths.base_dir(), temp_dir.path());

        env::remove_var(DATA_DIR_ENV);
    }

    #[test]
    fn test_ensure_directories() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().join("nested"));

        paths.ensure_directories().unwrap();

        assert!(paths.data_dir().exists());
        assert!(paths.backup_dir().exists());
        assert!(paths.exports_dir().exists());
    }

    #[test]
    fn test_file_paths() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LivrariaPaths::with_base_dir(temp_dir.path().to_path_buf());

        assert_eq!(paths.settings_file(), temp_dir.path().join("config.json"));
        assert_eq!(
            paths.database_file(),
            temp_dir.path().join("data").join("livraria.db")
        );
        assert_eq!(
            paths.export_file(),
            temp_dir.path().join("exports").join("livros_exportados.csv")
        );
    }
}
