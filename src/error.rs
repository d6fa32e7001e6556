//! Custom error types for livraria
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for livraria operations
#[derive(Error, Debug)]
pub enum LivrariaError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// SQLite errors
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// CSV reading/writing errors
    #[error("CSV error: {0}")]
    Csv(String),

    /// Validation errors for data models
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Import errors
    #[error("Import error: {0}")]
    Import(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// Backup errors
    #[error("Backup error: {0}")]
    Backup(String),
}

impl LivrariaError {
    /// Create a "not found" error for books
    pub fn book_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Book",
            identifier: identifier.to_string(),
        }
    }

    /// Create a "not found" error for backups
    pub fn backup_not_found(identifier: impl ToString) -> Self {
        Self::NotFound {
            entity_type: "Backup",
            identifier: identifier.to_string(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for LivrariaError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for LivrariaError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<csv::Error> for LivrariaError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err.to_string())
    }
}

/// Result type alias for livraria operations
pub type LivrariaResult<T> = Result<T, LivrariaError>;
