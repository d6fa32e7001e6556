//! Livraria - Bookstore catalog manager
//!
//! This library provides the core functionality for the livraria command-line
//! program. It keeps a catalog of books (title, author, publication year and
//! price) in a local SQLite database, with CSV import/export and rotating
//! database snapshots.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - `config`: Base directory layout and settings
//! - `error`: Custom error types
//! - `logging`: File logger bootstrap
//! - `models`: Book record and validation
//! - `storage`: SQLite storage layer
//! - `services`: Record operations and CSV import
//! - `export`: CSV export
//! - `backup`: Database snapshots with retention
//! - `display`: Terminal formatting
//! - `shell`: Interactive numbered menu
//! - `cli`: Non-interactive subcommand handlers
//!
//! # Example
//!
//! ```rust,ignore
//! use livraria::config::{LivrariaPaths, Settings};
//! use livraria::storage::Storage;
//!
//! let paths = LivrariaPaths::new()?;
//! let settings = Settings::load_or_create(&paths)?;
//! let storage = Storage::new(&paths)?;
//! ```

pub mod backup;
pub mod cli;
pub mod config;
pub mod display;
pub mod error;
pub mod export;
pub mod logging;
pub mod models;
pub mod services;
pub mod shell;
pub mod storage;

pub use error::LivrariaError;
