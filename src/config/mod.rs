//! Configuration module for livraria
//!
//! This module provides configuration management including:
//! - Base directory and derived path resolution
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::LivrariaPaths;
pub use settings::Settings;
