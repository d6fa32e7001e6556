//! Display formatting for terminal output
//!
//! Provides utilities for formatting books and backups for the terminal.

pub mod backup;
pub mod book;

pub use backup::{format_backup_list, format_prune_report};
pub use book::{format_author_results, format_book_line, format_book_list, format_price};
