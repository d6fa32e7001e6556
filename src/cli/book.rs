//! Book CLI commands
//!
//! Implements the non-interactive counterparts of the menu's record
//! operations.

use clap::Subcommand;

use crate::config::{LivrariaPaths, Settings};
use crate::display::{format_author_results, format_book_line, format_book_list};
use crate::error::LivrariaResult;
use crate::models::{BookId, NewBook};
use crate::services::BookService;
use crate::storage::Storage;

/// Book subcommands
#[derive(Subcommand)]
pub enum BookCommands {
    /// Add a new book
    Add {
        /// Book title
        #[arg(short, long)]
        title: String,
        /// Author name
        #[arg(short, long)]
        author: String,
        /// Publication year
        #[arg(short, long)]
        year: i64,
        /// Price (e.g., "39.90" or "39,90")
        #[arg(short, long, value_parser = parse_price)]
        price: f64,
    },
    /// List all books
    List,
    /// Change the price of a book
    UpdatePrice {
        /// Book ID
        id: BookId,
        /// New price
        #[arg(value_parser = parse_price)]
        price: f64,
    },
    /// Remove a book
    Remove {
        /// Book ID
        id: BookId,
    },
    /// Find books by author (exact match)
    Search {
        /// Author name
        author: String,
    },
}

/// Handle a book command
pub fn handle_book_command(
    storage: &Storage,
    paths: &LivrariaPaths,
    settings: &Settings,
    cmd: BookCommands,
) -> LivrariaResult<()> {
    let service = BookService::new(storage);
    let currency = settings.currency_symbol.as_str();

    match cmd {
        BookCommands::Add {
            title,
            author,
            year,
            price,
        } => {
            let book = service.add(NewBook::new(title, author, year, price))?;
            println!("Livro adicionado com sucesso!");
            println!("{}", format_book_line(&book, currency));
            super::auto_backup(paths, settings);
        }

        BookCommands::List => {
            let books = service.list()?;
            println!("{}", format_book_list(&books, currency));
        }

        BookCommands::UpdatePrice { id, price } => {
            match service.update_price(id, price) {
                Ok(book) => {
                    println!("Preço atualizado com sucesso!");
                    println!("{}", format_book_line(&book, currency));
                    super::auto_backup(paths, settings);
                }
                Err(e) if e.is_not_found() => println!("Livro não encontrado."),
                Err(e) => return Err(e),
            }
        }

        BookCommands::Remove { id } => match service.remove(id) {
            Ok(book) => {
                println!("Livro removido com sucesso!");
                println!("{}", book);
                super::auto_backup(paths, settings);
            }
            Err(e) if e.is_not_found() => println!("Livro não encontrado."),
            Err(e) => return Err(e),
        },

        BookCommands::Search { author } => {
            let books = service.find_by_author(&author)?;
            println!("{}", format_author_results(&books, currency));
        }
    }

    Ok(())
}

/// Parse a price argument, accepting a comma as the decimal separator
fn parse_price(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .replace(',', ".")
        .parse()
        .map_err(|_| format!("invalid price: {}", s))?;

    if !value.is_finite() {
        return Err(format!("invalid price: {}", s));
    }
    Ok(value)
}
