//! Book model
//!
//! A catalog record. Field names on the wire (CSV headers, SQL columns) keep
//! the catalog's Portuguese column names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Storage-assigned identifier of a book
pub type BookId = i64;

/// A persisted book record
///
/// Field order matches the `livros` table and the CSV column order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier
    pub id: BookId,

    /// Title
    #[serde(rename = "titulo")]
    pub title: String,

    /// Author name
    #[serde(rename = "autor")]
    pub author: String,

    /// Publication year
    #[serde(rename = "ano_publicacao")]
    pub year: i64,

    /// Price in the operator's currency
    #[serde(rename = "preco")]
    pub price: f64,
}

impl fmt::Display for Book {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.title, self.author, self.year)
    }
}

/// A book that has not been stored yet
#[derive(Debug, Clone, PartialEq)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i64,
    pub price: f64,
}

impl NewBook {
    /// Create a new unsaved book
    pub fn new(title: impl Into<String>, author: impl Into<String>, year: i64, price: f64) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            year,
            price,
        }
    }

    /// Validate the book before insertion
    pub fn validate(&self) -> Result<(), BookValidationError> {
        validate_fields(&self.title, &self.author, self.year, self.price)
    }

    /// Attach the identifier assigned by storage
    pub fn with_id(self, id: BookId) -> Book {
        Book {
            id,
            title: self.title,
            author: self.author,
            year: self.year,
            price: self.price,
        }
    }
}

fn validate_fields(
    title: &str,
    author: &str,
    year: i64,
    price: f64,
) -> Result<(), BookValidationError> {
    if title.trim().is_empty() {
        return Err(BookValidationError::EmptyTitle);
    }

    if author.trim().is_empty() {
        return Err(BookValidationError::EmptyAuthor);
    }

    if year <= 0 {
        return Err(BookValidationError::NonPositiveYear(year));
    }

    validate_price(price)
}

/// Prices must be finite and strictly positive
pub fn validate_price(price: f64) -> Result<(), BookValidationError> {
    if !price.is_finite() || price <= 0.0 {
        return Err(BookValidationError::NonPositivePrice(price));
    }
    Ok(())
}

/// Validation errors for books
#[derive(Debug, Clone, PartialEq)]
pub enum BookValidationError {
    EmptyTitle,
    EmptyAuthor,
    NonPositiveYear(i64),
    NonPositivePrice(f64),
}

impl fmt::Display for BookValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Book title cannot be empty"),
            Self::EmptyAuthor => write!(f, "Book author cannot be empty"),
            Self::NonPositiveYear(year) => {
                write!(f, "Publication year must be positive (got {})", year)
            }
            Self::NonPositivePrice(price) => write!(f, "Price must be positive (got {})", price),
        }
    }
}

impl std::error::Error for BookValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_book_with_id() {
        let book = NewBook::new("O Hobbit", "J.R.R. Tolkien", 1937, 39.90).with_id(1);
        assert_eq!(book.id, 1);
        assert_eq!(book.title, "O Hobbit");
        assert_eq!(book.author, "J.R.R. Tolkien");
        assert_eq!(book.year, 1937);
        assert_eq!(book.price, 39.90);
    }

    #[test]
    fn test_validation() {
        let mut book = NewBook::new("Dom Casmurro", "Machado de Assis", 1899, 25.0);
        assert!(book.validate().is_ok());

        book.title = "   ".into();
        assert_eq!(book.validate(), Err(BookValidationError::EmptyTitle));

        book.title = "Dom Casmurro".into();
        book.author = String::new();
        assert_eq!(book.validate(), Err(BookValidationError::EmptyAuthor));

        book.author = "Machado de Assis".into();
        book.year = 0;
        assert_eq!(book.validate(), Err(BookValidationError::NonPositiveYear(0)));

        book.year = 1899;
        book.price = -1.0;
        assert!(matches!(
            book.validate(),
            Err(BookValidationError::NonPositivePrice(_))
        ));
    }

    #[test]
    fn test_price_rejects_nan_and_infinity() {
        assert!(validate_price(f64::NAN).is_err());
        assert!(validate_price(f64::INFINITY).is_err());
        assert!(validate_price(0.0).is_err());
        assert!(validate_price(0.01).is_ok());
    }

    #[test]
    fn test_display() {
        let book = NewBook::new("O Hobbit", "J.R.R. Tolkien", 1937, 39.90).with_id(7);
        assert_eq!(book.to_string(), "O Hobbit (J.R.R. Tolkien, 1937)");
    }
}
