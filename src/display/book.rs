//! Book display formatting
//!
//! One line per record, in the catalog's Portuguese labels. Prices always
//! show two decimal places.

use crate::models::Book;

/// Shown when the catalog is empty
pub const EMPTY_CATALOG: &str = "Nenhum livro cadastrado.";

/// Shown when an author lookup finds nothing
pub const NO_BOOKS_FOR_AUTHOR: &str = "Nenhum livro encontrado para o autor informado.";

/// Format a price with its currency symbol
pub fn format_price(price: f64, currency_symbol: &str) -> String {
    format!("{} {:.2}", currency_symbol, price)
}

/// Format a single book as one line
pub fn format_book_line(book: &Book, currency_symbol: &str) -> String {
    format!(
        "ID: {}, Título: {}, Autor: {}, Ano: {}, Preço: {}",
        book.id,
        book.title,
        book.author,
        book.year,
        format_price(book.price, currency_symbol)
    )
}

/// Format the whole catalog
pub fn format_book_list(books: &[Book], currency_symbol: &str) -> String {
    format_lines(books, currency_symbol, EMPTY_CATALOG)
}

/// Format the result of an author lookup
pub fn format_author_results(books: &[Book], currency_symbol: &str) -> String {
    format_lines(books, currency_symbol, NO_BOOKS_FOR_AUTHOR)
}

fn format_lines(books: &[Book], currency_symbol: &str, empty: &str) -> String {
    if books.is_empty() {
        return empty.to_string();
    }

    books
        .iter()
        .map(|book| format_book_line(book, currency_symbol))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewBook;

    #[test]
    fn test_format_book_line() {
        let book = NewBook::new("O Hobbit", "J.R.R. Tolkien", 1937, 39.9).with_id(1);
        assert_eq!(
            format_book_line(&book, "R$"),
            "ID: 1, Título: O Hobbit, Autor: J.R.R. Tolkien, Ano: 1937, Preço: R$ 39.90"
        );
    }

    #[test]
    fn test_format_book_list() {
        let books = vec![
            NewBook::new("O Hobbit", "J.R.R. Tolkien", 1937, 39.9).with_id(1),
            NewBook::new("Dom Casmurro", "Machado de Assis", 1899, 25.0).with_id(2),
        ];

        let output = format_book_list(&books, "R$");
        assert_eq!(output.lines().count(), 2);
        assert!(output.contains("Preço: R$ 25.00"));
    }

    #[test]
    fn test_format_empty_lists() {
        assert_eq!(format_book_list(&[], "R$"), "Nenhum livro cadastrado.");
        assert_eq!(
            format_author_results(&[], "R$"),
            "Nenhum livro encontrado para o autor informado."
        );
    }

    #[test]
    fn test_format_price_rounds() {
        assert_eq!(format_price(12.499, "€"), "€ 12.50");
        assert_eq!(format_price(3.0, "R$"), "R$ 3.00");
    }
}
