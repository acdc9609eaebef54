//! Shared SQL fragments for repositories
//!
//! Column lists are table-qualified so they can be used unchanged in joins
//! against `book_authors`.

/// SQL columns for author queries
pub const AUTHOR_COLUMNS: &str = "authors.id, authors.name, authors.created_at";

/// SQL columns for book queries
pub const BOOK_COLUMNS: &str = "books.id, books.title, books.created_at";
