//! Database repository layer for Bookstore
//!
//! Every SQL statement the API issues lives here. The relation lookups
//! (`find_by_author_ids`, `find_by_book_ids`) take a whole key set so the
//! request loaders can answer a batch with one round-trip.

pub mod author;
pub mod book;
pub mod utils;

pub use author::AuthorRepository;
pub use book::BookRepository;
