//! GraphQL type definitions for Bookstore
//!
//! Object types wrap the database models and resolve their relationships
//! through the request's loaders.

mod author;
mod book;

pub use author::Author;
pub use book::Book;
