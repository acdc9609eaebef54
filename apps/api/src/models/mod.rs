//! Database models and types for Bookstore
//!
//! This module contains SQLx models for:
//! - Authors and books
//! - Author/book edge rows used to partition batched relation queries

pub mod author;
pub mod book;

pub use author::{Author, BookAuthor};
pub use book::{AuthorBook, Book};
