//! Author model for Bookstore

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Author record from the authors table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Author {
    /// Unique author identifier
    pub id: i64,

    /// Display name
    pub name: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// An author row joined through `book_authors`, tagged with the book it belongs to
#[derive(Debug, Clone, FromRow)]
pub struct BookAuthor {
    pub book_id: i64,

    #[sqlx(flatten)]
    pub author: Author,
}
