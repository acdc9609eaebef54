//! Book model for Bookstore

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;

/// Book record from the books table
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Book {
    /// Unique book identifier
    pub id: i64,

    /// Book title
    pub title: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

/// A book row joined through `book_authors`, tagged with the author it belongs to
#[derive(Debug, Clone, FromRow)]
pub struct AuthorBook {
    pub author_id: i64,

    #[sqlx(flatten)]
    pub book: Book,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_book_serialization() {
        let book = Book {
            id: 7,
            title: "The Dispossessed".to_string(),
            created_at: Utc::now(),
        };

        let json = serde_json::to_string(&book).expect("serialization should succeed");
        assert!(json.contains("The Dispossessed"));
        assert!(json.contains("created_at"));
    }
}
