use serde::{Deserialize, Serialize};

use libris_store::BookRecord;

/// Wire representation of a catalog entry. The holder reference stays
/// internal to the store; the wire shape carries catalog fields only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    /// Unique identifier for the book
    pub id: u64,
    /// Author of the book
    pub author: String,
    /// Title of the book
    pub title: String,
    /// ISBN of the book
    pub isbn: String,
}

impl Book {
    pub fn from_record(record: &BookRecord) -> Self {
        Self {
            id: record.id,
            author: record.author.clone(),
            title: record.title.clone(),
            isbn: record.isbn.clone(),
        }
    }
}

/// Request body for creating or updating a book.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookInput {
    /// Author of the book
    pub author: String,
    /// Title of the book
    pub title: String,
    /// ISBN of the book
    pub isbn: String,
}

impl BookInput {
    /// Build a fresh record; the id is assigned by the store on save.
    pub fn into_record(self) -> BookRecord {
        BookRecord::new(self.author, self.title, self.isbn)
    }
}
