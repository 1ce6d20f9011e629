//! Persistence gateway for libris.
//!
//! Stored records carry id-based foreign keys on both sides of the
//! book/borrower association; the engine keeps the two sides mutually
//! consistent across deletes.

use std::collections::BTreeSet;

use async_trait::async_trait;
use thiserror::Error;

pub mod memory;

pub use memory::MemoryStore;

/// A record id of `0` means "not yet assigned"; the store hands out ids
/// starting at 1.
pub const UNASSIGNED_ID: u64 = 0;

/// Stored representation of a book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookRecord {
    pub id: u64,
    pub author: String,
    pub title: String,
    pub isbn: String,
    /// Borrower currently holding this book; `None` means on-shelf.
    pub borrowed_by: Option<u64>,
}

impl BookRecord {
    pub fn new(author: impl Into<String>, title: impl Into<String>, isbn: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            author: author.into(),
            title: title.into(),
            isbn: isbn.into(),
            borrowed_by: None,
        }
    }
}

/// Stored representation of a borrower.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BorrowerRecord {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Ids of the books this borrower currently holds.
    pub books: BTreeSet<u64>,
}

impl BorrowerRecord {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            id: UNASSIGNED_ID,
            name: name.into(),
            email: email.into(),
            books: BTreeSet::new(),
        }
    }
}

#[derive(Error, Debug)]
pub enum StoreError {
    /// A storage-level uniqueness constraint was violated.
    #[error("constraint violation: {0}")]
    Constraint(String),
}

/// Book table operations.
#[async_trait]
pub trait BookStore: Send + Sync {
    /// Persist the record. An unassigned id is replaced with a fresh one;
    /// a known id overwrites in place. Returns the stored record.
    async fn save(&self, record: BookRecord) -> Result<BookRecord, StoreError>;
    async fn find_by_id(&self, id: u64) -> Result<Option<BookRecord>, StoreError>;
    async fn find_all(&self) -> Result<Vec<BookRecord>, StoreError>;
    /// Remove the record. Detaches the book from its holder's set so the
    /// association stays consistent on both sides.
    async fn delete(&self, record: &BookRecord) -> Result<(), StoreError>;
    async fn find_by_isbn(&self, isbn: &str) -> Result<Vec<BookRecord>, StoreError>;
}

/// Borrower table operations.
#[async_trait]
pub trait BorrowerStore: Send + Sync {
    /// Persist the record, enforcing the unique name/email constraint.
    async fn save(&self, record: BorrowerRecord) -> Result<BorrowerRecord, StoreError>;
    async fn find_by_id(&self, id: u64) -> Result<Option<BorrowerRecord>, StoreError>;
    async fn find_all(&self) -> Result<Vec<BorrowerRecord>, StoreError>;
    /// Remove the record. Every held book is detached (its `borrowed_by`
    /// cleared), not deleted.
    async fn delete(&self, record: &BorrowerRecord) -> Result<(), StoreError>;
}
