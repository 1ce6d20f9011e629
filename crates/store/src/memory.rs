//! In-memory storage engine backing the repository traits.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::{BookRecord, BookStore, BorrowerRecord, BorrowerStore, StoreError, UNASSIGNED_ID};

/// Two-table store with sequential id assignment per table.
///
/// Cross-table operations (the delete cascades) acquire the book table lock
/// before the borrower table lock.
pub struct MemoryStore {
    books: RwLock<BTreeMap<u64, BookRecord>>,
    borrowers: RwLock<BTreeMap<u64, BorrowerRecord>>,
    next_book_id: AtomicU64,
    next_borrower_id: AtomicU64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            books: RwLock::new(BTreeMap::new()),
            borrowers: RwLock::new(BTreeMap::new()),
            next_book_id: AtomicU64::new(1),
            next_borrower_id: AtomicU64::new(1),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookStore for MemoryStore {
    async fn save(&self, mut record: BookRecord) -> Result<BookRecord, StoreError> {
        let mut books = self.books.write().await;
        let mut borrowers = self.borrowers.write().await;

        if record.id == UNASSIGNED_ID {
            record.id = self.next_book_id.fetch_add(1, Ordering::SeqCst);
        }
        books.insert(record.id, record.clone());

        // The held sets are the mapped side of the association: after a
        // write, exactly the current holder (if any) carries the id.
        for borrower in borrowers.values_mut() {
            if record.borrowed_by == Some(borrower.id) {
                borrower.books.insert(record.id);
            } else {
                borrower.books.remove(&record.id);
            }
        }

        Ok(record)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<BookRecord>, StoreError> {
        Ok(self.books.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<BookRecord>, StoreError> {
        Ok(self.books.read().await.values().cloned().collect())
    }

    async fn delete(&self, record: &BookRecord) -> Result<(), StoreError> {
        let mut books = self.books.write().await;
        let mut borrowers = self.borrowers.write().await;

        if let Some(removed) = books.remove(&record.id) {
            // Drop the id from the holder's set so no dangling reference
            // survives the delete.
            if let Some(holder_id) = removed.borrowed_by {
                if let Some(holder) = borrowers.get_mut(&holder_id) {
                    holder.books.remove(&removed.id);
                    tracing::debug!(
                        book_id = removed.id,
                        borrower_id = holder_id,
                        "detached deleted book from holder"
                    );
                }
            }
        }

        Ok(())
    }

    async fn find_by_isbn(&self, isbn: &str) -> Result<Vec<BookRecord>, StoreError> {
        Ok(self
            .books
            .read()
            .await
            .values()
            .filter(|book| book.isbn == isbn)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl BorrowerStore for MemoryStore {
    async fn save(&self, mut record: BorrowerRecord) -> Result<BorrowerRecord, StoreError> {
        let mut borrowers = self.borrowers.write().await;

        // Unique name/email across all other borrowers, the constraint the
        // borrower table carries in the schema.
        for other in borrowers.values() {
            if other.id == record.id {
                continue;
            }
            if other.name == record.name {
                return Err(StoreError::Constraint(format!(
                    "borrower name '{}' already exists",
                    record.name
                )));
            }
            if other.email == record.email {
                return Err(StoreError::Constraint(format!(
                    "borrower email '{}' already exists",
                    record.email
                )));
            }
        }

        if record.id == UNASSIGNED_ID {
            record.id = self.next_borrower_id.fetch_add(1, Ordering::SeqCst);
        }
        borrowers.insert(record.id, record.clone());

        Ok(record)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<BorrowerRecord>, StoreError> {
        Ok(self.borrowers.read().await.get(&id).cloned())
    }

    async fn find_all(&self) -> Result<Vec<BorrowerRecord>, StoreError> {
        Ok(self.borrowers.read().await.values().cloned().collect())
    }

    async fn delete(&self, record: &BorrowerRecord) -> Result<(), StoreError> {
        let mut books = self.books.write().await;
        let mut borrowers = self.borrowers.write().await;

        if let Some(removed) = borrowers.remove(&record.id) {
            // Cascade: held books go back on the shelf, they are not deleted.
            for book_id in &removed.books {
                if let Some(book) = books.get_mut(book_id) {
                    book.borrowed_by = None;
                }
            }
            tracing::debug!(
                borrower_id = removed.id,
                detached = removed.books.len(),
                "detached held books of deleted borrower"
            );
        }

        Ok(())
    }
}
