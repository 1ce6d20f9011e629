//! Catalog operations and the lending state machine.

use std::sync::Arc;

use libris_http::error::AppError;
use libris_store::{BookStore, BorrowerStore};

use super::models::{Book, BookInput};
use crate::validate;

/// Book service: catalog CRUD plus the borrow/return transitions. Lending
/// writes both sides of the book/borrower association, so the service holds
/// both stores.
pub struct BookService {
    books: Arc<dyn BookStore>,
    borrowers: Arc<dyn BorrowerStore>,
}

impl BookService {
    pub fn new(books: Arc<dyn BookStore>, borrowers: Arc<dyn BorrowerStore>) -> Self {
        Self { books, borrowers }
    }

    /// Create a catalog entry. Enforces the ISBN soft-uniqueness rule:
    /// books may share an ISBN only when author and title match exactly.
    pub async fn create_book(&self, input: BookInput) -> Result<Book, AppError> {
        validate::book_input(&input)?;
        self.validate_isbn(&input).await?;

        let record = self
            .books
            .save(input.into_record())
            .await
            .map_err(AppError::internal)?;

        tracing::info!(book_id = record.id, "created book");
        Ok(Book::from_record(&record))
    }

    pub async fn get_all_books(&self) -> Result<Vec<Book>, AppError> {
        let records = self.books.find_all().await.map_err(AppError::internal)?;
        Ok(records.iter().map(Book::from_record).collect())
    }

    pub async fn get_book_by_id(&self, book_id: u64) -> Result<Book, AppError> {
        let record = self
            .books
            .find_by_id(book_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found(format!("Book not found with id: {book_id}")))?;

        Ok(Book::from_record(&record))
    }

    /// Overwrite author/title/isbn in place. The uniqueness rule is not
    /// re-checked and the holder reference is untouched.
    pub async fn update_book(&self, book_id: u64, input: BookInput) -> Result<Book, AppError> {
        validate::book_input(&input)?;

        let mut record = self
            .books
            .find_by_id(book_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found(format!("Book not found with id: {book_id}")))?;

        record.author = input.author;
        record.title = input.title;
        record.isbn = input.isbn;

        let record = self.books.save(record).await.map_err(AppError::internal)?;
        Ok(Book::from_record(&record))
    }

    /// Remove a book permanently. Being on loan does not block deletion.
    pub async fn delete_book(&self, book_id: u64) -> Result<(), AppError> {
        let record = self
            .books
            .find_by_id(book_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found(format!("Book not found with id: {book_id}")))?;

        self.books.delete(&record).await.map_err(AppError::internal)?;

        tracing::info!(book_id, "deleted book");
        Ok(())
    }

    /// On-Shelf -> On-Loan transition.
    pub async fn borrow_book(&self, book_id: u64, borrower_id: u64) -> Result<Book, AppError> {
        let mut book = self
            .books
            .find_by_id(book_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found("Book does not exist"))?;
        let mut borrower = self
            .borrowers
            .find_by_id(borrower_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found("Borrower does not exist"))?;

        // The guard is keyed off the borrower's held set: only a repeat
        // borrow by the same borrower is rejected here.
        if borrower.books.contains(&book.id) {
            tracing::warn!(
                book_id,
                borrower_id,
                "book is already borrowed by the given borrower"
            );
            return Err(AppError::conflict("Book is already borrowed by the borrower"));
        }

        book.borrowed_by = Some(borrower.id);
        borrower.books.insert(book.id);

        self.borrowers
            .save(borrower)
            .await
            .map_err(AppError::internal)?;
        let book = self.books.save(book).await.map_err(AppError::internal)?;

        tracing::info!(book_id, borrower_id, "book borrowed");
        Ok(Book::from_record(&book))
    }

    /// On-Loan -> On-Shelf transition, valid only for the holding borrower.
    pub async fn return_book(&self, book_id: u64, borrower_id: u64) -> Result<Book, AppError> {
        let mut book = self
            .books
            .find_by_id(book_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found("Book does not exist"))?;
        let mut borrower = self
            .borrowers
            .find_by_id(borrower_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| AppError::not_found("Borrower does not borrow this book"))?;

        if !borrower.books.contains(&book.id) {
            tracing::warn!(
                book_id,
                borrower_id,
                "book is not borrowed by the given borrower"
            );
            return Err(AppError::conflict("Book is not borrowed by the given borrower"));
        }

        book.borrowed_by = None;
        borrower.books.remove(&book.id);

        self.borrowers
            .save(borrower)
            .await
            .map_err(AppError::internal)?;
        let book = self.books.save(book).await.map_err(AppError::internal)?;

        tracing::info!(book_id, borrower_id, "book returned");
        Ok(Book::from_record(&book))
    }

    async fn validate_isbn(&self, input: &BookInput) -> Result<(), AppError> {
        let books = self
            .books
            .find_by_isbn(&input.isbn)
            .await
            .map_err(AppError::internal)?;

        for book in books {
            if book.author != input.author || book.title != input.title {
                tracing::warn!(
                    isbn = %input.isbn,
                    author = %input.author,
                    title = %input.title,
                    "book already exists with the same isbn"
                );
                return Err(AppError::conflict(
                    "Book already exists with the same title and author",
                ));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use libris_store::{BorrowerRecord, MemoryStore};

    fn input(author: &str, title: &str, isbn: &str) -> BookInput {
        BookInput {
            author: author.to_string(),
            title: title.to_string(),
            isbn: isbn.to_string(),
        }
    }

    fn service(store: &Arc<MemoryStore>) -> BookService {
        BookService::new(store.clone(), store.clone())
    }

    async fn register_borrower(store: &Arc<MemoryStore>, name: &str, email: &str) -> u64 {
        BorrowerStore::save(store.as_ref(), BorrowerRecord::new(name, email))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn create_book_assigns_id_and_echoes_fields() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();

        assert_eq!(book.id, 1);
        assert_eq!(book.author, "A");
        assert_eq!(book.title, "T");
        assert_eq!(book.isbn, "111");
    }

    #[tokio::test]
    async fn create_book_rejects_blank_fields() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let err = service.create_book(input("", "", "")).await.unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn create_book_round_trips_through_get() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let created = service.create_book(input("A", "T", "111")).await.unwrap();
        let fetched = service.get_book_by_id(created.id).await.unwrap();

        assert_eq!(fetched, created);
    }

    #[tokio::test]
    async fn same_isbn_with_different_metadata_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        service.create_book(input("A", "T", "111")).await.unwrap();
        let err = service
            .create_book(input("Other", "T", "111"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn same_isbn_with_matching_metadata_is_allowed() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        service.create_book(input("A", "T", "111")).await.unwrap();
        let copy = service.create_book(input("A", "T", "111")).await.unwrap();

        assert_eq!(copy.id, 2);
        assert_eq!(service.get_all_books().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn get_all_books_lists_the_catalog() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        service.create_book(input("A", "T1", "111")).await.unwrap();
        service.create_book(input("B", "T2", "222")).await.unwrap();

        let books = service.get_all_books().await.unwrap();
        assert_eq!(books.len(), 2);
    }

    #[tokio::test]
    async fn missing_ids_are_not_found() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        assert!(matches!(
            service.get_book_by_id(99).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
        assert!(matches!(
            service.update_book(99, input("A", "T", "111")).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
        assert!(matches!(
            service.delete_book(99).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn update_book_overwrites_catalog_fields() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        let updated = service
            .update_book(book.id, input("A2", "T2", "222"))
            .await
            .unwrap();

        assert_eq!(updated.id, book.id);
        assert_eq!(updated.author, "A2");
        assert_eq!(updated.title, "T2");
        assert_eq!(updated.isbn, "222");
    }

    #[tokio::test]
    async fn update_book_does_not_recheck_isbn_uniqueness() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        service.create_book(input("A", "T", "111")).await.unwrap();
        let other = service.create_book(input("B", "T2", "222")).await.unwrap();

        // Overwriting onto a taken ISBN with different metadata succeeds.
        let updated = service
            .update_book(other.id, input("B", "T2", "111"))
            .await
            .unwrap();
        assert_eq!(updated.isbn, "111");
    }

    #[tokio::test]
    async fn update_book_keeps_the_holder_reference() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        let borrower_id = register_borrower(&store, "N", "n@x.com").await;
        service.borrow_book(book.id, borrower_id).await.unwrap();

        service
            .update_book(book.id, input("A2", "T2", "222"))
            .await
            .unwrap();

        let record = BookStore::find_by_id(store.as_ref(), book.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.borrowed_by, Some(borrower_id));
    }

    #[tokio::test]
    async fn delete_book_removes_the_record() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        service.delete_book(book.id).await.unwrap();

        assert!(matches!(
            service.get_book_by_id(book.id).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn delete_book_is_allowed_while_borrowed() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        let borrower_id = register_borrower(&store, "N", "n@x.com").await;
        service.borrow_book(book.id, borrower_id).await.unwrap();

        service.delete_book(book.id).await.unwrap();

        let holder = BorrowerStore::find_by_id(store.as_ref(), borrower_id)
            .await
            .unwrap()
            .unwrap();
        assert!(holder.books.is_empty());
    }

    #[tokio::test]
    async fn borrow_updates_both_sides_of_the_association() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        let borrower_id = register_borrower(&store, "N", "n@x.com").await;

        let borrowed = service.borrow_book(book.id, borrower_id).await.unwrap();
        assert_eq!(borrowed.id, book.id);

        let record = BookStore::find_by_id(store.as_ref(), book.id)
            .await
            .unwrap()
            .unwrap();
        let holder = BorrowerStore::find_by_id(store.as_ref(), borrower_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.borrowed_by, Some(borrower_id));
        assert!(holder.books.contains(&book.id));
    }

    #[tokio::test]
    async fn borrow_missing_book_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);
        let borrower_id = register_borrower(&store, "N", "n@x.com").await;

        let err = service.borrow_book(99, borrower_id).await.unwrap_err();
        match err {
            AppError::NotFound { message } => assert_eq!(message, "Book does not exist"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn borrow_missing_borrower_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);
        let book = service.create_book(input("A", "T", "111")).await.unwrap();

        let err = service.borrow_book(book.id, 99).await.unwrap_err();
        match err {
            AppError::NotFound { message } => assert_eq!(message, "Borrower does not exist"),
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn repeat_borrow_by_the_same_borrower_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        let borrower_id = register_borrower(&store, "N", "n@x.com").await;

        service.borrow_book(book.id, borrower_id).await.unwrap();
        let err = service.borrow_book(book.id, borrower_id).await.unwrap_err();

        match err {
            AppError::Conflict { message } => {
                assert_eq!(message, "Book is already borrowed by the borrower")
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn a_second_borrower_takes_over_a_loaned_book() {
        // The guard checks the requesting borrower's held set, not the
        // book's holder, so another borrower can take an on-loan book.
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        let first = register_borrower(&store, "First", "first@x.com").await;
        let second = register_borrower(&store, "Second", "second@x.com").await;

        service.borrow_book(book.id, first).await.unwrap();
        service.borrow_book(book.id, second).await.unwrap();

        let record = BookStore::find_by_id(store.as_ref(), book.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.borrowed_by, Some(second));

        // The first borrower no longer holds it and cannot return it.
        let err = service.return_book(book.id, first).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict { .. }));
    }

    #[tokio::test]
    async fn return_clears_both_sides_of_the_association() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        let borrower_id = register_borrower(&store, "N", "n@x.com").await;

        service.borrow_book(book.id, borrower_id).await.unwrap();
        service.return_book(book.id, borrower_id).await.unwrap();

        let record = BookStore::find_by_id(store.as_ref(), book.id)
            .await
            .unwrap()
            .unwrap();
        let holder = BorrowerStore::find_by_id(store.as_ref(), borrower_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(record.borrowed_by, None);
        assert!(holder.books.is_empty());
    }

    #[tokio::test]
    async fn return_without_borrow_conflicts() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        let borrower_id = register_borrower(&store, "N", "n@x.com").await;

        let err = service.return_book(book.id, borrower_id).await.unwrap_err();
        match err {
            AppError::Conflict { message } => {
                assert_eq!(message, "Book is not borrowed by the given borrower")
            }
            other => panic!("expected Conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn return_missing_borrower_is_not_found() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);
        let book = service.create_book(input("A", "T", "111")).await.unwrap();

        let err = service.return_book(book.id, 99).await.unwrap_err();
        match err {
            AppError::NotFound { message } => {
                assert_eq!(message, "Borrower does not borrow this book")
            }
            other => panic!("expected NotFound, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn borrow_return_cycle_is_repeatable_but_not_stackable() {
        let store = Arc::new(MemoryStore::new());
        let service = service(&store);

        let book = service.create_book(input("A", "T", "111")).await.unwrap();
        let borrower_id = register_borrower(&store, "N", "n@x.com").await;

        service.borrow_book(book.id, borrower_id).await.unwrap();
        assert!(service.borrow_book(book.id, borrower_id).await.is_err());

        service.return_book(book.id, borrower_id).await.unwrap();
        assert!(service.return_book(book.id, borrower_id).await.is_err());

        // A fresh cycle works again after the shelf state is restored.
        service.borrow_book(book.id, borrower_id).await.unwrap();
    }
}
