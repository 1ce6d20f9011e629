//! Borrower registration operations.

use std::sync::Arc;

use libris_http::error::AppError;
use libris_store::BorrowerStore;

use super::models::{Borrower, BorrowerInput};
use crate::validate;

/// Borrower service: registration CRUD. Name/email uniqueness is left to
/// the storage constraint; a violation surfaces as an unclassified fault.
pub struct BorrowerService {
    borrowers: Arc<dyn BorrowerStore>,
}

impl BorrowerService {
    pub fn new(borrowers: Arc<dyn BorrowerStore>) -> Self {
        Self { borrowers }
    }

    pub async fn create_borrower(&self, input: BorrowerInput) -> Result<Borrower, AppError> {
        validate::borrower_input(&input)?;

        let record = self
            .borrowers
            .save(input.into_record())
            .await
            .map_err(AppError::internal)?;

        tracing::info!(borrower_id = record.id, "created borrower");
        Ok(Borrower::from_record(&record))
    }

    pub async fn get_all_borrowers(&self) -> Result<Vec<Borrower>, AppError> {
        let records = self
            .borrowers
            .find_all()
            .await
            .map_err(AppError::internal)?;
        Ok(records.iter().map(Borrower::from_record).collect())
    }

    pub async fn get_borrower_by_id(&self, borrower_id: u64) -> Result<Borrower, AppError> {
        let record = self
            .borrowers
            .find_by_id(borrower_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| {
                AppError::not_found(format!("Borrower not found with id: {borrower_id}"))
            })?;

        Ok(Borrower::from_record(&record))
    }

    /// Overwrite name/email in place. The held-book set is untouched.
    pub async fn update_borrower(
        &self,
        borrower_id: u64,
        input: BorrowerInput,
    ) -> Result<Borrower, AppError> {
        validate::borrower_input(&input)?;

        let mut record = self
            .borrowers
            .find_by_id(borrower_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| {
                AppError::not_found(format!("Borrower not found with id: {borrower_id}"))
            })?;

        record.name = input.name;
        record.email = input.email;

        let record = self
            .borrowers
            .save(record)
            .await
            .map_err(AppError::internal)?;
        Ok(Borrower::from_record(&record))
    }

    /// Remove a borrower. Held books are detached by the store, not deleted.
    pub async fn delete_borrower(&self, borrower_id: u64) -> Result<(), AppError> {
        let record = self
            .borrowers
            .find_by_id(borrower_id)
            .await
            .map_err(AppError::internal)?
            .ok_or_else(|| {
                AppError::not_found(format!("Borrower not found with id: {borrower_id}"))
            })?;

        self.borrowers
            .delete(&record)
            .await
            .map_err(AppError::internal)?;

        tracing::info!(borrower_id, "deleted borrower");
        Ok(())
    }
}
