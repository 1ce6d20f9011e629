use serde::{Deserialize, Serialize};

use libris_store::BorrowerRecord;

/// Wire representation of a borrower. The held-book set stays internal to
/// the store and is not serialized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Borrower {
    /// Unique identifier for the borrower
    pub id: u64,
    /// Full name of the borrower, unique across all borrowers
    pub name: String,
    /// Email address of the borrower, unique across all borrowers
    pub email: String,
}

impl Borrower {
    pub fn from_record(record: &BorrowerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name.clone(),
            email: record.email.clone(),
        }
    }
}

/// Request body for registering or updating a borrower.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowerInput {
    /// Full name of the borrower
    pub name: String,
    /// Email address of the borrower
    pub email: String,
}

impl BorrowerInput {
    /// Build a fresh record; the id is assigned by the store on save.
    pub fn into_record(self) -> BorrowerRecord {
        BorrowerRecord::new(self.name, self.email)
    }
}

/// Response envelope the borrower read/update/delete endpoints answer with.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// "success" or "fail"
    pub status: String,
    /// Human-readable description of the outcome
    pub message: String,
    /// Payload, absent for delete responses
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status: "success".to_string(),
            message: message.into(),
            data,
        }
    }
}
