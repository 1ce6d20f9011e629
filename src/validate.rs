//! Field-level input guards.
//!
//! Each guard accumulates `{field, message}` details; a non-empty set turns
//! into a Validation error carrying every offending field at once.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{json, Value};

use libris_http::error::AppError;

use crate::modules::books::models::BookInput;
use crate::modules::borrowers::models::BorrowerInput;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern compiles"));

fn require_non_blank(details: &mut Vec<Value>, field: &str, value: &str, message: &str) {
    if value.trim().is_empty() {
        details.push(json!({"field": field, "message": message}));
    }
}

/// Validate a book create/update body.
pub fn book_input(input: &BookInput) -> Result<(), AppError> {
    let mut details = Vec::new();

    require_non_blank(
        &mut details,
        "author",
        &input.author,
        "Author is a required field",
    );
    require_non_blank(
        &mut details,
        "title",
        &input.title,
        "Title is a required field",
    );
    require_non_blank(&mut details, "isbn", &input.isbn, "ISBN is a required field");

    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(details, "Validation Failed"))
    }
}

/// Validate a borrower create/update body.
pub fn borrower_input(input: &BorrowerInput) -> Result<(), AppError> {
    let mut details = Vec::new();

    require_non_blank(
        &mut details,
        "name",
        &input.name,
        "Name is a required field",
    );
    require_non_blank(
        &mut details,
        "email",
        &input.email,
        "Email is a required field",
    );
    if !input.email.trim().is_empty() && !EMAIL_RE.is_match(input.email.trim()) {
        details.push(json!({"field": "email", "message": "Email should be valid"}));
    }

    if details.is_empty() {
        Ok(())
    } else {
        Err(AppError::validation(details, "Validation Failed"))
    }
}
