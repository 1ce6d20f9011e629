//! Axum handlers for the books module. No business logic here; each handler
//! maps one route onto a service call.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use libris_http::error::AppError;

use super::models::{Book, BookInput};
use super::service::BookService;

pub async fn list_books(
    State(service): State<Arc<BookService>>,
) -> Result<Json<Vec<Book>>, AppError> {
    Ok(Json(service.get_all_books().await?))
}

pub async fn create_book(
    State(service): State<Arc<BookService>>,
    Json(input): Json<BookInput>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = service.create_book(input).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn get_book(
    State(service): State<Arc<BookService>>,
    Path(book_id): Path<u64>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(service.get_book_by_id(book_id).await?))
}

pub async fn update_book(
    State(service): State<Arc<BookService>>,
    Path(book_id): Path<u64>,
    Json(input): Json<BookInput>,
) -> Result<Json<Book>, AppError> {
    Ok(Json(service.update_book(book_id, input).await?))
}

pub async fn delete_book(
    State(service): State<Arc<BookService>>,
    Path(book_id): Path<u64>,
) -> Result<StatusCode, AppError> {
    service.delete_book(book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn borrow_book(
    State(service): State<Arc<BookService>>,
    Path((book_id, borrower_id)): Path<(u64, u64)>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = service.borrow_book(book_id, borrower_id).await?;
    Ok((StatusCode::ACCEPTED, Json(book)))
}

pub async fn return_book(
    State(service): State<Arc<BookService>>,
    Path((book_id, borrower_id)): Path<(u64, u64)>,
) -> Result<(StatusCode, Json<Book>), AppError> {
    let book = service.return_book(book_id, borrower_id).await?;
    Ok((StatusCode::ACCEPTED, Json(book)))
}
