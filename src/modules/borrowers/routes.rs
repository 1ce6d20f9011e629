//! Axum handlers for the borrowers module.
//!
//! Reads, updates, and deletes answer with the `ApiResponse` envelope;
//! create answers with the bare borrower.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use libris_http::error::AppError;

use super::models::{ApiResponse, Borrower, BorrowerInput};
use super::service::BorrowerService;

pub async fn create_borrower(
    State(service): State<Arc<BorrowerService>>,
    Json(input): Json<BorrowerInput>,
) -> Result<(StatusCode, Json<Borrower>), AppError> {
    let borrower = service.create_borrower(input).await?;
    Ok((StatusCode::CREATED, Json(borrower)))
}

pub async fn list_borrowers(
    State(service): State<Arc<BorrowerService>>,
) -> Result<Json<ApiResponse<Vec<Borrower>>>, AppError> {
    let borrowers = service.get_all_borrowers().await?;
    Ok(Json(ApiResponse::success(
        "Borrowers retrieved successfully",
        Some(borrowers),
    )))
}

pub async fn get_borrower(
    State(service): State<Arc<BorrowerService>>,
    Path(borrower_id): Path<u64>,
) -> Result<Json<ApiResponse<Borrower>>, AppError> {
    let borrower = service.get_borrower_by_id(borrower_id).await?;
    Ok(Json(ApiResponse::success(
        "Borrower retrieved successfully",
        Some(borrower),
    )))
}

pub async fn update_borrower(
    State(service): State<Arc<BorrowerService>>,
    Path(borrower_id): Path<u64>,
    Json(input): Json<BorrowerInput>,
) -> Result<Json<ApiResponse<Borrower>>, AppError> {
    let borrower = service.update_borrower(borrower_id, input).await?;
    Ok(Json(ApiResponse::success(
        "Borrower updated successfully",
        Some(borrower),
    )))
}

pub async fn delete_borrower(
    State(service): State<Arc<BorrowerService>>,
    Path(borrower_id): Path<u64>,
) -> Result<Json<ApiResponse<Borrower>>, AppError> {
    service.delete_borrower(borrower_id).await?;
    Ok(Json(ApiResponse::success(
        "Borrower deleted successfully",
        None,
    )))
}
