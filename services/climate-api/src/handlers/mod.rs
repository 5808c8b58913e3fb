//! HTTP request handlers for the climate API.

pub mod health;
pub mod landing;
pub mod precipitation;
pub mod stations;
pub mod stats;
pub mod tobs;

use axum::{http::StatusCode, http::Uri, response::Response};

use crate::error::ExceptionResponse;

/// Fallback for unknown paths.
pub async fn not_found_handler(uri: Uri) -> Response {
    ExceptionResponse::not_found(uri.path()).into_response_with(StatusCode::NOT_FOUND)
}
