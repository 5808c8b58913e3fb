//! HTTP error responses.

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use climate_common::ClimateError;

/// JSON body for every non-2xx response.
#[derive(Debug, Clone, Serialize)]
pub struct ExceptionResponse {
    /// Exception type identifier.
    #[serde(rename = "type")]
    pub type_: String,

    pub title: String,

    pub status: u16,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl ExceptionResponse {
    pub fn new(type_: impl Into<String>, status: StatusCode, detail: Option<String>) -> Self {
        Self {
            type_: type_.into(),
            title: status
                .canonical_reason()
                .unwrap_or("Unknown Status")
                .to_string(),
            status: status.as_u16(),
            detail,
        }
    }

    pub fn not_found(path: &str) -> Self {
        Self::new(
            "not-found",
            StatusCode::NOT_FOUND,
            Some(format!("No route for {}", path)),
        )
    }

    pub fn into_response_with(self, status: StatusCode) -> Response {
        let body = serde_json::to_string(&self).unwrap_or_default();
        (
            status,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response()
    }
}

/// Error returned by route handlers.
#[derive(Debug)]
pub struct ApiError(pub ClimateError);

impl From<ClimateError> for ApiError {
    fn from(err: ClimateError) -> Self {
        ApiError(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.http_status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        tracing::error!(kind = self.0.kind(), error = %self.0, "Request failed");

        ExceptionResponse::new(self.0.kind(), status, Some(self.0.to_string()))
            .into_response_with(status)
    }
}
