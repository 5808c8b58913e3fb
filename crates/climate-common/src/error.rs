//! Error types for the station climate services.

use thiserror::Error;

/// Result type alias using ClimateError.
pub type ClimateResult<T> = Result<T, ClimateError>;

/// Primary error type for data access and query operations.
///
/// Malformed or out-of-range request dates are deliberately absent here:
/// they produce empty sequences or null aggregates, never an error.
#[derive(Debug, Error)]
pub enum ClimateError {
    // === Schema Errors (fatal at startup) ===
    #[error("Required table '{0}' not found in database")]
    MissingTable(String),

    #[error("Table '{table}' is missing required column '{column}'")]
    MissingColumn { table: String, column: String },

    // === Storage Errors ===
    #[error("Database error: {0}")]
    Database(String),

    #[error("Stored date '{0}' is not a YYYY-MM-DD calendar date")]
    InvalidStoredDate(String),

    // === Infrastructure Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl ClimateError {
    /// Get the HTTP status code for this error.
    pub fn http_status_code(&self) -> u16 {
        match self {
            ClimateError::ServiceUnavailable(_) => 503,
            _ => 500,
        }
    }

    /// Whether the service can keep running after this error.
    ///
    /// Schema and configuration errors mean the process cannot serve any
    /// route and must refuse to start.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ClimateError::MissingTable(_)
                | ClimateError::MissingColumn { .. }
                | ClimateError::Config(_)
        )
    }

    /// Short machine-readable name used in exception bodies and metrics labels.
    pub fn kind(&self) -> &'static str {
        match self {
            ClimateError::MissingTable(_) => "missing-table",
            ClimateError::MissingColumn { .. } => "missing-column",
            ClimateError::Database(_) => "database",
            ClimateError::InvalidStoredDate(_) => "invalid-stored-date",
            ClimateError::Config(_) => "config",
            ClimateError::ServiceUnavailable(_) => "service-unavailable",
        }
    }
}
