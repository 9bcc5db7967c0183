//! Unified error types for the leaderboard API
//!
//! This module defines error types for each layer:
//! - `SourceError`: a single standings source failed (Sheets API or CSV export)
//! - `RefreshError`: every source in the chain failed
//! - `AppError`: Application layer errors (converted to HTTP responses)

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Errors from a single standings source
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Rate limited: {label}")]
    RateLimited { label: String },

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

impl SourceError {
    /// Rate limits are transient: the chain moves on without recording them as failures
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, SourceError::RateLimited { .. })
    }
}

/// Errors from a whole refresh cycle
#[derive(Debug, Error)]
pub enum RefreshError {
    #[error("No standings sources configured")]
    NoSources,

    #[error("All {attempts} standings sources failed, last error: {last}")]
    Exhausted {
        attempts: usize,
        #[source]
        last: SourceError,
    },
}

/// Application layer errors - used by HTTP handlers
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid request: {0}")]
    BadRequest(String),

    #[error("Service unavailable: {0}")]
    Unavailable(String),
}

/// Error response body for JSON responses
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            AppError::BadRequest(msg) => {
                (StatusCode::BAD_REQUEST, "Bad request", Some(msg.clone()))
            }
            AppError::Unavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                "Failed to fetch leaderboard data",
                Some(msg.clone()),
            ),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            details,
        });

        (status, body).into_response()
    }
}
