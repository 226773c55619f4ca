//! Error types and HTTP error response handling.
//!
//! This module defines all handler errors and how they are converted into the response
//! [Envelope] with the matching status code.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    envelope::{Envelope, Payload},
    stores::StoreError,
};

/// Application-wide error type.
///
/// Each variant maps to a specific HTTP status code and envelope message.
///
/// # Error Categories
///
/// - **Validation Errors**: Required fields missing from a create request
/// - **Request Errors**: Null update body, unparseable JSON, path or query
/// - **Resource Errors**: Requested id not found, or a list query matched nothing
/// - **Storage Errors**: Anything the storage collaborator reports
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// One or more required fields are missing.
    ///
    /// Returns HTTP 400 with the full violation list as `data`.
    #[error("Bad Request")]
    Validation(Vec<String>),

    /// The update body was JSON `null`.
    ///
    /// Returns HTTP 400.
    #[error("Request cannot be NULL.")]
    NullRequest,

    /// Request body, path or query could not be used.
    ///
    /// Returns HTTP 400. The String describes what was wrong.
    #[error("{0}")]
    InvalidRequest(String),

    /// No record has the requested id.
    ///
    /// Returns HTTP 404. The String names the resource and id.
    #[error("{0}")]
    NotFound(String),

    /// A list query returned no rows.
    ///
    /// Returns HTTP 404.
    #[error("There seem to be no matches in the DB.")]
    NoMatches,

    /// The storage collaborator failed.
    ///
    /// Returns HTTP 500 with the underlying error text as the message and `action`
    /// (e.g. "Failed to add Account to DB.") as `data`.
    #[error("{source}")]
    Storage {
        source: StoreError,
        action: &'static str,
    },
}

impl AppError {
    /// Build a mapper for `Result::map_err` that tags a store failure with `action`.
    pub fn storage(action: &'static str) -> impl FnOnce(StoreError) -> AppError {
        move |source| AppError::Storage { source, action }
    }

    fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_) | AppError::NullRequest | AppError::InvalidRequest(_) => {
                StatusCode::BAD_REQUEST
            }
            AppError::NotFound(_) | AppError::NoMatches => StatusCode::NOT_FOUND,
            AppError::Storage { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Convert AppError into an HTTP response.
///
/// This implementation allows Axum handlers to return `Result<Envelope, AppError>` and have
/// errors rendered in the same envelope as successes.
///
/// # Status Code Mapping
///
/// - `Validation`, `NullRequest`, `InvalidRequest` → 400 Bad Request
/// - `NotFound`, `NoMatches` → 404 Not Found
/// - `Storage` → 500 Internal Server Error (exposes the storage error text)
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();

        let data = match self {
            AppError::Validation(errors) => Some(Payload::Errors(errors)),
            AppError::Storage { source, action } => {
                tracing::error!(error = %source, "{action}");
                Some(Payload::Detail(action.to_string()))
            }
            _ => None,
        };

        Envelope::new(status, message, data).into_response()
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::InvalidRequest(rejection.body_text())
    }
}
