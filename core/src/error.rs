//! Error types for the employee API client and its forms.
//!
//! # Design
//! `NotFound` and `Unauthorized` get dedicated variants because callers
//! distinguish "the record does not exist" and "the token was rejected" from
//! an unexpected status. Every other non-2xx response lands in `HttpError`
//! with the raw status and body. The view layer flattens all of these into
//! one display string.

use thiserror::Error;

/// Errors produced while building, executing or parsing an API call.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The configured base URL cannot carry API paths.
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    /// No HTTP response was received.
    #[error("transport failed: {0}")]
    Transport(String),

    /// The server returned 404.
    #[error("resource not found")]
    NotFound,

    /// The server returned 401; the API token was rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The server returned a non-2xx status other than 401 or 404.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    SerializationError(String),
}

/// A client-side validation failure. No request is sent while any of these
/// are outstanding.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Employee number is required.")]
    MissingEmployeeNumber,

    #[error("Employee name is required.")]
    MissingName,

    #[error("Department is required.")]
    MissingDepartment,

    #[error("Basic salary must be a positive number.")]
    InvalidSalary,

    #[error("{field} must be a valid date (YYYY-MM-DD).")]
    InvalidDate { field: &'static str },
}

/// Join validation failures into the single banner string the views show.
pub fn describe_form_errors(errors: &[FormError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}
