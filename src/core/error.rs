//! Typed error handling for the products service
//!
//! Two layers of errors live here:
//!
//! - [`ModelError`]: failures raised by the persistence model (lookup,
//!   identifier parsing, field validation, storage backend).
//! - [`ApiError`]: failures as the resource handlers report them, each one
//!   carrying an HTTP status and rendered as a response [`Envelope`].
//!
//! # Example
//!
//! ```rust,ignore
//! match model.find_by_id(&id).await {
//!     Ok(product) => println!("Found: {:?}", product),
//!     Err(ModelError::NotFound { id }) => println!("Product {} not found", id),
//!     Err(e) => eprintln!("Other error: {}", e),
//! }
//! ```

use crate::core::envelope::Envelope;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::fmt;
use uuid::Uuid;

// =============================================================================
// Model Errors
// =============================================================================

/// Errors raised by the persistence model
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// No record matches a well-formed identifier
    #[error("Product with id '{id}' not found")]
    NotFound { id: Uuid },

    /// The identifier is not a well-formed product id
    #[error("Cast to Uuid failed for value \"{value}\" at path \"id\" for model \"Products\"")]
    InvalidIdentifier { value: String },

    /// One or more fields violate the schema
    #[error("{0}")]
    Validation(ValidationError),

    /// The storage backend failed
    #[error(transparent)]
    Storage(#[from] anyhow::Error),
}

impl ModelError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ModelError::NotFound { .. })
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            ModelError::NotFound { .. } => "PRODUCT_NOT_FOUND",
            ModelError::InvalidIdentifier { .. } => "INVALID_PRODUCT_ID",
            ModelError::Validation(_) => "VALIDATION_ERROR",
            ModelError::Storage(_) => "STORAGE_ERROR",
        }
    }
}

impl From<ValidationError> for ModelError {
    fn from(err: ValidationError) -> Self {
        ModelError::Validation(err)
    }
}

// =============================================================================
// Validation Errors
// =============================================================================

/// A single field that failed casting or a schema rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// All violations found while validating one record
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub violations: Vec<FieldViolation>,
}

impl ValidationError {
    pub fn new(violations: Vec<FieldViolation>) -> Self {
        Self { violations }
    }

    /// Whether a violation was reported for `field`
    pub fn has_field(&self, field: &str) -> bool {
        self.violations.iter().any(|v| v.field == field)
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let msgs: Vec<String> = self.violations.iter().map(|v| v.to_string()).collect();
        write!(f, "Validation failed: {}", msgs.join(", "))
    }
}

impl std::error::Error for ValidationError {}

// =============================================================================
// API Errors
// =============================================================================

/// Failures reported by the resource handlers
///
/// Every variant renders as an envelope with `success: false`; nothing
/// escapes to the transport as a bare protocol error.
#[derive(Debug)]
pub enum ApiError {
    /// Missing or malformed request parameter or body
    BadRequest { message: String },

    /// Well-formed identifier without a matching record
    NotFound { message: String },

    /// Any failure raised by the persistence layer
    Internal { message: String, detail: String },
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>, detail: impl fmt::Display) -> Self {
        ApiError::Internal {
            message: message.into(),
            detail: detail.to_string(),
        }
    }

    /// Map a model failure: `NotFound` becomes 404, everything else 500
    /// with `context` as the human-readable message.
    pub fn from_model(err: ModelError, context: &str) -> Self {
        if err.is_not_found() {
            ApiError::not_found(super::envelope::messages::NOT_FOUND)
        } else {
            ApiError::internal(context, err)
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            ApiError::BadRequest { .. } => "BAD_REQUEST",
            ApiError::NotFound { .. } => "NOT_FOUND",
            ApiError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    /// Convert to a response envelope
    pub fn to_envelope(&self) -> Envelope {
        match self {
            ApiError::BadRequest { message } | ApiError::NotFound { message } => {
                Envelope::failure(message.clone())
            }
            ApiError::Internal { message, detail } => {
                Envelope::failure(message.clone()).with_error(detail.clone())
            }
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::BadRequest { message } | ApiError::NotFound { message } => {
                write!(f, "{}", message)
            }
            ApiError::Internal { message, detail } => write!(f, "{}: {}", message, detail),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            ApiError::Internal { .. } => tracing::error!(code = self.error_code(), "{}", self),
            _ => tracing::warn!(code = self.error_code(), "{}", self),
        }
        (status, Json(self.to_envelope())).into_response()
    }
}

/// A specialized Result type for handler code
pub type ApiResult<T> = Result<T, ApiError>;

// =============================================================================
// Tests
// =============================================================================
