//! Axum extractor for request bodies
//!
//! This module provides the `JsonObject` extractor that parses a request body
//! into a JSON object, answering malformed bodies with a 400 envelope instead
//! of axum's plain-text rejection.

use crate::core::envelope::messages;
use crate::core::error::ApiError;
use axum::{
    body::Bytes,
    extract::{FromRequest, Request},
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

/// A request body parsed as a JSON object
///
/// An empty body is read as `{}`. The content type is not enforced.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_product(JsonObject(body): JsonObject) -> ApiResult<Response> {
///     // body is a serde_json::Map
/// }
/// ```
#[derive(Debug, Clone, Default)]
pub struct JsonObject(pub Map<String, Value>);

impl JsonObject {
    /// Parse raw bytes into an object
    pub fn parse(bytes: &[u8]) -> Result<Self, ApiError> {
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(bytes) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(ApiError::bad_request(messages::INVALID_BODY)),
            Err(e) => {
                tracing::debug!(error = %e, "Rejected malformed JSON body");
                Err(ApiError::bad_request(messages::INVALID_BODY))
            }
        }
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl<S> FromRequest<S> for JsonObject
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let bytes = Bytes::from_request(req, state)
            .await
            .map_err(|e| ApiError::bad_request(e.body_text()).into_response())?;

        Self::parse(&bytes).map_err(IntoResponse::into_response)
    }
}
