//! HTTP handlers for the products resource
//!
//! Each handler validates the request shape (presence of the id, required
//! body fields, a non-negative numeric price), delegates to the
//! [`ProductModel`] and wraps the outcome in an [`Envelope`].
//!
//! Domain validation belongs to the model. Anything the model rejects,
//! including its own field validation, is reported as a 500 envelope with
//! the raw error detail; only missing records become 404.

use axum::{
    Json,
    extract::{Path, State, rejection::PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::{Map, Value};

use crate::core::envelope::{Envelope, messages};
use crate::core::error::{ApiError, ApiResult, ModelError};
use crate::core::model::ProductModel;
use crate::core::product::{Product, ProductDraft, ProductPatch};
use crate::core::validation::JsonObject;

/// Fields a client may change through the update endpoint
const UPDATABLE_FIELDS: [&str; 3] = ["name", "description", "price"];

/// Application state shared across handlers
#[derive(Clone)]
pub struct ProductAppState {
    pub model: ProductModel,
}

impl ProductAppState {
    pub fn new(model: ProductModel) -> Self {
        Self { model }
    }
}

fn reply(status: StatusCode, envelope: Envelope) -> Response {
    (status, Json(envelope)).into_response()
}

fn require_id(id: &str) -> ApiResult<()> {
    if id.trim().is_empty() {
        Err(ApiError::bad_request(messages::ID_REQUIRED))
    } else {
        Ok(())
    }
}

/// The `{id}` path segment; a segment axum cannot decode is a 400 envelope
fn product_id(path: Result<Path<String>, PathRejection>) -> ApiResult<String> {
    let Path(id) = path.map_err(|rejection| {
        tracing::debug!(error = %rejection.body_text(), "Rejected product id");
        ApiError::bad_request(rejection.body_text())
    })?;
    require_id(&id)?;
    Ok(id)
}

/// Absent, `null`, `false`, `0` and `""` all count as not provided
fn is_falsy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::Bool(b)) => !b,
        Some(Value::Number(n)) => n.as_f64() == Some(0.0),
        Some(Value::String(s)) => s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => false,
    }
}

/// The price must be a JSON number and not negative
fn check_price(price: &Value) -> ApiResult<()> {
    match price.as_f64() {
        Some(p) if p >= 0.0 => Ok(()),
        _ => Err(ApiError::bad_request(messages::INVALID_PRICE)),
    }
}

fn product_list(products: &[Product]) -> Value {
    Value::Array(products.iter().map(Product::to_json).collect())
}

/// List all products
///
/// GET /products
pub async fn list_products(State(state): State<ProductAppState>) -> ApiResult<Response> {
    let products = state
        .model
        .find_all()
        .await
        .map_err(|e| ApiError::from_model(e, messages::LIST_FAILED))?;

    tracing::debug!(count = products.len(), "Listed products");

    let count = products.len();
    Ok(reply(
        StatusCode::OK,
        Envelope::success(product_list(&products)).with_count(count),
    ))
}

/// Get a single product
///
/// GET /products/{id}
pub async fn get_product(
    State(state): State<ProductAppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    let id = product_id(path)?;

    let product = state
        .model
        .find_by_id(&id)
        .await
        .map_err(|e| ApiError::from_model(e, messages::GET_FAILED))?;

    tracing::debug!(product_id = %product.id, "Fetched product");

    Ok(reply(StatusCode::OK, Envelope::success(product.to_json())))
}

/// Create a product
///
/// POST /products
///
/// Body: `{ "name": "...", "description": "...", "price": N, "stock"?: N }`
pub async fn create_product(
    State(state): State<ProductAppState>,
    JsonObject(body): JsonObject,
) -> ApiResult<Response> {
    if is_falsy(body.get("name"))
        || is_falsy(body.get("description"))
        || !body.contains_key("price")
    {
        return Err(ApiError::bad_request(messages::FIELDS_REQUIRED));
    }

    if let Some(price) = body.get("price") {
        check_price(price)?;
    }

    let draft = ProductDraft::from_json(&body)
        .map_err(|e| ApiError::internal(messages::CREATE_FAILED, ModelError::from(e)))?;

    let created = state
        .model
        .create(draft)
        .await
        .map_err(|e| ApiError::from_model(e, messages::CREATE_FAILED))?;

    Ok(reply(
        StatusCode::CREATED,
        Envelope::success(created.to_json()).with_message(messages::CREATED),
    ))
}

/// Update some fields of a product
///
/// PUT /products/{id}
/// PATCH /products/{id}
///
/// Only the keys present in the body are written; `null` counts as present.
pub async fn update_product(
    State(state): State<ProductAppState>,
    path: Result<Path<String>, PathRejection>,
    JsonObject(body): JsonObject,
) -> ApiResult<Response> {
    let id = product_id(path)?;

    let mut update_set = Map::new();
    for field in UPDATABLE_FIELDS {
        let Some(value) = body.get(field) else {
            continue;
        };
        if field == "price" {
            check_price(value)?;
        }
        update_set.insert(field.to_string(), value.clone());
    }

    if update_set.is_empty() {
        return Err(ApiError::bad_request(messages::EMPTY_UPDATE));
    }

    let patch = ProductPatch::from_json(&update_set)
        .map_err(|e| ApiError::internal(messages::UPDATE_FAILED, ModelError::from(e)))?;

    let updated = state
        .model
        .update_by_id(&id, patch)
        .await
        .map_err(|e| ApiError::from_model(e, messages::UPDATE_FAILED))?;

    Ok(reply(
        StatusCode::OK,
        Envelope::success(updated.to_json()).with_message(messages::UPDATED),
    ))
}

/// Delete a product and return it
///
/// DELETE /products/{id}
pub async fn delete_product(
    State(state): State<ProductAppState>,
    path: Result<Path<String>, PathRejection>,
) -> ApiResult<Response> {
    let id = product_id(path)?;

    let deleted = state
        .model
        .delete_by_id(&id)
        .await
        .map_err(|e| ApiError::from_model(e, messages::DELETE_FAILED))?;

    Ok(reply(
        StatusCode::OK,
        Envelope::success(deleted.to_json()).with_message(messages::DELETED),
    ))
}
