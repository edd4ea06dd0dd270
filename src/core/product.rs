//! Product record, write inputs and the casting of JSON inputs into them

use crate::core::error::{FieldViolation, ValidationError};
use crate::core::validation::validators::required_message;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use uuid::Uuid;

/// Fields a client may write, in schema declaration order
pub const FIELDS: [&str; 4] = ["name", "description", "price", "stock"];

/// A stored product
///
/// Serialized with camelCase keys; this is also the storage representation.
/// Use [`Product::to_json`] for the API representation, which adds the
/// `totalValue` virtual.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Inventory value: `price * stock`
    pub fn total_value(&self) -> f64 {
        self.price * self.stock as f64
    }

    pub fn is_available(&self) -> bool {
        self.stock > 0
    }

    /// API representation, including `totalValue`
    pub fn to_json(&self) -> Value {
        json!({
            "id": self.id,
            "name": self.name,
            "description": self.description,
            "price": self.price,
            "stock": self.stock,
            "createdAt": self.created_at,
            "updatedAt": self.updated_at,
            "totalValue": self.total_value(),
        })
    }
}

/// Candidate field values for a product before validation
///
/// `None` means the field is absent. Used for create inputs and, once
/// merged with a patch, for the candidate state of an update.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductDraft {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<f64>,
}

impl ProductDraft {
    pub fn new(name: impl Into<String>, description: impl Into<String>, price: f64) -> Self {
        Self {
            name: Some(name.into()),
            description: Some(description.into()),
            price: Some(price),
            stock: None,
        }
    }

    pub fn with_stock(mut self, stock: f64) -> Self {
        self.stock = Some(stock);
        self
    }

    /// Fill schema defaults: `stock` defaults to 0
    pub fn with_defaults(mut self) -> Self {
        self.stock.get_or_insert(0.0);
        self
    }

    /// Cast a JSON object into a draft. Unknown keys are ignored.
    pub fn from_json(body: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        let mut draft = ProductDraft::default();

        if let Some(value) = body.get("name") {
            draft.name = collect(cast_text("name", value), &mut violations);
        }
        if let Some(value) = body.get("description") {
            draft.description = collect(cast_text("description", value), &mut violations);
        }
        if let Some(value) = body.get("price") {
            draft.price = collect(cast_number("price", value), &mut violations);
        }
        if let Some(value) = body.get("stock") {
            draft.stock = collect(cast_number("stock", value), &mut violations);
        }

        if violations.is_empty() {
            Ok(draft)
        } else {
            Err(ValidationError::new(violations))
        }
    }

    /// Overlay the fields a patch provides
    pub fn apply(mut self, patch: ProductPatch) -> Self {
        if patch.name.is_some() {
            self.name = patch.name;
        }
        if patch.description.is_some() {
            self.description = patch.description;
        }
        if patch.price.is_some() {
            self.price = patch.price;
        }
        if patch.stock.is_some() {
            self.stock = patch.stock;
        }
        self
    }
}

impl From<&Product> for ProductDraft {
    fn from(product: &Product) -> Self {
        Self {
            name: Some(product.name.clone()),
            description: Some(product.description.clone()),
            price: Some(product.price),
            stock: Some(product.stock as f64),
        }
    }
}

/// A partial update: only the provided fields are `Some`
///
/// `stock` is part of the model API only; the HTTP update endpoint never
/// sets it.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub stock: Option<f64>,
}

impl ProductPatch {
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    pub fn stock(mut self, stock: f64) -> Self {
        self.stock = Some(stock);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.price.is_none()
            && self.stock.is_none()
    }

    /// Cast a JSON object into a patch
    ///
    /// A key that is present but `null` (or blank for numbers) is a request
    /// to unset a required field and is reported as a violation.
    pub fn from_json(fields: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut violations = Vec::new();
        let mut patch = ProductPatch::default();

        if let Some(value) = fields.get("name") {
            patch.name = collect(present(cast_text("name", value), "name"), &mut violations);
        }
        if let Some(value) = fields.get("description") {
            patch.description = collect(
                present(cast_text("description", value), "description"),
                &mut violations,
            );
        }
        if let Some(value) = fields.get("price") {
            patch.price = collect(present(cast_number("price", value), "price"), &mut violations);
        }
        if let Some(value) = fields.get("stock") {
            patch.stock = collect(present(cast_number("stock", value), "stock"), &mut violations);
        }

        if violations.is_empty() {
            Ok(patch)
        } else {
            Err(ValidationError::new(violations))
        }
    }
}

/// Validated field values to write onto a stored product
///
/// Only the `Some` fields are written, together with `updated_at`; every
/// other stored field keeps its current value. Serialized with camelCase
/// keys, unset fields omitted.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductChanges {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<i64>,
    pub updated_at: DateTime<Utc>,
}

impl ProductChanges {
    pub fn new(updated_at: DateTime<Utc>) -> Self {
        Self {
            name: None,
            description: None,
            price: None,
            stock: None,
            updated_at,
        }
    }

    /// Write the changes onto a product in place
    pub fn apply_to(&self, product: &mut Product) {
        if let Some(name) = &self.name {
            product.name = name.clone();
        }
        if let Some(description) = &self.description {
            product.description = description.clone();
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(stock) = self.stock {
            product.stock = stock;
        }
        product.updated_at = self.updated_at;
    }
}

// ---------------------------------------------------------------------------
// Casting helpers
// ---------------------------------------------------------------------------

type Cast<T> = Result<Option<T>, FieldViolation>;

fn collect<T>(cast: Cast<T>, violations: &mut Vec<FieldViolation>) -> Option<T> {
    match cast {
        Ok(value) => value,
        Err(violation) => {
            violations.push(violation);
            None
        }
    }
}

fn present<T>(cast: Cast<T>, field: &str) -> Cast<T> {
    match cast? {
        Some(value) => Ok(Some(value)),
        None => Err(FieldViolation::new(field, required_message(field))),
    }
}

fn cast_failure(field: &str, kind: &str, value: &Value) -> FieldViolation {
    FieldViolation::new(
        field,
        format!("Cast to {} failed for value \"{}\" at path \"{}\"", kind, value, field),
    )
}

/// Strings as-is, numbers and booleans as text, null as absent
fn cast_text(field: &str, value: &Value) -> Cast<String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Number(n) => Ok(Some(n.to_string())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Array(_) | Value::Object(_) => Err(cast_failure(field, "string", value)),
    }
}

/// Numbers as-is, numeric strings parsed, booleans as 1/0, null or blank as absent
fn cast_number(field: &str, value: &Value) -> Cast<f64> {
    match value {
        Value::Null => Ok(None),
        Value::Number(n) => n
            .as_f64()
            .map(Some)
            .ok_or_else(|| cast_failure(field, "Number", value)),
        Value::Bool(b) => Ok(Some(if *b { 1.0 } else { 0.0 })),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| cast_failure(field, "Number", value)),
        Value::Array(_) | Value::Object(_) => Err(cast_failure(field, "Number", value)),
    }
}
