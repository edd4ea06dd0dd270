//! Validation and normalization of product data
//!
//! Writes go through three explicit steps, identical for create and update:
//!
//! 1. [`sanitize`] trims the text fields,
//! 2. [`validate`] checks every field and returns all violations,
//! 3. [`normalize`] capitalizes the name and rounds the price.
//!
//! Nothing is stored unless step 2 returned no violations.

pub mod extractor;
pub mod filters;
pub mod validators;

pub use extractor::JsonObject;

use crate::core::error::FieldViolation;
use crate::core::product::ProductDraft;
use validators::{finite, integer, max_value, min_value, required_message, string_length};

pub const NAME_MIN: u64 = 2;
pub const NAME_MAX: u64 = 100;
pub const DESCRIPTION_MIN: u64 = 10;
pub const DESCRIPTION_MAX: u64 = 500;
pub const PRICE_DECIMALS: u32 = 2;
/// Largest whole number a double holds exactly; fits an `i64`
pub const STOCK_MAX: f64 = 9_007_199_254_740_991.0;

const NAME_TOO_SHORT: &str = "El nombre debe tener al menos 2 caracteres";
const NAME_TOO_LONG: &str = "El nombre no puede exceder 100 caracteres";
const DESCRIPTION_TOO_SHORT: &str = "La descripción debe tener al menos 10 caracteres";
const DESCRIPTION_TOO_LONG: &str = "La descripción no puede exceder 500 caracteres";
const PRICE_NEGATIVE: &str = "El precio debe ser mayor o igual a 0";
const PRICE_INVALID: &str = "El precio debe ser un número válido mayor o igual a 0";
const STOCK_NEGATIVE: &str = "El stock debe ser mayor o igual a 0";
const STOCK_NOT_INTEGER: &str = "El stock debe ser un número entero";
const STOCK_TOO_LARGE: &str = "El stock no puede exceder 9007199254740991";

fn violation(field: &str, result: Result<(), String>) -> Option<FieldViolation> {
    result.err().map(|message| FieldViolation::new(field, message))
}

fn missing(field: &str) -> Option<FieldViolation> {
    Some(FieldViolation::new(field, required_message(field)))
}

pub fn validate_name(name: Option<&str>) -> Option<FieldViolation> {
    let Some(name) = name else {
        return missing("name");
    };
    violation(
        "name",
        string_length(NAME_MIN, NAME_MAX, NAME_TOO_SHORT, NAME_TOO_LONG)(name),
    )
}

pub fn validate_description(description: Option<&str>) -> Option<FieldViolation> {
    let Some(description) = description else {
        return missing("description");
    };
    violation(
        "description",
        string_length(
            DESCRIPTION_MIN,
            DESCRIPTION_MAX,
            DESCRIPTION_TOO_SHORT,
            DESCRIPTION_TOO_LONG,
        )(description),
    )
}

pub fn validate_price(price: Option<f64>) -> Option<FieldViolation> {
    let Some(price) = price else {
        return missing("price");
    };
    violation(
        "price",
        min_value(0.0, PRICE_NEGATIVE)(price).and_then(|_| finite(PRICE_INVALID)(price)),
    )
}

pub fn validate_stock(stock: Option<f64>) -> Option<FieldViolation> {
    let Some(stock) = stock else {
        return missing("stock");
    };
    violation(
        "stock",
        min_value(0.0, STOCK_NEGATIVE)(stock)
            .and_then(|_| integer(STOCK_NOT_INTEGER)(stock))
            .and_then(|_| max_value(STOCK_MAX, STOCK_TOO_LARGE)(stock)),
    )
}

/// Check every field of a candidate record
///
/// Reports at most one violation per field (the first rule that fails), in
/// field declaration order. An empty result means the draft can be stored.
pub fn validate(draft: &ProductDraft) -> Vec<FieldViolation> {
    [
        validate_name(draft.name.as_deref()),
        validate_description(draft.description.as_deref()),
        validate_price(draft.price),
        validate_stock(draft.stock),
    ]
    .into_iter()
    .flatten()
    .collect()
}

/// Trim the text fields
pub fn sanitize(mut draft: ProductDraft) -> ProductDraft {
    draft.name = draft.name.as_deref().map(filters::trim);
    draft.description = draft.description.as_deref().map(filters::trim);
    draft
}

/// Apply the pre-save transformations: capitalized name, price rounded to
/// two decimals
pub fn normalize(mut draft: ProductDraft) -> ProductDraft {
    draft.name = draft.name.as_deref().map(filters::capitalize);
    let round = filters::round_decimals(PRICE_DECIMALS);
    // adding 0.0 turns -0.0 into 0.0
    draft.price = draft.price.map(|price| round(price) + 0.0);
    draft
}
