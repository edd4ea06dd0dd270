//! Shared test harness for product storage backends
//!
//! Provides factories for products and drafts plus two macro-generated
//! suites:
//! - `product_storage_tests!` checks a `ProductStorage` and the
//!   `ProductModel` running over it
//! - `rest_integration_tests!` drives the full HTTP stack through
//!   `axum_test::TestServer`
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//!
//! use storage_harness::*;
//!
//! product_storage_tests!(InMemoryProductStorage::new());
//! rest_integration_tests!(InMemoryProductStorage::new());
//! ```

#![allow(dead_code)]



use chrono::Utc;
use products::core::{Product, ProductDraft};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Factories
// ---------------------------------------------------------------------------

/// A stored product with a fresh id and timestamps.
///
/// Values are written as given, bypassing the model's normalization.
pub fn create_test_product(name: &str, price: f64, stock: i64) -> Product {
    let now = Utc::now();
    Product {
        id: Uuid::new_v4(),
        name: name.to_string(),
        description: format!("{} for integration tests", name),
        price,
        stock,
        created_at: now,
        updated_at: now,
    }
}

/// A valid draft whose normalized form is `Tv` at 200.0 with no stock.
pub fn tv_draft() -> ProductDraft {
    ProductDraft::new("tv", "a flat screen tv", 199.999)
}

/// JSON body of a valid create request.
pub fn tv_body() -> serde_json::Value {
    serde_json::json!({
        "name": "tv",
        "description": "a flat screen tv",
        "price": 199.999
    })
}
