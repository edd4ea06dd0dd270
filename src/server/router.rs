//! Router builder for the products resource

use super::handlers::{
    ProductAppState, create_product, delete_product, get_product, list_products, update_product,
};
use axum::{Router, routing::get};

/// Build the products routes
///
/// - GET /products - List all products
/// - POST /products - Create a product
/// - GET /products/{id} - Get a product by id
/// - PUT|PATCH /products/{id} - Update some fields of a product
/// - DELETE /products/{id} - Delete a product
pub fn build_product_routes(state: ProductAppState) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route(
            "/products/{id}",
            get(get_product)
                .put(update_product)
                .patch(update_product)
                .delete(delete_product),
        )
        .with_state(state)
}
