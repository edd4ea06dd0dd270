//! REST API exposure
//!
//! Consumes a `ProductModel` and produces an Axum `Router` with the health
//! routes, the products routes and any custom routes merged together.

use crate::core::ProductModel;
use crate::server::handlers::ProductAppState;
use crate::server::router::build_product_routes;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};

/// Name reported by the health endpoints
pub const SERVICE_NAME: &str = "products-api";

/// REST API exposure implementation
pub struct RestExposure;

impl RestExposure {
    /// Build the REST router over a model
    ///
    /// Returns a router with:
    /// - Health check routes
    /// - Products CRUD routes
    /// - Custom routes
    pub fn build_router(model: ProductModel, custom_routes: Vec<Router>) -> Router {
        let mut app = Self::health_routes().merge(build_product_routes(ProductAppState::new(model)));

        for custom_router in custom_routes {
            app = app.merge(custom_router);
        }

        app
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(Self::health_check))
            .route("/healthz", get(Self::health_check))
    }

    async fn health_check() -> Json<Value> {
        Json(json!({
            "status": "ok",
            "service": SERVICE_NAME
        }))
    }
}
