//! # products-api
//!
//! A REST service managing a catalog of products backed by a document store.
//!
//! ## Features
//!
//! - **CRUD over `/products`**: list, get, create, update (PUT or PATCH), delete
//! - **Schema rules in one place**: every write is sanitized, validated and
//!   normalized by [`core::ProductModel`] before it reaches storage
//! - **Uniform envelopes**: `{ success, data, message, error, count }`
//! - **Pluggable storage**: in-memory by default, MongoDB behind the
//!   `mongodb_backend` feature
//! - **Configuration-Based**: YAML configuration with environment overrides
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use products::prelude::*;
//!
//! let model = ProductModel::new(InMemoryProductStorage::new());
//! let created = model
//!     .create(ProductDraft::new("tv", "a flat screen tv", 199.999))
//!     .await?;
//! assert_eq!(created.name, "Tv");
//! assert_eq!(created.price, 200.0);
//!
//! ServerBuilder::new()
//!     .with_model(model)
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core ===
    pub use crate::core::{
        ApiError, ApiResult, Envelope, FieldViolation, ModelError, Product, ProductDraft,
        ProductModel, ProductPatch, ProductStorage, ValidationError,
    };

    // === Storage ===
    pub use crate::storage::InMemoryProductStorage;
    #[cfg(feature = "mongodb_backend")]
    pub use crate::storage::MongoProductStorage;

    // === Config ===
    pub use crate::config::{ServerConfig, ServiceConfig, StorageBackend, StorageConfig};

    // === Server ===
    pub use crate::server::{ProductAppState, ServerBuilder};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use uuid::Uuid;
}
