//! Storage trait for product records

use crate::core::product::{Product, ProductChanges};
use anyhow::Result;
use async_trait::async_trait;
use uuid::Uuid;

/// Durable storage primitives for products
///
/// Implementations only move records in and out of a backend. They never
/// validate or transform data; that is the job of
/// [`ProductModel`](crate::core::model::ProductModel), which calls these
/// primitives only with records that already passed validation.
#[async_trait]
pub trait ProductStorage: Send + Sync {
    /// List all records in the backend's natural order
    async fn list(&self) -> Result<Vec<Product>>;

    /// Get a record by ID
    async fn get(&self, id: &Uuid) -> Result<Option<Product>>;

    /// Insert a new record and return the stored version
    async fn insert(&self, product: Product) -> Result<Product>;

    /// Write the given fields onto an existing record in one atomic step
    /// and return the updated record
    ///
    /// Fields absent from `changes` keep their stored value. Returns
    /// `Ok(None)` if no record matched `id`.
    async fn update(&self, id: &Uuid, changes: ProductChanges) -> Result<Option<Product>>;

    /// Remove a record and return it
    ///
    /// Returns `Ok(None)` if no record matched `id`.
    async fn remove(&self, id: &Uuid) -> Result<Option<Product>>;
}
