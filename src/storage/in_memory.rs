//! In-memory implementation of ProductStorage for testing and development

use crate::core::{Product, ProductChanges, ProductStorage};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use indexmap::IndexMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory product storage implementation
///
/// Useful for testing and development. Records are kept in insertion order,
/// which is the order `list` returns. Uses RwLock for thread-safe access.
#[derive(Clone)]
pub struct InMemoryProductStorage {
    products: Arc<RwLock<IndexMap<Uuid, Product>>>,
}

impl InMemoryProductStorage {
    /// Create a new in-memory product storage
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(IndexMap::new())),
        }
    }
}

impl Default for InMemoryProductStorage {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ProductStorage for InMemoryProductStorage {
    async fn list(&self) -> Result<Vec<Product>> {
        let products = self
            .products
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(products.values().cloned().collect())
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Product>> {
        let products = self
            .products
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(products.get(id).cloned())
    }

    async fn insert(&self, product: Product) -> Result<Product> {
        let mut products = self
            .products
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        if products.contains_key(&product.id) {
            return Err(anyhow!("Duplicate key: product {} already exists", product.id));
        }
        products.insert(product.id, product.clone());

        Ok(product)
    }

    async fn update(&self, id: &Uuid, changes: ProductChanges) -> Result<Option<Product>> {
        let mut products = self
            .products
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(products.get_mut(id).map(|product| {
            changes.apply_to(product);
            product.clone()
        }))
    }

    async fn remove(&self, id: &Uuid) -> Result<Option<Product>> {
        let mut products = self
            .products
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        Ok(products.shift_remove(id))
    }
}
