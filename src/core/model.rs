//! Persistence model for products
//!
//! `ProductModel` owns the schema rules: it casts identifiers, runs
//! [`sanitize`], [`validate`] and [`normalize`] before every write, manages
//! the timestamps and maps storage results to [`ModelError`]s.

use crate::core::error::{ModelError, ValidationError};
use crate::core::product::{Product, ProductChanges, ProductDraft, ProductPatch};
use crate::core::store::ProductStorage;
use crate::core::validation::{normalize, sanitize, validate};
use anyhow::anyhow;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

/// Field values that passed validation and normalization
struct ValidFields {
    name: String,
    description: String,
    price: f64,
    stock: i64,
}

/// Run the write pipeline on a candidate record
fn prepare(draft: ProductDraft) -> Result<ValidFields, ModelError> {
    let draft = sanitize(draft);

    let violations = validate(&draft);
    if !violations.is_empty() {
        return Err(ValidationError::new(violations).into());
    }

    match normalize(draft) {
        ProductDraft {
            name: Some(name),
            description: Some(description),
            price: Some(price),
            stock: Some(stock),
        } => Ok(ValidFields {
            name,
            description,
            price,
            stock: stock as i64,
        }),
        _ => Err(ModelError::Storage(anyhow!(
            "incomplete product after validation"
        ))),
    }
}

/// Parse a product identifier
pub fn parse_id(id: &str) -> Result<Uuid, ModelError> {
    Uuid::parse_str(id.trim()).map_err(|_| ModelError::InvalidIdentifier {
        value: id.to_string(),
    })
}

/// Schema-enforcing access to product storage
///
/// Cheap to clone; clones share the same storage.
#[derive(Clone)]
pub struct ProductModel {
    storage: Arc<dyn ProductStorage>,
}

impl ProductModel {
    pub fn new(storage: impl ProductStorage + 'static) -> Self {
        Self {
            storage: Arc::new(storage),
        }
    }

    pub fn from_arc(storage: Arc<dyn ProductStorage>) -> Self {
        Self { storage }
    }

    /// All stored products
    pub async fn find_all(&self) -> Result<Vec<Product>, ModelError> {
        Ok(self.storage.list().await?)
    }

    /// Products with stock on hand
    pub async fn find_available(&self) -> Result<Vec<Product>, ModelError> {
        let mut products = self.find_all().await?;
        products.retain(Product::is_available);
        Ok(products)
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Product, ModelError> {
        let id = parse_id(id)?;
        self.storage
            .get(&id)
            .await?
            .ok_or(ModelError::NotFound { id })
    }

    /// Validate, normalize and store a new product
    ///
    /// `stock` defaults to 0; the id and both timestamps are assigned here.
    pub async fn create(&self, draft: ProductDraft) -> Result<Product, ModelError> {
        let fields = prepare(draft.with_defaults())?;
        let now = Utc::now();

        let product = Product {
            id: Uuid::new_v4(),
            name: fields.name,
            description: fields.description,
            price: fields.price,
            stock: fields.stock,
            created_at: now,
            updated_at: now,
        };

        let created = self.storage.insert(product).await?;
        tracing::info!(product_id = %created.id, "Product created");
        Ok(created)
    }

    /// Apply the provided fields to an existing product
    ///
    /// The merged record is validated with the same rules as `create` and
    /// nothing is written when a rule fails. Only the provided fields (and
    /// `updatedAt`) are written, so concurrent updates of different fields
    /// do not overwrite each other.
    pub async fn update_by_id(
        &self,
        id: &str,
        patch: ProductPatch,
    ) -> Result<Product, ModelError> {
        let id = parse_id(id)?;
        let existing = self
            .storage
            .get(&id)
            .await?
            .ok_or(ModelError::NotFound { id })?;

        let provided = patch.clone();
        let fields = prepare(ProductDraft::from(&existing).apply(patch))?;

        let changes = ProductChanges {
            name: provided.name.map(|_| fields.name),
            description: provided.description.map(|_| fields.description),
            price: provided.price.map(|_| fields.price),
            stock: provided.stock.map(|_| fields.stock),
            updated_at: Utc::now(),
        };

        let updated = self
            .storage
            .update(&id, changes)
            .await?
            .ok_or(ModelError::NotFound { id })?;
        tracing::info!(product_id = %id, "Product updated");
        Ok(updated)
    }

    /// Remove a product and return it
    pub async fn delete_by_id(&self, id: &str) -> Result<Product, ModelError> {
        let id = parse_id(id)?;
        let deleted = self
            .storage
            .remove(&id)
            .await?
            .ok_or(ModelError::NotFound { id })?;
        tracing::info!(product_id = %id, "Product deleted");
        Ok(deleted)
    }
}
