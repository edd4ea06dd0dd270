//! MongoDB storage backend using the official MongoDB async driver.
//!
//! Provides `MongoProductStorage`, a `ProductStorage` backed by a MongoDB
//! collection via `mongodb::Database`.
//!
//! # Feature flag
//!
//! This module is gated behind the `mongodb_backend` feature flag:
//! ```toml
//! [dependencies]
//! products-api = { version = "0.1", features = ["mongodb_backend"] }
//! ```
//!
//! # Serialization strategy
//!
//! Products are serialized via `serde_json::Value` as an intermediate format,
//! then converted to BSON documents. This ensures consistent handling of
//! UUID (stored as strings) and DateTime (stored as ISO 8601 strings) types.
//! The `id` field is mapped to MongoDB's `_id` convention and mapped back on
//! read, so the storage key never leaks into the API.

use crate::core::{Product, ProductChanges, ProductStorage};
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use futures::TryStreamExt;
use mongodb::bson::{Bson, Document, doc};
use mongodb::options::ReturnDocument;
use mongodb::{Database, IndexModel};
use uuid::Uuid;

/// Default collection name
pub const DEFAULT_COLLECTION: &str = "products";

// ---------------------------------------------------------------------------
// Conversion helpers
// ---------------------------------------------------------------------------

/// Convert a serde_json::Value (expected to be an Object) into a BSON Document,
/// renaming `id` → `_id` for MongoDB convention.
fn json_to_document(json: serde_json::Value) -> Result<Document> {
    let bson_val = mongodb::bson::to_bson(&json)
        .map_err(|e| anyhow!("Failed to convert JSON to BSON: {}", e))?;

    let mut doc = match bson_val {
        Bson::Document(d) => d,
        _ => return Err(anyhow!("Expected BSON document, got non-object")),
    };

    if let Some(id) = doc.remove("id") {
        doc.insert("_id", id);
    }

    Ok(doc)
}

/// Convert a BSON Document back into a serde_json::Value,
/// renaming `_id` → `id` for domain convention.
fn document_to_json(mut doc: Document) -> serde_json::Value {
    if let Some(id) = doc.remove("_id") {
        doc.insert("id", id);
    }

    Bson::Document(doc).into_relaxed_extjson()
}

/// Convert a UUID to its BSON string representation for queries.
fn uuid_bson(id: &Uuid) -> Bson {
    Bson::String(id.to_string())
}

fn product_to_document(product: &Product) -> Result<Document> {
    let json = serde_json::to_value(product)
        .map_err(|e| anyhow!("Failed to serialize product: {}", e))?;
    json_to_document(json)
}

/// `$set` document holding only the fields present in `changes`
fn changes_to_document(changes: &ProductChanges) -> Result<Document> {
    let json = serde_json::to_value(changes)
        .map_err(|e| anyhow!("Failed to serialize product changes: {}", e))?;
    json_to_document(json)
}

fn document_to_product(doc: Document) -> Result<Product> {
    serde_json::from_value(document_to_json(doc))
        .map_err(|e| anyhow!("Failed to deserialize product from document: {}", e))
}

// ---------------------------------------------------------------------------
// MongoProductStorage
// ---------------------------------------------------------------------------

/// Product storage backed by a MongoDB collection.
///
/// # Example
///
/// ```rust,ignore
/// use mongodb::Client;
/// use products::storage::MongoProductStorage;
///
/// let client = Client::with_uri_str("mongodb://localhost:27017").await?;
/// let storage = MongoProductStorage::new(client.database("shop"));
/// storage.ensure_indexes().await?;
/// ```
#[derive(Clone, Debug)]
pub struct MongoProductStorage {
    database: Database,
    collection_name: String,
}

impl MongoProductStorage {
    /// Create a storage over the default `products` collection.
    pub fn new(database: Database) -> Self {
        Self::with_collection(database, DEFAULT_COLLECTION)
    }

    pub fn with_collection(database: Database, collection_name: impl Into<String>) -> Self {
        Self {
            database,
            collection_name: collection_name.into(),
        }
    }

    /// Get a reference to the underlying database.
    pub fn database(&self) -> &Database {
        &self.database
    }

    fn collection(&self) -> mongodb::Collection<Document> {
        self.database.collection(&self.collection_name)
    }

    /// Create the lookup indexes: `name` and `price` ascending,
    /// `createdAt` descending. Idempotent.
    pub async fn ensure_indexes(&self) -> Result<()> {
        let indexes = vec![
            IndexModel::builder().keys(doc! { "name": 1 }).build(),
            IndexModel::builder().keys(doc! { "price": 1 }).build(),
            IndexModel::builder().keys(doc! { "createdAt": -1 }).build(),
        ];

        self.collection()
            .create_indexes(indexes)
            .await
            .map_err(|e| anyhow!("Failed to create indexes: {}", e))?;

        tracing::debug!(collection = %self.collection_name, "Indexes ensured");
        Ok(())
    }
}

#[async_trait]
impl ProductStorage for MongoProductStorage {
    /// List all products in natural order.
    async fn list(&self) -> Result<Vec<Product>> {
        let cursor = self
            .collection()
            .find(doc! {})
            .await
            .map_err(|e| anyhow!("Failed to list products: {}", e))?;

        let docs: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| anyhow!("Failed to collect products: {}", e))?;

        docs.into_iter().map(document_to_product).collect()
    }

    async fn get(&self, id: &Uuid) -> Result<Option<Product>> {
        let doc = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to get product: {}", e))?;

        doc.map(document_to_product).transpose()
    }

    /// Insert the document and read it back to return the stored version.
    async fn insert(&self, product: Product) -> Result<Product> {
        let doc = product_to_document(&product)?;

        self.collection()
            .insert_one(doc)
            .await
            .map_err(|e| anyhow!("Failed to create product: {}", e))?;

        let stored = self
            .collection()
            .find_one(doc! { "_id": uuid_bson(&product.id) })
            .await
            .map_err(|e| anyhow!("Failed to read back created product: {}", e))?
            .ok_or_else(|| anyhow!("Product not found after insert"))?;

        document_to_product(stored)
    }

    /// Apply the changes with `$set`, leaving other fields untouched.
    async fn update(&self, id: &Uuid, changes: ProductChanges) -> Result<Option<Product>> {
        let set = changes_to_document(&changes)?;

        let updated = self
            .collection()
            .find_one_and_update(doc! { "_id": uuid_bson(id) }, doc! { "$set": set })
            .return_document(ReturnDocument::After)
            .await
            .map_err(|e| anyhow!("Failed to update product: {}", e))?;

        updated.map(document_to_product).transpose()
    }

    async fn remove(&self, id: &Uuid) -> Result<Option<Product>> {
        let deleted = self
            .collection()
            .find_one_and_delete(doc! { "_id": uuid_bson(id) })
            .await
            .map_err(|e| anyhow!("Failed to delete product: {}", e))?;

        deleted.map(document_to_product).transpose()
    }
}
