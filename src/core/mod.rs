//! Core module containing the product model, its validation and the storage seam

pub mod envelope;
pub mod error;
pub mod model;
pub mod product;
pub mod store;
pub mod validation;

pub use envelope::Envelope;
pub use error::{ApiError, ApiResult, FieldViolation, ModelError, ValidationError};
pub use model::ProductModel;
pub use product::{Product, ProductChanges, ProductDraft, ProductPatch};
pub use store::ProductStorage;
