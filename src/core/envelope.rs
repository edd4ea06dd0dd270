//! Uniform JSON response wrapper shared by every endpoint

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Human-readable messages carried by the envelopes
pub mod messages {
    pub const ID_REQUIRED: &str = "ID del producto es requerido";
    pub const NOT_FOUND: &str = "Producto no encontrado";
    pub const FIELDS_REQUIRED: &str = "Todos los campos (name, description, price) son requeridos";
    pub const INVALID_PRICE: &str = "El precio debe ser un número positivo";
    pub const EMPTY_UPDATE: &str = "Debe proporcionar al menos un campo para actualizar";
    pub const INVALID_BODY: &str = "El cuerpo de la petición no es un JSON válido";

    pub const CREATED: &str = "Producto creado exitosamente";
    pub const UPDATED: &str = "Producto actualizado exitosamente";
    pub const DELETED: &str = "Producto eliminado exitosamente";

    pub const LIST_FAILED: &str = "Error al obtener los productos";
    pub const GET_FAILED: &str = "Error al obtener el producto";
    pub const CREATE_FAILED: &str = "Error al crear el producto";
    pub const UPDATE_FAILED: &str = "Error al actualizar el producto";
    pub const DELETE_FAILED: &str = "Error al eliminar el producto";
}

/// Response envelope: `{ success, data?, message?, error?, count? }`
///
/// `success` is always present; the optional members are omitted from the
/// JSON when unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,

    /// Raw underlying failure detail, only on 500 responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    /// Number of items, only on list responses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl Envelope {
    pub fn success(data: Value) -> Self {
        Self {
            success: true,
            data: Some(data),
            message: None,
            error: None,
            count: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
            error: None,
            count: None,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = Some(count);
        self
    }
}
