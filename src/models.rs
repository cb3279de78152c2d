use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// A single inventory item as stored and returned by the API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct Item {
    pub id: i32,
    pub name: String,
    pub quantity: i32,
    pub value: f64,
}

/// Validated fields an update may change; the id is never one of them
#[derive(Debug, Clone, PartialEq)]
pub struct ItemChanges {
    pub name: String,
    pub quantity: i32,
    pub value: f64,
}

impl Item {
    pub fn apply(&mut self, changes: ItemChanges) {
        self.name = changes.name;
        self.quantity = changes.quantity;
        self.value = changes.value;
    }
}

/// Request body for POST /item and PUT /item/{id}
///
/// Fields are optional on the wire so a partial body is reported as
/// invalid input instead of a deserialization failure.
#[derive(Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ItemPayload {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub quantity: Option<i32>,
    pub value: Option<f64>,
}

impl ItemPayload {
    /// Validate a creation request. All four fields are required.
    pub fn into_item(self) -> Result<Item, ApiError> {
        let id = self
            .id
            .ok_or_else(|| ApiError::InvalidInput("id is required".to_string()))?;
        let changes = self.into_changes_unchecked()?;

        Ok(Item {
            id,
            name: changes.name,
            quantity: changes.quantity,
            value: changes.value,
        })
    }

    /// Validate an update request addressed to `path_id`.
    ///
    /// The body may omit `id`; when present it has to match the path.
    pub fn into_changes(self, path_id: i32) -> Result<ItemChanges, ApiError> {
        if let Some(body_id) = self.id {
            if body_id != path_id {
                return Err(ApiError::InvalidInput(format!(
                    "body id {} does not match path id {}",
                    body_id, path_id
                )));
            }
        }
        self.into_changes_unchecked()
    }

    fn into_changes_unchecked(self) -> Result<ItemChanges, ApiError> {
        let name = self
            .name
            .ok_or_else(|| ApiError::InvalidInput("name is required".to_string()))?;
        if name.is_empty() {
            return Err(ApiError::InvalidInput("name must not be empty".to_string()));
        }

        let quantity = self
            .quantity
            .ok_or_else(|| ApiError::InvalidInput("quantity is required".to_string()))?;
        if quantity < 0 {
            return Err(ApiError::InvalidInput(format!(
                "quantity must be >= 0, got {}",
                quantity
            )));
        }

        let value = self
            .value
            .ok_or_else(|| ApiError::InvalidInput("value is required".to_string()))?;
        if !value.is_finite() || value <= 0.0 {
            return Err(ApiError::InvalidInput(format!(
                "value must be > 0, got {}",
                value
            )));
        }

        Ok(ItemChanges {
            name,
            quantity,
            value,
        })
    }
}
