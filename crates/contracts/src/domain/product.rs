use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum length of a product name, mirrors the varchar(255) column.
pub const MAX_NAME_LENGTH: usize = 255;

/// Catalog product as stored in the product store.
///
/// `id` is the generated surrogate key; `product_id` is the externally
/// sourced identifier. Both `product_id` and `name` are unique.
/// `deleted_at` set means the row is retired and invisible to active reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub product_id: i32,
    pub name: String,
    pub price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

impl Product {
    pub fn is_active(&self) -> bool {
        self.deleted_at.is_none()
    }
}

/// Payload for creating a single product.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateProductDto {
    pub product_id: i32,
    pub name: String,
    pub price: f64,
}

impl CreateProductDto {
    pub fn validate(&self) -> Result<(), String> {
        if self.name.trim().is_empty() {
            return Err("Product name is required".into());
        }
        if self.name.chars().count() > MAX_NAME_LENGTH {
            return Err(format!(
                "Product name must not exceed {} characters",
                MAX_NAME_LENGTH
            ));
        }
        if self.price < 0.0 {
            return Err("Price must be greater than or equal to 0".into());
        }
        Ok(())
    }
}

/// Partial update payload. Absent fields are left unchanged; there is no
/// explicit-reset form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateProductDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl UpdateProductDto {
    /// True when no field is present, i.e. the patch is a no-op.
    pub fn is_empty(&self) -> bool {
        self.product_id.is_none() && self.name.is_none() && self.price.is_none()
    }

    pub fn validate(&self) -> Result<(), String> {
        if let Some(ref name) = self.name {
            if name.trim().is_empty() {
                return Err("Product name must not be empty".into());
            }
            if name.chars().count() > MAX_NAME_LENGTH {
                return Err(format!(
                    "Product name must not exceed {} characters",
                    MAX_NAME_LENGTH
                ));
            }
        }
        if let Some(price) = self.price {
            if price < 0.0 {
                return Err("Price must be greater than or equal to 0".into());
            }
        }
        Ok(())
    }
}

/// Result of a soft delete, echoed back to the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeletedProductDto {
    pub id: String,
    pub deleted: bool,
}
