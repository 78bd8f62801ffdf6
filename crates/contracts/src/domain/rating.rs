use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-product rating, stored in its own store.
///
/// `product_id` is a weak back-reference to a product's external identifier:
/// nothing enforces it across the store boundary, it is resolvable only by
/// value lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rating {
    pub id: String,
    pub product_id: i32,
    pub rate: f64,
    pub count: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// Payload for creating a rating, single or bulk.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRatingDto {
    pub product_id: i32,
    pub rate: f64,
    pub count: i32,
}
