use contracts::domain::rating::{CreateRatingDto, Rating};

use super::repository;
use crate::shared::error::AppError;

/// Façade over the rating repository. The product side only reaches the
/// rating store through here, keeping the cross-store dependency a single
/// explicit seam.

pub async fn create(dto: CreateRatingDto) -> Result<Rating, AppError> {
    repository::insert(dto).await
}

pub async fn bulk_create(dtos: Vec<CreateRatingDto>) -> Result<Vec<Rating>, AppError> {
    repository::bulk_insert(dtos).await
}

pub async fn find_by_product_id(product_id: i32) -> Result<Option<Rating>, AppError> {
    repository::get_by_product_id(product_id).await
}

pub async fn clear_all() -> Result<u64, AppError> {
    repository::delete_all().await
}
