use contracts::domain::product::{
    CreateProductDto, DeletedProductDto, Product, UpdateProductDto,
};
use contracts::shared::response::PageMeta;

use super::repository;
use crate::shared::error::AppError;

/// Create a single product. The existence pre-checks give a friendlier
/// Conflict message; the storage constraint is the actual enforcement under
/// concurrency, and the repository classifies its violations as Conflict too.
pub async fn create(dto: CreateProductDto) -> Result<Product, AppError> {
    dto.validate().map_err(AppError::Validation)?;

    if repository::get_by_name(&dto.name).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Product with name \"{}\" already exists",
            dto.name
        )));
    }

    if repository::get_by_product_id(dto.product_id).await?.is_some() {
        return Err(AppError::Conflict(format!(
            "Product with product_id {} already exists",
            dto.product_id
        )));
    }

    let product = repository::insert(dto).await?;
    tracing::info!("Product created: {}", product.id);
    Ok(product)
}

/// Partial update of the active row matching id. An empty patch is a no-op
/// returning the unchanged row.
pub async fn update(id: &str, patch: UpdateProductDto) -> Result<Product, AppError> {
    patch.validate().map_err(AppError::Validation)?;

    let existing = repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))?;

    if patch.is_empty() {
        return Ok(existing);
    }

    if let Some(ref name) = patch.name {
        if let Some(other) = repository::get_by_name(name).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Product with name \"{}\" already exists",
                    name
                )));
            }
        }
    }

    if let Some(product_id) = patch.product_id {
        if let Some(other) = repository::get_by_product_id(product_id).await? {
            if other.id != id {
                return Err(AppError::Conflict(format!(
                    "Product with product_id {} already exists",
                    product_id
                )));
            }
        }
    }

    let updated = repository::update(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Failed to update product with ID {}", id)))?;

    tracing::info!("Product updated: {}", id);
    Ok(updated)
}

/// Soft-delete the active row matching id. A delete that affects no row
/// (lost race with a concurrent delete) is reported as NotFound.
pub async fn remove(id: &str) -> Result<DeletedProductDto, AppError> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))?;

    let deleted = repository::soft_delete(id).await?;
    if !deleted {
        return Err(AppError::NotFound(format!(
            "Failed to delete product with ID {}",
            id
        )));
    }

    tracing::info!("Product deleted: {}", id);
    Ok(DeletedProductDto {
        id: id.to_string(),
        deleted: true,
    })
}

pub async fn get(id: &str) -> Result<Product, AppError> {
    repository::get_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Product with ID {} not found", id)))
}

/// Paginated listing of active products plus pagination metadata.
pub async fn list_page(page: u64, limit: u64) -> Result<(Vec<Product>, PageMeta), AppError> {
    let page = page.max(1);
    let limit = limit.max(1);

    let (data, total) = repository::list_page(page, limit).await?;
    Ok((data, PageMeta::new(page, limit, total)))
}
