use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::json;

use contracts::domain::product::{
    CreateProductDto, DeletedProductDto, Product, UpdateProductDto,
};
use contracts::shared::response::ApiResponse;

use crate::domain::product::service;
use crate::shared::error::AppError;
use crate::usecases::catalog_ingestion;

type ApiResult<T> = Result<(StatusCode, Json<ApiResponse<T>>), AppError>;

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default = "default_page")]
    pub page: u64,
    #[serde(default = "default_limit")]
    pub limit: u64,
}

fn default_page() -> u64 {
    1
}

fn default_limit() -> u64 {
    10
}

/// GET /api/product
pub async fn list(Query(query): Query<PageQuery>) -> ApiResult<Vec<Product>> {
    tracing::info!(
        "Get all products - page: {}, limit: {}",
        query.page,
        query.limit
    );
    let (data, meta) = service::list_page(query.page, query.limit).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(
            "Products retrieved successfully",
            data,
            serde_json::to_value(meta).unwrap_or_default(),
        )),
    ))
}

/// GET /api/product/fetch
pub async fn ingest() -> ApiResult<Vec<Product>> {
    tracing::info!("Fetch products endpoint called");
    let report = catalog_ingestion::executor::run().await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success_with_meta(
            "Products fetched and stored successfully",
            report.products,
            json!({ "summary": report.summary }),
        )),
    ))
}

/// GET /api/product/:id
pub async fn get_by_id(Path(id): Path<String>) -> ApiResult<Product> {
    tracing::info!("Get product by id: {}", id);
    let product = service::get(&id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success(
            "Product retrieved successfully",
            product,
        )),
    ))
}

/// POST /api/product
pub async fn create(Json(dto): Json<CreateProductDto>) -> ApiResult<Product> {
    tracing::info!("Create product: {}", dto.name);
    let product = service::create(dto).await?;
    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success("Product created successfully", product)),
    ))
}

/// PATCH /api/product/:id
pub async fn update(
    Path(id): Path<String>,
    Json(patch): Json<UpdateProductDto>,
) -> ApiResult<Product> {
    tracing::info!("Update product: {}", id);
    let product = service::update(&id, patch).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Product updated successfully", product)),
    ))
}

/// DELETE /api/product/:id, guarded by the static delete token.
pub async fn remove(Path(id): Path<String>) -> ApiResult<DeletedProductDto> {
    tracing::info!("Delete product: {}", id);
    let result = service::remove(&id).await?;
    Ok((
        StatusCode::OK,
        Json(ApiResponse::success("Product deleted successfully", result)),
    ))
}
