use std::collections::HashSet;

use chrono::Utc;
use contracts::domain::product::{CreateProductDto, Product, UpdateProductDto};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::{Expr, OnConflict};
use sea_orm::{
    ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::shared::data::product_db;
use crate::shared::error::{classify_write_err, AppError};

const CONFLICT_MESSAGE: &str = "Product with this name or product_id already exists";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: i32,
    pub name: String,
    pub price: f64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Product {
    fn from(m: Model) -> Self {
        Product {
            id: m.id,
            product_id: m.product_id,
            name: m.name,
            price: m.price,
            created_at: m.created_at,
            updated_at: m.updated_at,
            deleted_at: m.deleted_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    product_db::connection()
}

fn new_model(record: &CreateProductDto) -> Model {
    let now = Utc::now();
    Model {
        id: Uuid::new_v4().to_string(),
        product_id: record.product_id,
        name: record.name.clone(),
        price: record.price,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn to_active(model: &Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id.clone()),
        product_id: Set(model.product_id),
        name: Set(model.name.clone()),
        price: Set(model.price),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
        deleted_at: Set(model.deleted_at),
    }
}

/// One page of active rows, newest first, plus the total active count.
/// Equal timestamps fall back to id ordering so pages stay consistent.
pub async fn list_page(page: u64, limit: u64) -> Result<(Vec<Product>, u64), AppError> {
    let offset = (page - 1) * limit;

    let data: Vec<Product> = Entity::find()
        .filter(Column::DeletedAt.is_null())
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(conn())
        .await?
        .into_iter()
        .map(Into::into)
        .collect();

    let total = Entity::find()
        .filter(Column::DeletedAt.is_null())
        .count(conn())
        .await?;

    Ok((data, total))
}

pub async fn get_by_id(id: &str) -> Result<Option<Product>, AppError> {
    let result = Entity::find()
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_null())
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_product_id(product_id: i32) -> Result<Option<Product>, AppError> {
    let result = Entity::find()
        .filter(Column::ProductId.eq(product_id))
        .filter(Column::DeletedAt.is_null())
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn get_by_name(name: &str) -> Result<Option<Product>, AppError> {
    let result = Entity::find()
        .filter(Column::Name.eq(name))
        .filter(Column::DeletedAt.is_null())
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

/// Insert one row. A storage-level unique violation on product_id or name
/// is classified as Conflict.
pub async fn insert(record: CreateProductDto) -> Result<Product, AppError> {
    let model = new_model(&record);
    to_active(&model)
        .insert(conn())
        .await
        .map_err(|e| classify_write_err(e, CONFLICT_MESSAGE))?;
    Ok(model.into())
}

/// Apply a partial patch to the active row matching id. Only present fields
/// are written; updated_at is always refreshed. An empty patch performs no
/// write and returns the row as-is. None means no active row matched.
pub async fn update(id: &str, patch: UpdateProductDto) -> Result<Option<Product>, AppError> {
    if patch.is_empty() {
        return get_by_id(id).await;
    }

    let mut stmt = Entity::update_many().col_expr(Column::UpdatedAt, Expr::value(Utc::now()));
    if let Some(name) = patch.name {
        stmt = stmt.col_expr(Column::Name, Expr::value(name));
    }
    if let Some(price) = patch.price {
        stmt = stmt.col_expr(Column::Price, Expr::value(price));
    }
    if let Some(product_id) = patch.product_id {
        stmt = stmt.col_expr(Column::ProductId, Expr::value(product_id));
    }

    let result = stmt
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_null())
        .exec(conn())
        .await
        .map_err(|e| classify_write_err(e, CONFLICT_MESSAGE))?;

    if result.rows_affected == 0 {
        return Ok(None);
    }
    get_by_id(id).await
}

/// Mark the active row matching id as retired. False when none matched.
pub async fn soft_delete(id: &str) -> Result<bool, AppError> {
    let result = Entity::update_many()
        .col_expr(Column::DeletedAt, Expr::value(Utc::now()))
        .col_expr(Column::UpdatedAt, Expr::value(Utc::now()))
        .filter(Column::Id.eq(id))
        .filter(Column::DeletedAt.is_null())
        .exec(conn())
        .await?;
    Ok(result.rows_affected > 0)
}

/// Conflict-skip bulk insert. Rows whose product_id collides with an
/// existing row (active or soft-deleted) or with an earlier row in the same
/// batch are silently dropped; existing rows are never updated. The
/// ON CONFLICT clause backstops concurrent writers. The result is re-read
/// from the store by surrogate id, so it holds exactly the rows that landed,
/// even when the backstop skipped some.
pub async fn bulk_insert(records: Vec<CreateProductDto>) -> Result<Vec<Product>, AppError> {
    if records.is_empty() {
        return Ok(Vec::new());
    }

    let candidate_ids: Vec<i32> = records.iter().map(|r| r.product_id).collect();
    let mut seen: HashSet<i32> = Entity::find()
        .filter(Column::ProductId.is_in(candidate_ids))
        .all(conn())
        .await?
        .into_iter()
        .map(|m| m.product_id)
        .collect();

    let fresh: Vec<Model> = records
        .iter()
        .filter(|r| seen.insert(r.product_id))
        .map(new_model)
        .collect();

    if fresh.is_empty() {
        return Ok(Vec::new());
    }

    let fresh_ids: Vec<String> = fresh.iter().map(|m| m.id.clone()).collect();

    Entity::insert_many(fresh.iter().map(to_active))
        .on_conflict(
            OnConflict::column(Column::ProductId)
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(conn())
        .await
        .map_err(|e| classify_write_err(e, CONFLICT_MESSAGE))?;

    let inserted = Entity::find()
        .filter(Column::Id.is_in(fresh_ids))
        .all(conn())
        .await?;

    Ok(inserted.into_iter().map(Into::into).collect())
}

/// Unconditional hard delete of every row, active or not. Administrative
/// reset only.
pub async fn delete_all() -> Result<u64, AppError> {
    let result = Entity::delete_many().exec(conn()).await?;
    Ok(result.rows_affected)
}
