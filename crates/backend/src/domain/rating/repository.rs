use std::collections::HashSet;

use chrono::Utc;
use contracts::domain::rating::{CreateRatingDto, Rating};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::OnConflict;
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, Set};

use crate::shared::data::rating_db;
use crate::shared::error::{classify_write_err, AppError};

const CONFLICT_MESSAGE: &str = "Rating for this product_id already exists";

/// Ratings live in their own store; product_id is a weak back-reference,
/// never a foreign key.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub product_id: i32,
    pub rate: f64,
    pub count: i32,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
    pub deleted_at: Option<chrono::DateTime<chrono::Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for Rating {
    fn from(m: Model) -> Self {
        Rating {
            id: m.id,
            product_id: m.product_id,
            rate: m.rate,
            count: m.count,
            created_at: m.created_at,
            updated_at: m.updated_at,
            deleted_at: m.deleted_at,
        }
    }
}

fn conn() -> &'static DatabaseConnection {
    rating_db::connection()
}

fn new_model(record: &CreateRatingDto) -> Model {
    let now = Utc::now();
    Model {
        id: Uuid::new_v4().to_string(),
        product_id: record.product_id,
        rate: record.rate,
        count: record.count,
        created_at: now,
        updated_at: now,
        deleted_at: None,
    }
}

fn to_active(model: &Model) -> ActiveModel {
    ActiveModel {
        id: Set(model.id.clone()),
        product_id: Set(model.product_id),
        rate: Set(model.rate),
        count: Set(model.count),
        created_at: Set(model.created_at),
        updated_at: Set(model.updated_at),
        deleted_at: Set(model.deleted_at),
    }
}

pub async fn get_by_product_id(product_id: i32) -> Result<Option<Rating>, AppError> {
    let result = Entity::find()
        .filter(Column::ProductId.eq(product_id))
        .filter(Column::DeletedAt.is_null())
        .one(conn())
        .await?;
    Ok(result.map(Into::into))
}

pub async fn insert(record: CreateRatingDto) -> Result<Rating, AppError> {
    let model = new_model(&record);
    to_active(&model)
        .insert(conn())
        .await
        .map_err(|e| classify_write_err(e, CONFLICT_MESSAGE))?;
    Ok(model.into())
}

/// Conflict-skip bulk insert keyed on product_id, same shape as the product
/// store's. The result is re-read from the store by surrogate id, so it
/// holds exactly the rows that landed.
pub async fn bulk_insert(records: Vec<CreateRatingDto>) -> Result<Vec<Rating>, AppError> {
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

pub async fn delete_all() -> Result<u64, AppError> {
    let result = Entity::delete_many().exec(conn()).await?;
    Ok(result.rows_affected)
}
