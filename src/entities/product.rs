use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue, ActiveValue::Set, ConnectionTrait};
use serde::Serialize;

/// Product entity
///
/// `created_at`/`updated_at` are maintained by the storage layer and never
/// appear in API responses.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    /// Primary key, assigned by the store
    #[sea_orm(primary_key)]
    pub id: i32,

    /// Product name
    pub name: String,

    /// Unit price, strictly positive
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,

    /// Whether the product is currently available
    pub availability: bool,

    #[serde(skip_serializing)]
    pub created_at: DateTime<Utc>,

    #[serde(skip_serializing)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            if let ActiveValue::NotSet = active_model.availability {
                active_model.availability = Set(true);
            }
            active_model.created_at = Set(Utc::now());
        }

        active_model.updated_at = Set(Utc::now());

        Ok(active_model)
    }
}
