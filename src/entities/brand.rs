use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Brand entity
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "brands")]
pub struct Model {
    /// Primary key, generated at creation and never reused
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Brand name
    #[validate(length(min = 1, max = 50, message = "Brand name must be between 1 and 50 characters"))]
    pub name: String,

    /// Brand description
    #[validate(length(max = 2000, message = "Description cannot exceed 2000 characters"))]
    pub description: String,

    /// Country of origin
    #[validate(length(max = 100, message = "Country cannot exceed 100 characters"))]
    pub country: Option<String>,

    /// Year the brand was founded
    #[validate(custom = "crate::validators::validate_catalog_year")]
    pub year_founded: Option<i32>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::sneaker::Entity")]
    Sneakers,
}

impl Related<super::sneaker::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Sneakers.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    async fn before_save<C>(self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        let mut active_model = self;

        if insert {
            active_model.created_at = Set(Utc::now());
        }
        active_model.updated_at = Set(Some(Utc::now()));

        let model: Model = active_model.clone().try_into().map_err(|_| {
            DbErr::Custom("Failed to convert ActiveModel to Model for validation".to_string())
        })?;

        if let Err(err) = model.validate() {
            return Err(DbErr::Custom(format!("Validation error: {}", err)));
        }

        Ok(active_model)
    }
}
