use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ActiveValue::Set, ConnectionTrait};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Sneaker entity
///
/// Rows are never physically removed by the application: deletion flips
/// the `deleted` flag and records who and when. `deleted_at` and
/// `deleted_by` are set if and only if `deleted` is true.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "sneakers")]
pub struct Model {
    /// Primary key, generated at creation and never reused
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Sneaker name
    #[validate(length(min = 1, max = 100, message = "Name must be between 1 and 100 characters"))]
    pub name: String,

    /// Short summary shown on cards and detail pages
    #[validate(length(min = 1, max = 200, message = "Summary must be between 1 and 200 characters"))]
    pub summary: String,

    /// Designer credit
    #[validate(length(max = 150, message = "Designer cannot exceed 150 characters"))]
    pub designer: Option<String>,

    /// Year of release
    #[validate(custom = "crate::validators::validate_catalog_year")]
    pub year_released: i32,

    /// Owning brand; a sneaker may reference no brand
    pub brand_id: Option<Uuid>,

    /// Path of the stored primary image, relative to the media root
    pub primary_image: Option<String>,

    /// Actor that created the record
    pub created_by: Option<Uuid>,

    /// Actor that last updated the record
    pub last_updated_by: Option<Uuid>,

    /// Soft-delete flag; once true the record is excluded from all public
    /// listing, search, and detail operations
    pub deleted: bool,

    /// When the record was soft-deleted
    pub deleted_at: Option<DateTime<Utc>>,

    /// Actor that soft-deleted the record
    pub deleted_by: Option<Uuid>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::brand::Entity",
        from = "Column::BrandId",
        to = "super::brand::Column::Id",
        on_update = "Cascade",
        on_delete = "SetNull"
    )]
    Brand,
}

impl Related<super::brand::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Brand.def()
    }
}

/// Symmetric "related sneakers" association through `sneaker_links`.
///
/// The link table stores both directions of every pair, so following the
/// link from either side yields the full related set.
pub struct RelatedSneakers;

impl Linked for RelatedSneakers {
    type FromEntity = Entity;
    type ToEntity = Entity;

    fn link(&self) -> Vec<RelationDef> {
        vec![
            super::sneaker_link::Relation::Sneaker.def().rev(),
            super::sneaker_link::Relation::RelatedSneaker.def(),
        ]
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
