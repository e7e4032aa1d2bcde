use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// Staff/visitor account.
///
/// Credential management lives in the external identity layer; the
/// catalog consumes users only as opaque actor references for audit
/// fields and capability checks.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, Validate)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    /// Login identity
    #[sea_orm(unique)]
    #[validate(email(message = "Must be a valid email address"))]
    pub email: String,

    #[validate(length(max = 150))]
    pub first_name: String,

    #[validate(length(max = 150))]
    pub last_name: String,

    /// Hash managed by the external identity layer
    #[serde(skip_serializing)]
    pub password_hash: String,

    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,

    pub created_at: DateTime<Utc>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
