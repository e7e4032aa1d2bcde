use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Join row for the symmetric sneaker-to-sneaker association.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sneaker_links")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub sneaker_id: Uuid,

    #[sea_orm(primary_key, auto_increment = false)]
    pub related_sneaker_id: Uuid,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::sneaker::Entity",
        from = "Column::SneakerId",
        to = "super::sneaker::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    Sneaker,

    #[sea_orm(
        belongs_to = "super::sneaker::Entity",
        from = "Column::RelatedSneakerId",
        to = "super::sneaker::Column::Id",
        on_update = "Cascade",
        on_delete = "Cascade"
    )]
    RelatedSneaker,
}

impl ActiveModelBehavior for ActiveModel {}
