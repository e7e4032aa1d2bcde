use sea_orm_migration::prelude::*;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250714_000001_create_brands_table::Migration),
            Box::new(m20250714_000002_create_users_table::Migration),
            Box::new(m20250714_000003_create_sneakers_table::Migration),
            Box::new(m20250714_000004_create_sneaker_links_table::Migration),
        ]
    }
}

mod m20250714_000001_create_brands_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250714_000001_create_brands_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Brands::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Brands::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Brands::Name).string_len(50).not_null())
                        .col(ColumnDef::new(Brands::Description).string_len(2000).not_null())
                        .col(ColumnDef::new(Brands::Country).string_len(100).null())
                        .col(ColumnDef::new(Brands::YearFounded).integer().null())
                        .col(ColumnDef::new(Brands::CreatedAt).timestamp_with_time_zone().not_null())
                        .col(ColumnDef::new(Brands::UpdatedAt).timestamp_with_time_zone().null())
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_brands_name")
                        .table(Brands::Table)
                        .col(Brands::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Brands::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Brands {
        Table,
        Id,
        Name,
        Description,
        Country,
        YearFounded,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250714_000002_create_users_table {
    use sea_orm_migration::prelude::*;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250714_000002_create_users_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Users::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Users::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Users::Email).string_len(254).not_null().unique_key())
                        .col(ColumnDef::new(Users::FirstName).string_len(150).not_null())
                        .col(ColumnDef::new(Users::LastName).string_len(150).not_null())
                        .col(ColumnDef::new(Users::PasswordHash).string().not_null())
                        .col(ColumnDef::new(Users::IsActive).boolean().not_null().default(true))
                        .col(ColumnDef::new(Users::IsStaff).boolean().not_null().default(false))
                        .col(ColumnDef::new(Users::IsSuperuser).boolean().not_null().default(false))
                        .col(ColumnDef::new(Users::CreatedAt).timestamp_with_time_zone().not_null())
                        .col(ColumnDef::new(Users::UpdatedAt).timestamp_with_time_zone().null())
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Users::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Users {
        Table,
        Id,
        Email,
        FirstName,
        LastName,
        PasswordHash,
        IsActive,
        IsStaff,
        IsSuperuser,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250714_000003_create_sneakers_table {
    use sea_orm_migration::prelude::*;

    use super::m20250714_000001_create_brands_table::Brands;
    use super::m20250714_000002_create_users_table::Users;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250714_000003_create_sneakers_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(Sneakers::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(Sneakers::Id).uuid().primary_key().not_null())
                        .col(ColumnDef::new(Sneakers::Name).string_len(100).not_null())
                        .col(ColumnDef::new(Sneakers::Summary).string_len(200).not_null())
                        .col(ColumnDef::new(Sneakers::Designer).string_len(150).null())
                        .col(ColumnDef::new(Sneakers::YearReleased).integer().not_null())
                        .col(ColumnDef::new(Sneakers::BrandId).uuid().null())
                        .col(ColumnDef::new(Sneakers::PrimaryImage).string().null())
                        .col(ColumnDef::new(Sneakers::CreatedBy).uuid().null())
                        .col(ColumnDef::new(Sneakers::LastUpdatedBy).uuid().null())
                        .col(ColumnDef::new(Sneakers::Deleted).boolean().not_null().default(false))
                        .col(ColumnDef::new(Sneakers::DeletedAt).timestamp_with_time_zone().null())
                        .col(ColumnDef::new(Sneakers::DeletedBy).uuid().null())
                        .col(ColumnDef::new(Sneakers::CreatedAt).timestamp_with_time_zone().not_null())
                        .col(ColumnDef::new(Sneakers::UpdatedAt).timestamp_with_time_zone().null())
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sneakers_brand_id")
                                .from(Sneakers::Table, Sneakers::BrandId)
                                .to(Brands::Table, Brands::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sneakers_created_by")
                                .from(Sneakers::Table, Sneakers::CreatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sneakers_last_updated_by")
                                .from(Sneakers::Table, Sneakers::LastUpdatedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sneakers_deleted_by")
                                .from(Sneakers::Table, Sneakers::DeletedBy)
                                .to(Users::Table, Users::Id)
                                .on_delete(ForeignKeyAction::SetNull),
                        )
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sneakers_brand_id")
                        .table(Sneakers::Table)
                        .col(Sneakers::BrandId)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sneakers_deleted")
                        .table(Sneakers::Table)
                        .col(Sneakers::Deleted)
                        .to_owned(),
                )
                .await?;

            manager
                .create_index(
                    Index::create()
                        .if_not_exists()
                        .name("idx_sneakers_name")
                        .table(Sneakers::Table)
                        .col(Sneakers::Name)
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(Sneakers::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum Sneakers {
        Table,
        Id,
        Name,
        Summary,
        Designer,
        YearReleased,
        BrandId,
        PrimaryImage,
        CreatedBy,
        LastUpdatedBy,
        Deleted,
        DeletedAt,
        DeletedBy,
        CreatedAt,
        UpdatedAt,
    }
}

mod m20250714_000004_create_sneaker_links_table {
    use sea_orm_migration::prelude::*;

    use super::m20250714_000003_create_sneakers_table::Sneakers;

    pub struct Migration;

    impl MigrationName for Migration {
        fn name(&self) -> &str {
            "m20250714_000004_create_sneaker_links_table"
        }
    }

    #[async_trait::async_trait]
    impl MigrationTrait for Migration {
        async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .create_table(
                    Table::create()
                        .table(SneakerLinks::Table)
                        .if_not_exists()
                        .col(ColumnDef::new(SneakerLinks::SneakerId).uuid().not_null())
                        .col(ColumnDef::new(SneakerLinks::RelatedSneakerId).uuid().not_null())
                        .primary_key(
                            Index::create()
                                .col(SneakerLinks::SneakerId)
                                .col(SneakerLinks::RelatedSneakerId),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sneaker_links_sneaker_id")
                                .from(SneakerLinks::Table, SneakerLinks::SneakerId)
                                .to(Sneakers::Table, Sneakers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .foreign_key(
                            ForeignKey::create()
                                .name("fk_sneaker_links_related_sneaker_id")
                                .from(SneakerLinks::Table, SneakerLinks::RelatedSneakerId)
                                .to(Sneakers::Table, Sneakers::Id)
                                .on_delete(ForeignKeyAction::Cascade),
                        )
                        .to_owned(),
                )
                .await
        }

        async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
            manager
                .drop_table(Table::drop().table(SneakerLinks::Table).to_owned())
                .await
        }
    }

    #[derive(DeriveIden)]
    pub enum SneakerLinks {
        Table,
        SneakerId,
        RelatedSneakerId,
    }
}
