//! Create bicycles table
//!
//! Deleting a location detaches its bicycles instead of deleting them.

use sea_orm_migration::prelude::*;

use super::m20240101_000001_create_locations::Locations;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Bicycles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Bicycles::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Bicycles::Brand).string().not_null())
                    .col(ColumnDef::new(Bicycles::Model).string().not_null())
                    .col(ColumnDef::new(Bicycles::Type).string().not_null())
                    .col(ColumnDef::new(Bicycles::PricePerHour).double().not_null())
                    .col(
                        ColumnDef::new(Bicycles::Status)
                            .string_len(20)
                            .not_null()
                            .default("available"),
                    )
                    .col(ColumnDef::new(Bicycles::CurrentLocationId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_bicycles_current_location")
                            .from(Bicycles::Table, Bicycles::CurrentLocationId)
                            .to(Locations::Table, Locations::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bicycles_current_location")
                    .table(Bicycles::Table)
                    .col(Bicycles::CurrentLocationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_bicycles_status")
                    .table(Bicycles::Table)
                    .col(Bicycles::Status)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Bicycles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Bicycles {
    Table,
    Id,
    Brand,
    Model,
    Type,
    PricePerHour,
    Status,
    CurrentLocationId,
}
