//! Create rentals table
//!
//! Rentals keep their user and bicycle alive (restrict); removing a
//! discount only clears the reference.

use sea_orm_migration::prelude::*;

use super::m20240101_000002_create_bicycles::Bicycles;
use super::m20240101_000003_create_users::Users;
use super::m20240101_000004_create_discounts::Discounts;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Rentals::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Rentals::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Rentals::UserId).integer().not_null())
                    .col(ColumnDef::new(Rentals::BicycleId).integer().not_null())
                    .col(
                        ColumnDef::new(Rentals::RentalStartTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Rentals::RentalEndTime)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Rentals::ActualReturnTime).timestamp_with_time_zone())
                    .col(ColumnDef::new(Rentals::TotalPrice).double().not_null())
                    .col(ColumnDef::new(Rentals::DiscountId).integer())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rentals_user")
                            .from(Rentals::Table, Rentals::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rentals_bicycle")
                            .from(Rentals::Table, Rentals::BicycleId)
                            .to(Bicycles::Table, Bicycles::Id)
                            .on_delete(ForeignKeyAction::Restrict),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_rentals_discount")
                            .from(Rentals::Table, Rentals::DiscountId)
                            .to(Discounts::Table, Discounts::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rentals_bicycle")
                    .table(Rentals::Table)
                    .col(Rentals::BicycleId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rentals_user")
                    .table(Rentals::Table)
                    .col(Rentals::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_rentals_start_time")
                    .table(Rentals::Table)
                    .col(Rentals::RentalStartTime)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Rentals::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
pub enum Rentals {
    Table,
    Id,
    UserId,
    BicycleId,
    RentalStartTime,
    RentalEndTime,
    ActualReturnTime,
    TotalPrice,
    DiscountId,
}
