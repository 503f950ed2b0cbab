//! Rental entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "rentals")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub user_id: i32,

    pub bicycle_id: i32,

    pub rental_start_time: DateTimeUtc,

    /// Planned end
    pub rental_end_time: DateTimeUtc,

    #[sea_orm(nullable)]
    pub actual_return_time: Option<DateTimeUtc>,

    #[sea_orm(column_type = "Double")]
    pub total_price: f64,

    #[sea_orm(nullable)]
    pub discount_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id"
    )]
    User,
    #[sea_orm(
        belongs_to = "super::bicycle::Entity",
        from = "Column::BicycleId",
        to = "super::bicycle::Column::Id"
    )]
    Bicycle,
    #[sea_orm(
        belongs_to = "super::discount::Entity",
        from = "Column::DiscountId",
        to = "super::discount::Column::Id"
    )]
    Discount,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::bicycle::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bicycle.def()
    }
}

impl Related<super::discount::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Discount.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
