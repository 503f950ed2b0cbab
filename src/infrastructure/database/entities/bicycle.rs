//! Bicycle entity

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Stored bicycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum BicycleStatus {
    #[sea_orm(string_value = "available")]
    Available,
    #[sea_orm(string_value = "rented")]
    Rented,
    #[sea_orm(string_value = "under_repair")]
    UnderRepair,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bicycles")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub brand: String,

    pub model: String,

    /// Kind of bicycle (city, mountain, e-bike, ...)
    #[sea_orm(column_name = "type")]
    pub bike_type: String,

    #[sea_orm(column_type = "Double")]
    pub price_per_hour: f64,

    pub status: BicycleStatus,

    #[sea_orm(nullable)]
    pub current_location_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::location::Entity",
        from = "Column::CurrentLocationId",
        to = "super::location::Column::Id"
    )]
    Location,
    #[sea_orm(has_many = "super::rental::Entity")]
    Rental,
}

impl Related<super::location::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Location.def()
    }
}

impl Related<super::rental::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Rental.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
