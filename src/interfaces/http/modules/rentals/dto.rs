//! Rental DTOs
//!
//! Every timestamp goes through the flexible parser: an explicit offset is
//! converted to UTC, a missing one is taken as UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::application::RentalWindow;
use crate::domain::{NewRental, Rental, RentalPatch};
use crate::shared::types::patch::nullable;
use crate::shared::types::time::{flexible, flexible_option, flexible_patch};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RentalDto {
    pub id: i32,
    pub user_id: i32,
    pub bicycle_id: i32,
    pub rental_start_time: DateTime<Utc>,
    pub rental_end_time: DateTime<Utc>,
    pub actual_return_time: Option<DateTime<Utc>>,
    pub total_price: f64,
    pub discount_id: Option<i32>,
}

impl From<Rental> for RentalDto {
    fn from(r: Rental) -> Self {
        Self {
            id: r.id,
            user_id: r.user_id,
            bicycle_id: r.bicycle_id,
            rental_start_time: r.rental_start_time,
            rental_end_time: r.rental_end_time,
            actual_return_time: r.actual_return_time,
            total_price: r.total_price,
            discount_id: r.discount_id,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRentalRequest {
    pub user_id: i32,
    pub bicycle_id: i32,
    #[serde(deserialize_with = "flexible::deserialize")]
    pub rental_start_time: DateTime<Utc>,
    #[serde(deserialize_with = "flexible::deserialize")]
    pub rental_end_time: DateTime<Utc>,
    #[serde(default, deserialize_with = "flexible_option::deserialize")]
    pub actual_return_time: Option<DateTime<Utc>>,
    #[validate(range(min = 0.0))]
    pub total_price: f64,
    pub discount_id: Option<i32>,
}

impl From<CreateRentalRequest> for NewRental {
    fn from(r: CreateRentalRequest) -> Self {
        Self {
            user_id: r.user_id,
            bicycle_id: r.bicycle_id,
            rental_start_time: r.rental_start_time,
            rental_end_time: r.rental_end_time,
            actual_return_time: r.actual_return_time,
            total_price: r.total_price,
            discount_id: r.discount_id,
        }
    }
}

/// Partial update. Setting `actual_return_time` on an open rental records
/// the return and frees the bicycle; `null` clears the field.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateRentalRequest {
    pub user_id: Option<i32>,
    pub bicycle_id: Option<i32>,
    #[serde(default, deserialize_with = "flexible_option::deserialize")]
    pub rental_start_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_option::deserialize")]
    pub rental_end_time: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_patch::deserialize")]
    #[schema(value_type = Option<String>, format = DateTime)]
    pub actual_return_time: Option<Option<DateTime<Utc>>>,
    #[validate(range(min = 0.0))]
    pub total_price: Option<f64>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub discount_id: Option<Option<i32>>,
}

impl From<UpdateRentalRequest> for RentalPatch {
    fn from(r: UpdateRentalRequest) -> Self {
        Self {
            user_id: r.user_id,
            bicycle_id: r.bicycle_id,
            rental_start_time: r.rental_start_time,
            rental_end_time: r.rental_end_time,
            actual_return_time: r.actual_return_time,
            total_price: r.total_price,
            discount_id: r.discount_id,
        }
    }
}

/// Optional window; applied only when both ends are given
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListRentalsParams {
    #[serde(default, deserialize_with = "flexible_option::deserialize")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_option::deserialize")]
    pub end_date: Option<DateTime<Utc>>,
}

impl ListRentalsParams {
    pub fn window(&self) -> Option<RentalWindow> {
        match (self.start_date, self.end_date) {
            (Some(from), Some(to)) => Some(RentalWindow { from, to }),
            _ => None,
        }
    }
}

/// Mandatory revenue window
#[derive(Debug, Deserialize, IntoParams)]
pub struct RevenueParams {
    #[serde(deserialize_with = "flexible::deserialize")]
    pub start_date: DateTime<Utc>,
    #[serde(deserialize_with = "flexible::deserialize")]
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RevenueDto {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub total_revenue: f64,
}
