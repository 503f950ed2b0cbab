//! Discount DTOs
//!
//! Timestamps without an offset are read as UTC.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Discount, DiscountPatch, NewDiscount};
use crate::shared::types::time::{flexible, flexible_option};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DiscountDto {
    pub id: i32,
    pub name: String,
    pub percentage_amount: f64,
    pub valid_from: DateTime<Utc>,
    pub valid_to: DateTime<Utc>,
    pub is_active: bool,
}

impl From<Discount> for DiscountDto {
    fn from(d: Discount) -> Self {
        Self {
            id: d.id,
            name: d.name,
            percentage_amount: d.percentage_amount,
            valid_from: d.valid_from,
            valid_to: d.valid_to,
            is_active: d.is_active,
        }
    }
}

fn default_active() -> bool {
    true
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateDiscountRequest {
    #[validate(length(min = 1, max = 100, message = "discount name is required"))]
    pub name: String,
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentage_amount: f64,
    #[serde(deserialize_with = "flexible::deserialize")]
    pub valid_from: DateTime<Utc>,
    #[serde(deserialize_with = "flexible::deserialize")]
    pub valid_to: DateTime<Utc>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl From<CreateDiscountRequest> for NewDiscount {
    fn from(r: CreateDiscountRequest) -> Self {
        Self {
            name: r.name,
            percentage_amount: r.percentage_amount,
            valid_from: r.valid_from,
            valid_to: r.valid_to,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateDiscountRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[validate(range(min = 0.0, max = 100.0))]
    pub percentage_amount: Option<f64>,
    #[serde(default, deserialize_with = "flexible_option::deserialize")]
    pub valid_from: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "flexible_option::deserialize")]
    pub valid_to: Option<DateTime<Utc>>,
    pub is_active: Option<bool>,
}

impl From<UpdateDiscountRequest> for DiscountPatch {
    fn from(r: UpdateDiscountRequest) -> Self {
        Self {
            name: r.name,
            percentage_amount: r.percentage_amount,
            valid_from: r.valid_from,
            valid_to: r.valid_to,
            is_active: r.is_active,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListDiscountsParams {
    /// Only discounts that are active and inside their validity window now
    #[serde(default)]
    pub active_only: bool,
}
