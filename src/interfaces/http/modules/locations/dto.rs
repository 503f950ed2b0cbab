//! Location DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{Location, LocationPatch, NewLocation};
use crate::shared::types::patch::nullable;
use crate::shared::types::time::flexible_option;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub id: i32,
    pub name: String,
    pub address: Option<String>,
}

impl From<Location> for LocationDto {
    fn from(l: Location) -> Self {
        Self {
            id: l.id,
            name: l.name,
            address: l.address,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateLocationRequest {
    #[validate(length(min = 1, max = 100, message = "location name is required"))]
    pub name: String,
    #[validate(length(max = 255))]
    pub address: Option<String>,
}

impl From<CreateLocationRequest> for NewLocation {
    fn from(r: CreateLocationRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
        }
    }
}

/// Partial update; `"address": null` clears the address
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateLocationRequest {
    #[validate(length(min = 1, max = 100))]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>)]
    pub address: Option<Option<String>>,
}

impl From<UpdateLocationRequest> for LocationPatch {
    fn from(r: UpdateLocationRequest) -> Self {
        Self {
            name: r.name,
            address: r.address,
        }
    }
}

fn default_limit() -> u64 {
    crate::application::services::DEFAULT_TOP_LIMIT
}

/// Query for the top-locations ranking
#[derive(Debug, Deserialize, IntoParams)]
pub struct TopLocationsParams {
    /// Only count rentals starting at or after this instant
    #[serde(default, deserialize_with = "flexible_option::deserialize")]
    pub start_date: Option<DateTime<Utc>>,
    /// Only count rentals starting at or before this instant
    #[serde(default, deserialize_with = "flexible_option::deserialize")]
    pub end_date: Option<DateTime<Utc>>,
    /// Maximum number of locations returned (default 5, at most 100)
    #[serde(default = "default_limit")]
    pub limit: u64,
}
