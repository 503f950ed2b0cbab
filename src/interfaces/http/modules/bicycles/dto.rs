//! Bicycle DTOs

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::domain::{
    Bicycle, BicycleFilter, BicyclePatch, BicycleStatus, DomainResult, NewBicycle,
};
use crate::shared::types::patch::nullable;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BicycleDto {
    pub id: i32,
    pub brand: String,
    pub model: String,
    #[serde(rename = "type")]
    pub bike_type: String,
    pub price_per_hour: f64,
    /// available, rented or under_repair
    pub status: String,
    pub current_location_id: Option<i32>,
}

impl From<Bicycle> for BicycleDto {
    fn from(b: Bicycle) -> Self {
        Self {
            id: b.id,
            brand: b.brand,
            model: b.model,
            bike_type: b.bike_type,
            price_per_hour: b.price_per_hour,
            status: b.status.to_string(),
            current_location_id: b.current_location_id,
        }
    }
}

fn parse_status(raw: Option<&str>) -> DomainResult<Option<BicycleStatus>> {
    raw.map(str::parse).transpose()
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateBicycleRequest {
    #[validate(length(min = 1, max = 50))]
    pub brand: String,
    #[validate(length(min = 1, max = 50))]
    pub model: String,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 30))]
    pub bike_type: String,
    #[validate(range(exclusive_min = 0.0, message = "price_per_hour must be positive"))]
    pub price_per_hour: f64,
    /// Defaults to `available`
    pub status: Option<String>,
    pub current_location_id: Option<i32>,
}

impl CreateBicycleRequest {
    pub fn into_new(self) -> DomainResult<NewBicycle> {
        Ok(NewBicycle {
            status: parse_status(self.status.as_deref())?.unwrap_or_default(),
            brand: self.brand,
            model: self.model,
            bike_type: self.bike_type,
            price_per_hour: self.price_per_hour,
            current_location_id: self.current_location_id,
        })
    }
}

/// Partial update; `"current_location_id": null` detaches the bicycle
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateBicycleRequest {
    #[validate(length(min = 1, max = 50))]
    pub brand: Option<String>,
    #[validate(length(min = 1, max = 50))]
    pub model: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 30))]
    pub bike_type: Option<String>,
    #[validate(range(exclusive_min = 0.0, message = "price_per_hour must be positive"))]
    pub price_per_hour: Option<f64>,
    pub status: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<i32>)]
    pub current_location_id: Option<Option<i32>>,
}

impl UpdateBicycleRequest {
    pub fn into_patch(self) -> DomainResult<BicyclePatch> {
        Ok(BicyclePatch {
            status: parse_status(self.status.as_deref())?,
            brand: self.brand,
            model: self.model,
            bike_type: self.bike_type,
            price_per_hour: self.price_per_hour,
            current_location_id: self.current_location_id,
        })
    }
}

/// Listing filters
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListBicyclesParams {
    /// Only bicycles stationed at this location
    pub location_id: Option<i32>,
    /// available, rented or under_repair
    pub status: Option<String>,
    /// Order by price per hour, cheapest first
    #[serde(default)]
    pub sort_by_price: bool,
}

impl ListBicyclesParams {
    pub fn into_filter(self) -> DomainResult<BicycleFilter> {
        Ok(BicycleFilter {
            location_id: self.location_id,
            status: parse_status(self.status.as_deref())?,
            sort_by_price: self.sort_by_price,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DomainError;

    #[test]
    fn create_request_reads_type_key_and_defaults_status() {
        let request: CreateBicycleRequest = serde_json::from_str(
            r#"{"brand": "Trek", "model": "Marlin 5", "type": "mountain", "price_per_hour": 12.0}"#,
        )
        .unwrap();
        let new = request.into_new().unwrap();
        assert_eq!(new.bike_type, "mountain");
        assert_eq!(new.status, BicycleStatus::Available);
        assert_eq!(new.current_location_id, None);
    }

    #[test]
    fn unknown_status_is_a_validation_error() {
        let params = ListBicyclesParams {
            status: Some("stolen".into()),
            ..Default::default()
        };
        assert!(matches!(params.into_filter(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn update_request_distinguishes_null_location() {
        let detach: UpdateBicycleRequest =
            serde_json::from_str(r#"{"current_location_id": null}"#).unwrap();
        let untouched: UpdateBicycleRequest = serde_json::from_str(r#"{"brand": "Cube"}"#).unwrap();

        assert_eq!(detach.into_patch().unwrap().current_location_id, Some(None));
        assert_eq!(untouched.into_patch().unwrap().current_location_id, None);
    }
}
