//! Bicycle domain entity

use std::str::FromStr;

use crate::domain::DomainError;

/// Availability of a bicycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BicycleStatus {
    #[default]
    Available,
    Rented,
    UnderRepair,
}

impl BicycleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Rented => "rented",
            Self::UnderRepair => "under_repair",
        }
    }
}

impl std::fmt::Display for BicycleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BicycleStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "rented" => Ok(Self::Rented),
            "under_repair" => Ok(Self::UnderRepair),
            other => Err(DomainError::Validation(format!(
                "unknown bicycle status '{}', expected one of: available, rented, under_repair",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Bicycle {
    pub id: i32,
    pub brand: String,
    pub model: String,
    pub bike_type: String,
    pub price_per_hour: f64,
    pub status: BicycleStatus,
    pub current_location_id: Option<i32>,
}

impl Bicycle {
    pub fn is_available(&self) -> bool {
        self.status == BicycleStatus::Available
    }
}

/// Data for a bicycle that has not been stored yet
#[derive(Debug, Clone)]
pub struct NewBicycle {
    pub brand: String,
    pub model: String,
    pub bike_type: String,
    pub price_per_hour: f64,
    pub status: BicycleStatus,
    pub current_location_id: Option<i32>,
}

/// Partial update. `current_location_id: Some(None)` detaches the bicycle
/// from its location, `None` leaves it untouched.
#[derive(Debug, Clone, Default)]
pub struct BicyclePatch {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub bike_type: Option<String>,
    pub price_per_hour: Option<f64>,
    pub status: Option<BicycleStatus>,
    pub current_location_id: Option<Option<i32>>,
}

impl BicyclePatch {
    /// Location the patch moves the bicycle to, if it sets one.
    pub fn target_location(&self) -> Option<i32> {
        self.current_location_id.flatten()
    }

    pub fn apply(self, bicycle: &mut Bicycle) {
        if let Some(brand) = self.brand {
            bicycle.brand = brand;
        }
        if let Some(model) = self.model {
            bicycle.model = model;
        }
        if let Some(bike_type) = self.bike_type {
            bicycle.bike_type = bike_type;
        }
        if let Some(price) = self.price_per_hour {
            bicycle.price_per_hour = price;
        }
        if let Some(status) = self.status {
            bicycle.status = status;
        }
        if let Some(location) = self.current_location_id {
            bicycle.current_location_id = location;
        }
    }
}

/// Listing filter
#[derive(Debug, Clone, Default)]
pub struct BicycleFilter {
    pub location_id: Option<i32>,
    pub status: Option<BicycleStatus>,
    /// Order by hourly price ascending instead of by ID
    pub sort_by_price: bool,
}
