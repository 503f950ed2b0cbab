//! Bicycle aggregate
//!
//! Fleet records, their availability status and the fleet-wide
//! "most rented" aggregation.

pub mod model;
pub mod repository;

pub use model::{Bicycle, BicycleFilter, BicyclePatch, BicycleStatus, NewBicycle};
pub use repository::BicycleRepository;
