//! Domain layer: plain records, patch types, eligibility rules and
//! repository interfaces. No persistence or transport concerns.

pub mod bicycle;
pub mod discount;
pub mod location;
pub mod rental;
pub mod repositories;
pub mod user;

pub use bicycle::{Bicycle, BicycleFilter, BicyclePatch, BicycleStatus, NewBicycle};
pub use discount::{Discount, DiscountPatch, NewDiscount};
pub use location::{Location, LocationPatch, NewLocation};
pub use rental::{NewRental, Rental, RentalPatch};
pub use repositories::{DomainResult, RepositoryProvider};
pub use user::{NewUser, User, UserPatch};

pub use crate::shared::errors::DomainError;
