//! Application layer: business workflows on top of the repository traits.

pub mod services;

use std::sync::Arc;

use crate::domain::RepositoryProvider;

pub use services::{
    BicycleService, DiscountService, LocationService, RentalService, RentalWindow, UserService,
};

/// Every service wired to one repository provider
#[derive(Clone)]
pub struct AppServices {
    pub bicycles: Arc<BicycleService>,
    pub locations: Arc<LocationService>,
    pub users: Arc<UserService>,
    pub discounts: Arc<DiscountService>,
    pub rentals: Arc<RentalService>,
}

impl AppServices {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self {
            bicycles: Arc::new(BicycleService::new(repos.clone())),
            locations: Arc::new(LocationService::new(repos.clone())),
            users: Arc::new(UserService::new(repos.clone())),
            discounts: Arc::new(DiscountService::new(repos.clone())),
            rentals: Arc::new(RentalService::new(repos)),
        }
    }
}
