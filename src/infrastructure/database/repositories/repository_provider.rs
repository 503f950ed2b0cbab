//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::bicycle::BicycleRepository;
use crate::domain::discount::DiscountRepository;
use crate::domain::location::LocationRepository;
use crate::domain::rental::RentalRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::user::UserRepository;

use super::bicycle_repository::SeaOrmBicycleRepository;
use super::discount_repository::SeaOrmDiscountRepository;
use super::location_repository::SeaOrmLocationRepository;
use super::rental_repository::SeaOrmRentalRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let bike = repos.bicycles().find_by_id(1).await?;
/// let revenue = repos.rentals().total_revenue_within(from, to).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    bicycles: SeaOrmBicycleRepository,
    locations: SeaOrmLocationRepository,
    users: SeaOrmUserRepository,
    discounts: SeaOrmDiscountRepository,
    rentals: SeaOrmRentalRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            bicycles: SeaOrmBicycleRepository::new(db.clone()),
            locations: SeaOrmLocationRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db.clone()),
            discounts: SeaOrmDiscountRepository::new(db.clone()),
            rentals: SeaOrmRentalRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn bicycles(&self) -> &dyn BicycleRepository {
        &self.bicycles
    }

    fn locations(&self) -> &dyn LocationRepository {
        &self.locations
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }

    fn discounts(&self) -> &dyn DiscountRepository {
        &self.discounts
    }

    fn rentals(&self) -> &dyn RentalRepository {
        &self.rentals
    }
}
