//! Application services
//!
//! Each service owns the business rules for one aggregate and talks to
//! storage only through the `RepositoryProvider`.

mod bicycle;
mod discount;
mod location;
mod rental;
mod user;

pub use bicycle::BicycleService;
pub use discount::DiscountService;
pub use location::{LocationService, DEFAULT_TOP_LIMIT, MAX_TOP_LIMIT};
pub use rental::{RentalService, RentalWindow};
pub use user::UserService;
