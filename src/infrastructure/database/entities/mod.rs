//! Database entities module

pub mod bicycle;
pub mod discount;
pub mod location;
pub mod rental;
pub mod user;

pub use bicycle::Entity as Bicycle;
pub use discount::Entity as Discount;
pub use location::Entity as Location;
pub use rental::Entity as Rental;
pub use user::Entity as User;
