pub mod bicycles;
pub mod discounts;
pub mod health;
pub mod locations;
pub mod metrics;
pub mod rentals;
pub mod request_id;
pub mod users;
