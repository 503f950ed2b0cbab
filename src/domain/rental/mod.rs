//! Rental aggregate
//!
//! A rental ties a user to a bicycle for a planned period, optionally with
//! a discount. It is the fact table behind every revenue and popularity query.

pub mod model;
pub mod repository;

pub use model::{NewRental, Rental, RentalPatch};
pub use repository::RentalRepository;
