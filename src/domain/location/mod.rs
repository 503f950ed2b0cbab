//! Location aggregate

pub mod model;
pub mod repository;

pub use model::{Location, LocationPatch, NewLocation};
pub use repository::LocationRepository;
