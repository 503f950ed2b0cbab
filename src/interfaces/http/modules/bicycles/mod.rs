//! Bicycles module: fleet CRUD, filtering and the most-rented lookup

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
