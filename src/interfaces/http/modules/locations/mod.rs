//! Locations module: rental stations and their ranking by rental volume

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
