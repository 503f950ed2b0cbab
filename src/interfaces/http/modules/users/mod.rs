//! Users module: customer records and contact lookups

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
