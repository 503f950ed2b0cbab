//! Rentals module: check-out, returns, history and revenue

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
