//! Discount aggregate
//!
//! Discounts carry an inclusive validity window; a rental may reference a
//! discount only when the rental starts inside that window.

pub mod model;
pub mod repository;

pub use model::{Discount, DiscountPatch, NewDiscount};
pub use repository::DiscountRepository;
