pub mod errors;
pub mod patch;
pub mod time;

pub use errors::*;
