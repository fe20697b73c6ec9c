#![warn(clippy::pedantic)]

pub mod budget;
pub mod error;
pub mod header;

pub use budget::{Budget, safe_sub};
pub use error::WireError;
