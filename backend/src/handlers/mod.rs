//! HTTP handlers for the Crop Health Monitor

mod analysis;
mod crops;
mod health;

pub use analysis::*;
pub use crops::*;
pub use health::*;
