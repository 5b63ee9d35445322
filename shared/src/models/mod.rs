//! Domain models for the Crop Health Monitor

mod analysis;
mod disease;
mod features;
mod health;

pub use analysis::*;
pub use disease::*;
pub use features::*;
pub use health::*;
