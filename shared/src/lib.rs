//! Shared types and the crop-health scoring engine
//!
//! This crate holds everything the Crop Health Monitor needs to turn a decoded
//! photograph into a health assessment without calling any remote AI provider:
//! the domain models, the crop catalog, the four heuristic stages and the
//! orchestrator that assembles them.

pub mod catalog;
pub mod engine;
pub mod error;
pub mod models;
pub mod random;
pub mod validation;

pub use catalog::*;
pub use engine::*;
pub use error::*;
pub use models::*;
pub use random::*;
pub use validation::*;
