//! Business logic services for the Crop Health Monitor

pub mod analysis;

pub use analysis::AnalysisService;
