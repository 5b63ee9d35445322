//! Error types for the scoring engine
//!
//! Stage errors never reach the web layer: each stage converts its error into
//! a degraded value (see [`crate::engine::StageOutcome`]). They are kept as
//! typed values so callers and tests can see why a stage degraded.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    #[error("Feature extraction failed: {0}")]
    ExtractionFailure(String),

    #[error("Health scoring failed: {0}")]
    ScoringFailure(String),

    #[error("Disease classification failed: {0}")]
    ClassificationFailure(String),

    #[error("Recommendation generation failed: {0}")]
    RecommendationFailure(String),

    #[error("Analysis pipeline failed: {0}")]
    PipelineFailure(String),

    #[error("Invalid crop catalog: {0}")]
    Catalog(String),
}

/// Result type alias for engine operations
pub type EngineResult<T> = Result<T, AnalysisError>;
