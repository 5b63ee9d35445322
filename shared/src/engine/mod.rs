//! Pixel-heuristic crop health engine
//!
//! Four stages run one after another on a decoded image and a crop type:
//! feature extraction, health scoring, disease classification and
//! recommendation generation. Each stage returns a [`StageOutcome`] so that a
//! failure in one stage degrades that stage alone.

mod classifier;
mod extractor;
mod pipeline;
mod recommender;
mod scorer;

pub use classifier::*;
pub use extractor::*;
pub use pipeline::*;
pub use recommender::*;
pub use scorer::*;

use crate::error::AnalysisError;

/// Result of one engine stage: the computed value, or a fallback value
/// together with the error that forced it
#[derive(Debug, Clone, PartialEq)]
pub enum StageOutcome<T> {
    Computed(T),
    Degraded { value: T, error: AnalysisError },
}

impl<T> StageOutcome<T> {
    /// Wrap a stage result, substituting `fallback()` on error
    pub fn from_result(result: Result<T, AnalysisError>, fallback: impl FnOnce() -> T) -> Self {
        match result {
            Ok(value) => StageOutcome::Computed(value),
            Err(error) => {
                tracing::warn!(error = %error, "Analysis stage degraded to fallback value");
                StageOutcome::Degraded {
                    value: fallback(),
                    error,
                }
            }
        }
    }

    pub fn value(&self) -> &T {
        match self {
            StageOutcome::Computed(value) => value,
            StageOutcome::Degraded { value, .. } => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            StageOutcome::Computed(value) => value,
            StageOutcome::Degraded { value, .. } => value,
        }
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self, StageOutcome::Degraded { .. })
    }

    pub fn error(&self) -> Option<&AnalysisError> {
        match self {
            StageOutcome::Computed(_) => None,
            StageOutcome::Degraded { error, .. } => Some(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_result_ok() {
        let outcome = StageOutcome::from_result(Ok(7), || 0);
        assert!(!outcome.is_degraded());
        assert_eq!(outcome.error(), None);
        assert_eq!(outcome.into_value(), 7);
    }

    #[test]
    fn test_from_result_err_uses_fallback() {
        let outcome: StageOutcome<i32> = StageOutcome::from_result(
            Err(AnalysisError::ScoringFailure("bad input".to_string())),
            || 50,
        );
        assert!(outcome.is_degraded());
        assert_eq!(*outcome.value(), 50);
        assert!(matches!(
            outcome.error(),
            Some(AnalysisError::ScoringFailure(_))
        ));
    }
}
