//! Disease assessment models

use serde::{Deserialize, Serialize};

/// Label used when no distress signal fires
pub const HEALTHY_LABEL: &str = "Healthy";

/// Label used when the classifier could not evaluate its input
pub const UNKNOWN_DISEASE_LABEL: &str = "Unknown";

/// Output of the disease classifier
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DiseaseAssessment {
    /// Entry from the crop's disease vocabulary, or "Healthy"
    pub label: String,
    /// Never above 95
    pub confidence_percent: u8,
}

impl DiseaseAssessment {
    pub fn new(label: impl Into<String>, confidence_percent: u8) -> Self {
        Self {
            label: label.into(),
            confidence_percent,
        }
    }

    /// Fallback returned when classification fails
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_DISEASE_LABEL, 50)
    }

    pub fn is_healthy(&self) -> bool {
        self.label == HEALTHY_LABEL
    }
}
