//! Health assessment models

use serde::{Deserialize, Serialize};

/// Categorical crop health, declared from healthiest to least healthy
///
/// `Unknown` is only produced when the health scorer could not evaluate
/// its input and fell back to a neutral assessment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HealthStatus {
    /// Score 85 and above
    Excellent,
    /// Score 70-85
    Good,
    /// Score 55-70
    Fair,
    /// Score 35-55
    Poor,
    /// Below 35
    Critical,
    Unknown,
}

impl HealthStatus {
    /// Map a clamped health score to its status label
    pub fn from_score(score: f64) -> Self {
        if score >= 85.0 {
            HealthStatus::Excellent
        } else if score >= 70.0 {
            HealthStatus::Good
        } else if score >= 55.0 {
            HealthStatus::Fair
        } else if score >= 35.0 {
            HealthStatus::Poor
        } else {
            HealthStatus::Critical
        }
    }

    /// Poor and Critical crops need immediate attention
    pub fn needs_attention(&self) -> bool {
        matches!(self, HealthStatus::Poor | HealthStatus::Critical)
    }
}

impl std::fmt::Display for HealthStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HealthStatus::Excellent => write!(f, "Excellent"),
            HealthStatus::Good => write!(f, "Good"),
            HealthStatus::Fair => write!(f, "Fair"),
            HealthStatus::Poor => write!(f, "Poor"),
            HealthStatus::Critical => write!(f, "Critical"),
            HealthStatus::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Output of the health scorer
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthAssessment {
    pub status: HealthStatus,
    /// Clamped to 0-100
    pub score: u8,
    /// Clamped to 65-95 for computed assessments
    pub confidence_percent: u8,
}

impl HealthAssessment {
    /// Neutral assessment returned when scoring fails
    pub fn neutral() -> Self {
        Self {
            status: HealthStatus::Unknown,
            score: 50,
            confidence_percent: 50,
        }
    }
}
