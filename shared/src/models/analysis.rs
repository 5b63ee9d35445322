//! Assembled analysis result returned to the web layer

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{HealthStatus, ImageFeatures};

/// Complete result of one crop photo analysis
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    /// Health confidence
    pub confidence_percent: u8,
    pub status_label: HealthStatus,
    pub health_score: u8,
    pub disease_label: String,
    pub disease_confidence_percent: u8,
    pub recommendation_text: String,
    /// Wall-clock time spent on the whole pipeline
    pub processing_duration_seconds: f64,
    pub analysis_timestamp: DateTime<Utc>,
    /// Raw features, kept for diagnostic display
    pub features: ImageFeatures,
}

impl AnalysisResult {
    /// Split the recommendation text back into its fragments
    pub fn recommendation_fragments(&self) -> Vec<&str> {
        self.recommendation_text
            .trim_end_matches('.')
            .split(". ")
            .filter(|s| !s.trim().is_empty())
            .collect()
    }
}
