//! Recommendation generator: turns assessments into short actionable advice

use super::StageOutcome;
use crate::error::{AnalysisError, EngineResult};
use crate::models::{DiseaseAssessment, HealthAssessment, HealthStatus};

/// Maximum number of fragments in a recommendation
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Returned when recommendation generation itself fails
pub const FALLBACK_RECOMMENDATION: &str =
    "Monitor plant health and consult agricultural expert if issues persist.";

const URGENT_ACTIONS: [&str; 3] = [
    "Immediate attention required",
    "Check soil moisture and drainage",
    "Inspect for pests and diseases",
];

/// Treatment advice keyed by a substring of the lower-cased disease label.
/// First matching key wins.
const TREATMENTS: [(&str, &[&str]); 3] = [
    (
        "rust",
        &["Apply fungicide treatment", "Improve air circulation"],
    ),
    (
        "blight",
        &[
            "Remove affected leaves immediately",
            "Apply copper-based fungicide",
            "Reduce watering frequency",
        ],
    ),
    (
        "bacterial spot",
        &["Use bactericide treatment", "Avoid overhead watering"],
    ),
];

const UNRECOGNIZED_DISEASE_ACTIONS: [&str; 2] = [
    "Consult agricultural expert for proper treatment",
    "Isolate affected plants if possible",
];

const MAINTENANCE_ACTIONS: [&str; 3] = [
    "Monitor plant health regularly",
    "Maintain optimal watering schedule",
    "Ensure adequate nutrition",
];

/// Build the recommendation text for an assessed crop
///
/// Degrades to [`FALLBACK_RECOMMENDATION`] when the disease label is blank.
pub fn generate_recommendations(
    health: &HealthAssessment,
    disease: &DiseaseAssessment,
    crop_type: &str,
) -> StageOutcome<String> {
    StageOutcome::from_result(try_generate(health, disease, crop_type), || {
        FALLBACK_RECOMMENDATION.to_string()
    })
}

fn try_generate(
    health: &HealthAssessment,
    disease: &DiseaseAssessment,
    crop_type: &str,
) -> EngineResult<String> {
    if disease.label.trim().is_empty() {
        return Err(AnalysisError::RecommendationFailure(
            "disease label is blank".to_string(),
        ));
    }

    if disease.is_healthy() && health.status == HealthStatus::Excellent {
        return Ok(format!(
            "Your {} looks excellent! Continue current care routine and monitor regularly.",
            crop_type.trim()
        ));
    }

    let fragments = recommendation_fragments(health, disease);
    Ok(format!(
        "{}.",
        fragments
            .iter()
            .take(MAX_RECOMMENDATIONS)
            .copied()
            .collect::<Vec<_>>()
            .join(". ")
    ))
}

/// Every applicable fragment in priority order, before truncation
pub fn recommendation_fragments(
    health: &HealthAssessment,
    disease: &DiseaseAssessment,
) -> Vec<&'static str> {
    let mut fragments = Vec::new();

    if health.status.needs_attention() {
        fragments.extend(URGENT_ACTIONS);
    }

    if !disease.is_healthy() {
        fragments.extend_from_slice(treatment_for(&disease.label));
    }

    if fragments.is_empty() {
        fragments.extend(MAINTENANCE_ACTIONS);
    }

    fragments
}

fn treatment_for(label: &str) -> &'static [&'static str] {
    let label = label.to_lowercase();
    TREATMENTS
        .iter()
        .find(|(key, _)| label.contains(key))
        .map(|(_, actions)| *actions)
        .unwrap_or(&UNRECOGNIZED_DISEASE_ACTIONS)
}
