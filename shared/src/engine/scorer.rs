//! Health scorer: maps a feature vector and crop type to a health assessment

use super::StageOutcome;
use crate::error::{AnalysisError, EngineResult};
use crate::models::{HealthAssessment, HealthStatus, ImageFeatures};
use crate::random::RandomSource;

const BASE_SCORE: f64 = 50.0;

/// Green coverage above this percentage earns a bonus
const GREEN_BONUS_THRESHOLD: f64 = 30.0;

/// Lighting is considered reasonable strictly inside this range
const BRIGHTNESS_RANGE: (f64, f64) = (60.0, 200.0);

const LIGHTING_BONUS: f64 = 10.0;
const GREEN_DOMINANCE_BONUS: f64 = 15.0;

/// Confidence jitter half-width, in score points
const CONFIDENCE_JITTER: f64 = 5.0;
const CONFIDENCE_RANGE: (f64, f64) = (65.0, 95.0);

/// Score a crop's health from its image features
///
/// Degrades to [`HealthAssessment::neutral`] when a feature is not a finite
/// number.
pub fn score_health<R: RandomSource + ?Sized>(
    features: &ImageFeatures,
    crop_type: &str,
    rng: &mut R,
) -> StageOutcome<HealthAssessment> {
    let result = health_score(features, crop_type).map(|score| {
        let confidence = (score + rng.next_in_range(-CONFIDENCE_JITTER, CONFIDENCE_JITTER))
            .clamp(CONFIDENCE_RANGE.0, CONFIDENCE_RANGE.1);

        HealthAssessment {
            status: HealthStatus::from_score(score),
            score: score.round() as u8,
            confidence_percent: confidence.round() as u8,
        }
    });

    StageOutcome::from_result(result, HealthAssessment::neutral)
}

/// Deterministic health score, clamped to 0-100 but not rounded
pub fn health_score(features: &ImageFeatures, crop_type: &str) -> EngineResult<f64> {
    if !features.is_finite() {
        return Err(AnalysisError::ScoringFailure(
            "feature vector contains non-finite values".to_string(),
        ));
    }

    let mut score = BASE_SCORE;

    if features.green_ratio > GREEN_BONUS_THRESHOLD {
        score += (features.green_ratio - GREEN_BONUS_THRESHOLD) * 1.5;
    }

    score -= features.brown_ratio * 2.0;
    score -= features.yellow_ratio * 1.5;

    if features.avg_brightness > BRIGHTNESS_RANGE.0
        && features.avg_brightness < BRIGHTNESS_RANGE.1
    {
        score += LIGHTING_BONUS;
    }

    if features.avg_green > features.avg_red && features.avg_green > features.avg_blue {
        score += GREEN_DOMINANCE_BONUS;
    }

    score -= crop_penalty(features, crop_type);

    Ok(score.clamp(0.0, 100.0))
}

/// Crop-specific deduction for visible disease indicators
pub fn crop_penalty(features: &ImageFeatures, crop_type: &str) -> f64 {
    match crop_type.trim().to_lowercase().as_str() {
        // Rust
        "wheat" if features.yellow_ratio > 20.0 => 20.0,
        // Blight
        "tomato" if features.brown_ratio > 15.0 => 25.0,
        // Leaf spot
        "corn" if features.yellow_ratio > 25.0 => 15.0,
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::FixedRandom;

    fn features(green: f64, brown: f64, yellow: f64) -> ImageFeatures {
        ImageFeatures {
            green_ratio: green,
            brown_ratio: brown,
            yellow_ratio: yellow,
            avg_brightness: 40.0,
            avg_red: 100.0,
            avg_green: 100.0,
            avg_blue: 100.0,
            ..ImageFeatures::default()
        }
    }

    #[test]
    fn test_base_score_without_signals() {
        assert_eq!(health_score(&features(0.0, 0.0, 0.0), "wheat").unwrap(), 50.0);
    }

    #[test]
    fn test_green_bonus_and_penalties() {
        // 50 + (60 - 30) * 1.5 - 5 * 2 - 4 * 1.5
        let score = health_score(&features(60.0, 5.0, 4.0), "rice").unwrap();
        assert!((score - 79.0).abs() < 1e-9);
    }

    #[test]
    fn test_lighting_bonus_is_exclusive() {
        let mut f = features(0.0, 0.0, 0.0);
        f.avg_brightness = 60.0;
        assert_eq!(health_score(&f, "rice").unwrap(), 50.0);
        f.avg_brightness = 61.0;
        assert_eq!(health_score(&f, "rice").unwrap(), 60.0);
        f.avg_brightness = 200.0;
        assert_eq!(health_score(&f, "rice").unwrap(), 50.0);
    }

    #[test]
    fn test_green_dominance_requires_strict_lead() {
        let mut f = features(0.0, 0.0, 0.0);
        f.avg_green = 120.0;
        f.avg_blue = 120.0;
        assert_eq!(health_score(&f, "rice").unwrap(), 50.0);
        f.avg_blue = 119.0;
        assert_eq!(health_score(&f, "rice").unwrap(), 65.0);
    }

    #[test]
    fn test_crop_penalties() {
        assert_eq!(crop_penalty(&features(0.0, 0.0, 21.0), "wheat"), 20.0);
        assert_eq!(crop_penalty(&features(0.0, 0.0, 20.0), "wheat"), 0.0);
        assert_eq!(crop_penalty(&features(0.0, 16.0, 0.0), "Tomato"), 25.0);
        assert_eq!(crop_penalty(&features(0.0, 0.0, 26.0), "corn"), 15.0);
        assert_eq!(crop_penalty(&features(0.0, 0.0, 24.0), "corn"), 0.0);
        assert_eq!(crop_penalty(&features(0.0, 40.0, 40.0), "potato"), 0.0);
    }

    #[test]
    fn test_score_clamps() {
        assert_eq!(health_score(&features(100.0, 0.0, 0.0), "rice").unwrap(), 100.0);
        assert_eq!(health_score(&features(0.0, 50.0, 50.0), "rice").unwrap(), 0.0);
    }

    #[test]
    fn test_confidence_without_jitter_tracks_score() {
        let assessment =
            score_health(&features(60.0, 5.0, 4.0), "rice", &mut FixedRandom::midpoint())
                .into_value();
        assert_eq!(assessment.status, HealthStatus::Good);
        assert_eq!(assessment.score, 79);
        assert_eq!(assessment.confidence_percent, 79);
    }

    #[test]
    fn test_confidence_clamped_to_range() {
        let low =
            score_health(&features(0.0, 50.0, 50.0), "rice", &mut FixedRandom(0.0)).into_value();
        assert_eq!(low.status, HealthStatus::Critical);
        assert_eq!(low.confidence_percent, 65);

        let high =
            score_health(&features(100.0, 0.0, 0.0), "rice", &mut FixedRandom(1.0)).into_value();
        assert_eq!(high.status, HealthStatus::Excellent);
        assert_eq!(high.confidence_percent, 95);
    }

    #[test]
    fn test_non_finite_features_degrade_to_neutral() {
        let mut f = features(50.0, 0.0, 0.0);
        f.green_ratio = f64::INFINITY;
        let outcome = score_health(&f, "wheat", &mut FixedRandom::midpoint());
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_value(), HealthAssessment::neutral());
    }
}
