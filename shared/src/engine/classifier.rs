//! Disease classifier: picks the most likely disease from the crop vocabulary

use super::StageOutcome;
use crate::catalog::CropCatalog;
use crate::error::{AnalysisError, EngineResult};
use crate::models::{DiseaseAssessment, ImageFeatures, HEALTHY_LABEL};
use crate::random::RandomSource;

/// Brown coverage above this suggests blight or rot
const BROWN_THRESHOLD: f64 = 15.0;
/// Yellow coverage above this suggests rust or nutrient deficiency
const YELLOW_THRESHOLD: f64 = 20.0;
/// Green coverage below this suggests general stress
const LOW_GREEN_THRESHOLD: f64 = 20.0;

const MAX_CONFIDENCE: f64 = 95.0;

/// Classify the most likely disease for a crop
///
/// Brown signals outrank yellow signals, which outrank low greenness.
/// Degrades to [`DiseaseAssessment::unknown`] on non-finite ratios or when
/// the vocabulary has nothing to pick from.
pub fn classify_disease<R: RandomSource + ?Sized>(
    features: &ImageFeatures,
    crop_type: &str,
    catalog: &CropCatalog,
    rng: &mut R,
) -> StageOutcome<DiseaseAssessment> {
    let vocabulary = catalog.diseases(crop_type);
    StageOutcome::from_result(
        try_classify(features, vocabulary, rng),
        DiseaseAssessment::unknown,
    )
}

fn try_classify<R: RandomSource + ?Sized>(
    features: &ImageFeatures,
    vocabulary: &[String],
    rng: &mut R,
) -> EngineResult<DiseaseAssessment> {
    let ratios = [
        features.green_ratio,
        features.brown_ratio,
        features.yellow_ratio,
    ];
    if ratios.iter().any(|r| !r.is_finite()) {
        return Err(AnalysisError::ClassificationFailure(
            "color ratios contain non-finite values".to_string(),
        ));
    }

    let (label, confidence) = if features.brown_ratio > BROWN_THRESHOLD {
        (
            find_matching(vocabulary, "blight")?,
            75.0 + features.brown_ratio,
        )
    } else if features.yellow_ratio > YELLOW_THRESHOLD {
        (
            find_matching(vocabulary, "rust")?,
            70.0 + features.yellow_ratio,
        )
    } else if features.green_ratio < LOW_GREEN_THRESHOLD {
        // Everything except the trailing "Healthy" entry
        let candidates = &vocabulary[..vocabulary.len().saturating_sub(1)];
        if candidates.is_empty() {
            return Err(AnalysisError::ClassificationFailure(
                "vocabulary has no disease to pick from".to_string(),
            ));
        }
        (
            candidates[rng.next_index(candidates.len())].clone(),
            60.0 + rng.next_in_range(0.0, 20.0),
        )
    } else {
        (HEALTHY_LABEL.to_string(), 85.0 + rng.next_in_range(0.0, 10.0))
    };

    // Formulas above can exceed 100 for large ratios; only the ceiling is applied
    let confidence = confidence.min(MAX_CONFIDENCE).round() as u8;

    Ok(DiseaseAssessment::new(label, confidence))
}

/// First disease whose name contains `pattern` (case-insensitive), else the
/// first vocabulary entry
fn find_matching(vocabulary: &[String], pattern: &str) -> EngineResult<String> {
    vocabulary
        .iter()
        .find(|d| d.to_lowercase().contains(pattern))
        .or_else(|| vocabulary.first())
        .cloned()
        .ok_or_else(|| AnalysisError::ClassificationFailure("empty disease vocabulary".to_string()))
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
            ..ImageFeatures::default()
        }
    }

    fn classify(f: &ImageFeatures, crop: &str, value: f64) -> StageOutcome<DiseaseAssessment> {
        classify_disease(f, crop, &CropCatalog::builtin(), &mut FixedRandom(value))
    }

    #[test]
    fn test_brown_picks_first_blight() {
        let result = classify(&features(50.0, 16.0, 0.0), "tomato", 0.5).into_value();
        assert_eq!(result.label, "Early Blight");
        assert_eq!(result.confidence_percent, 91);
    }

    #[test]
    fn test_blight_match_is_case_insensitive() {
        let result = classify(&features(50.0, 16.0, 0.0), "corn", 0.5).into_value();
        assert_eq!(result.label, "Northern Corn Leaf Blight");
    }

    #[test]
    fn test_yellow_picks_rust() {
        let result = classify(&features(50.0, 0.0, 22.0), "corn", 0.5).into_value();
        assert_eq!(result.label, "Common Rust");
        assert_eq!(result.confidence_percent, 92);
    }

    #[test]
    fn test_missing_pattern_falls_back_to_first_entry() {
        // Rice has no rust
        let result = classify(&features(50.0, 0.0, 22.0), "rice", 0.5).into_value();
        assert_eq!(result.label, "Brown Spot");
    }

    #[test]
    fn test_confidence_ceiling() {
        let result = classify(&features(0.0, 60.0, 0.0), "potato", 0.5).into_value();
        assert_eq!(result.confidence_percent, 95);
    }

    #[test]
    fn test_low_green_picks_non_healthy_entry() {
        let catalog = CropCatalog::builtin();
        for value in [0.0, 0.25, 0.5, 0.75, 1.0] {
            let result = classify(&features(10.0, 0.0, 0.0), "wheat", value).into_value();
            assert_ne!(result.label, HEALTHY_LABEL);
            assert!(catalog.diseases("wheat").contains(&result.label));
            assert!((60..=80).contains(&result.confidence_percent));
        }
        let last = classify(&features(10.0, 0.0, 0.0), "wheat", 1.0).into_value();
        assert_eq!(last.label, "Septoria");
    }

    #[test]
    fn test_green_image_is_healthy() {
        let result = classify(&features(50.0, 0.0, 0.0), "wheat", 0.5).into_value();
        assert_eq!(result.label, HEALTHY_LABEL);
        assert_eq!(result.confidence_percent, 90);
    }

    #[test]
    fn test_unknown_crop_uses_generic_vocabulary() {
        let result = classify(&features(10.0, 0.0, 0.0), "cassava", 0.9).into_value();
        assert_eq!(result.label, "Unknown Disease");
    }

    #[test]
    fn test_healthy_only_vocabulary_degrades() {
        let catalog = CropCatalog::from_json(
            r#"{"crops": {"moss": {"diseases": ["Healthy"], "care_tips": ["a", "b", "c"]}}}"#,
        )
        .unwrap();
        let outcome = classify_disease(
            &features(5.0, 0.0, 0.0),
            "moss",
            &catalog,
            &mut FixedRandom::midpoint(),
        );
        assert!(outcome.is_degraded());
        assert_eq!(outcome.into_value(), DiseaseAssessment::unknown());
    }

    #[test]
    fn test_nan_ratio_degrades() {
        let outcome = classify(&features(f64::NAN, 0.0, 0.0), "wheat", 0.5);
        assert!(matches!(
            outcome.error(),
            Some(AnalysisError::ClassificationFailure(_))
        ));
    }
}
