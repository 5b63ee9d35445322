//! Validation utilities for the Crop Health Monitor

use crate::models::{AnalysisResult, ImageFeatures};

/// Allowance for floating-point drift when ratios are summed
const RATIO_TOLERANCE: f64 = 1e-6;

// ============================================================================
// Request Validations
// ============================================================================

/// Validate a crop type key supplied by a client
/// Accepts 1-32 characters: ASCII letters, digits, spaces, '-' and '_'
pub fn validate_crop_type(crop_type: &str) -> Result<(), &'static str> {
    let trimmed = crop_type.trim();
    if trimmed.is_empty() {
        return Err("Crop type is required");
    }
    if trimmed.len() > 32 {
        return Err("Crop type must be at most 32 characters");
    }
    if !trimmed
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-' || c == '_')
    {
        return Err("Crop type may only contain letters, digits, spaces, '-' and '_'");
    }
    Ok(())
}

/// Validate an uploaded image is within the size limit
///
/// Empty uploads pass; they are analyzed like any other undecodable image.
pub fn validate_upload_size(len: usize, max_bytes: usize) -> Result<(), &'static str> {
    if len > max_bytes {
        return Err("Uploaded image exceeds the maximum size");
    }
    Ok(())
}

// ============================================================================
// Engine Invariants
// ============================================================================

/// Validate a feature vector satisfies the extractor's invariants
pub fn validate_features(features: &ImageFeatures) -> Result<(), &'static str> {
    if !features.is_finite() {
        return Err("Feature values must be finite");
    }

    let ratios = [
        features.green_ratio,
        features.brown_ratio,
        features.yellow_ratio,
    ];
    if ratios.iter().any(|r| !(0.0..=100.0).contains(r)) {
        return Err("Color ratios must be between 0 and 100");
    }
    if features.bucketed_ratio() > 100.0 + RATIO_TOLERANCE {
        return Err("Color ratios cannot sum to more than 100");
    }

    let means = [
        features.avg_brightness,
        features.avg_red,
        features.avg_green,
        features.avg_blue,
    ];
    if means.iter().any(|m| !(0.0..=255.0).contains(m)) {
        return Err("Channel means must be between 0 and 255");
    }

    if features.sample_count == 0 {
        return Err("Sample count must be at least 1");
    }
    Ok(())
}

/// Validate an assembled analysis result before it leaves the engine
pub fn validate_analysis_result(result: &AnalysisResult) -> Result<(), &'static str> {
    validate_features(&result.features)?;
    validate_assessments(result)
}

/// Validate the assessment fields of a result, leaving the features unchecked
///
/// Used when a stage already degraded on those features and substituted its
/// own fallback value.
pub fn validate_assessments(result: &AnalysisResult) -> Result<(), &'static str> {
    if result.health_score > 100 {
        return Err("Health score must be between 0 and 100");
    }
    if result.confidence_percent > 95 {
        return Err("Health confidence cannot exceed 95");
    }
    if result.disease_confidence_percent > 95 {
        return Err("Disease confidence cannot exceed 95");
    }
    if result.disease_label.trim().is_empty() {
        return Err("Disease label is required");
    }
    if result.recommendation_text.trim().is_empty() {
        return Err("Recommendation is required");
    }
    Ok(())
}
