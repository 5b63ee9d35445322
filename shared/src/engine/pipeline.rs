//! Analysis orchestrator: runs the four stages and assembles the result

use std::sync::Arc;
use std::time::Instant;

use chrono::Utc;

use super::{
    classify_disease, extract_features, generate_recommendations, score_health, PixelSource,
};
use crate::catalog::CropCatalog;
use crate::error::{AnalysisError, EngineResult};
use crate::models::{AnalysisResult, HealthStatus, ImageFeatures, UNKNOWN_DISEASE_LABEL};
use crate::random::RandomSource;
use crate::validation::{validate_analysis_result, validate_assessments};

/// Recommendation attached to the last-resort fallback result
pub const FALLBACK_RESULT_RECOMMENDATION: &str =
    "Continue monitoring plant health and maintain proper care routine.";

/// Stateless crop health analyzer
///
/// Holds only the read-only crop catalog, so one instance can serve
/// concurrent requests. Randomness is supplied per call.
#[derive(Debug, Clone)]
pub struct CropHealthAnalyzer {
    catalog: Arc<CropCatalog>,
}

impl CropHealthAnalyzer {
    pub fn new(catalog: Arc<CropCatalog>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &CropCatalog {
        &self.catalog
    }

    /// Analyze a decoded image for the given crop type
    ///
    /// Always returns a well-formed result: stage failures degrade that stage,
    /// and a result that still violates its invariants is replaced by
    /// [`Self::fallback_result`].
    pub fn analyze<P, R>(&self, image: &P, crop_type: &str, rng: &mut R) -> AnalysisResult
    where
        P: PixelSource + ?Sized,
        R: RandomSource + ?Sized,
    {
        let started = Instant::now();
        let features = extract_features(image).into_value();
        self.complete(features, crop_type, rng, started)
    }

    /// Analyze a precomputed feature vector, e.g. the default vector after a
    /// decode failure or a stored vector being re-scored
    pub fn analyze_features<R>(
        &self,
        features: ImageFeatures,
        crop_type: &str,
        rng: &mut R,
    ) -> AnalysisResult
    where
        R: RandomSource + ?Sized,
    {
        self.complete(features, crop_type, rng, Instant::now())
    }

    /// Care tips for a crop type
    pub fn care_tips(&self, crop_type: &str) -> &[String] {
        self.catalog.care_tips(crop_type)
    }

    /// Last-resort result used when the pipeline cannot produce a valid one
    pub fn fallback_result<R>(&self, crop_type: &str, rng: &mut R) -> AnalysisResult
    where
        R: RandomSource + ?Sized,
    {
        let diseases = self.catalog.diseases(crop_type);
        let disease_label = if diseases.is_empty() {
            UNKNOWN_DISEASE_LABEL.to_string()
        } else {
            diseases[rng.next_index(diseases.len())].clone()
        };

        AnalysisResult {
            confidence_percent: 75,
            status_label: HealthStatus::Good,
            health_score: 75,
            disease_label,
            disease_confidence_percent: 70,
            recommendation_text: FALLBACK_RESULT_RECOMMENDATION.to_string(),
            processing_duration_seconds: 0.0,
            analysis_timestamp: Utc::now(),
            features: ImageFeatures::default(),
        }
    }

    fn complete<R>(
        &self,
        features: ImageFeatures,
        crop_type: &str,
        rng: &mut R,
        started: Instant,
    ) -> AnalysisResult
    where
        R: RandomSource + ?Sized,
    {
        let mut result = match self.run_stages(features, crop_type, rng) {
            Ok(result) => result,
            Err(error) => {
                tracing::warn!(crop_type, error = %error, "Using fallback analysis result");
                self.fallback_result(crop_type, rng)
            }
        };
        result.processing_duration_seconds = started.elapsed().as_secs_f64();

        tracing::info!(
            crop_type,
            health = %result.status_label,
            disease = %result.disease_label,
            confidence = result.confidence_percent,
            "Crop analysis complete"
        );
        result
    }

    fn run_stages<R>(
        &self,
        features: ImageFeatures,
        crop_type: &str,
        rng: &mut R,
    ) -> EngineResult<AnalysisResult>
    where
        R: RandomSource + ?Sized,
    {
        let health = score_health(&features, crop_type, rng);
        let disease = classify_disease(&features, crop_type, &self.catalog, rng);
        let recommendation = generate_recommendations(health.value(), disease.value(), crop_type);
        let degraded =
            health.is_degraded() || disease.is_degraded() || recommendation.is_degraded();

        let (health, disease) = (health.into_value(), disease.into_value());

        let result = AnalysisResult {
            confidence_percent: health.confidence_percent,
            status_label: health.status,
            health_score: health.score,
            disease_label: disease.label,
            disease_confidence_percent: disease.confidence_percent,
            recommendation_text: recommendation.into_value(),
            processing_duration_seconds: 0.0,
            analysis_timestamp: Utc::now(),
            features,
        };

        // A degraded stage already stands in for the features it rejected
        let checked = if degraded {
            validate_assessments(&result)
        } else {
            validate_analysis_result(&result)
        };
        checked.map_err(|reason| AnalysisError::PipelineFailure(reason.to_string()))?;

        Ok(result)
    }
}

impl Default for CropHealthAnalyzer {
    fn default() -> Self {
        Self::new(Arc::new(CropCatalog::builtin()))
    }
}
