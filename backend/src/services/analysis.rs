//! Crop photo analysis service
//!
//! Wraps the scoring engine with the work the engine leaves to its caller:
//! decoding uploads off the async runtime, substituting the default feature
//! vector when decoding fails, and timing the whole request.

use std::sync::Arc;
use std::time::Instant;

use axum::body::Bytes;
use tokio::task::JoinError;
use serde::Serialize;
use shared::{
    validate_crop_type, validate_features, validate_upload_size, AnalysisResult, CropCatalog,
    CropHealthAnalyzer, ImageFeatures,
};

use crate::config::AnalysisConfig;
use crate::error::{AppError, AppResult};

/// Analysis service shared by all handlers
#[derive(Clone)]
pub struct AnalysisService {
    analyzer: CropHealthAnalyzer,
    max_upload_bytes: usize,
}

/// Crop type with its disease vocabulary
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CropSummary {
    pub crop_type: String,
    pub diseases: Vec<String>,
}

/// Care tips for one crop type
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CareTips {
    pub crop_type: String,
    /// False when the generic tips were returned for an unknown crop
    pub known_crop: bool,
    pub tips: Vec<String>,
}

impl AnalysisService {
    /// Create a new AnalysisService instance
    pub fn new(catalog: CropCatalog, max_upload_bytes: usize) -> Self {
        Self {
            analyzer: CropHealthAnalyzer::new(Arc::new(catalog)),
            max_upload_bytes,
        }
    }

    /// Build the service from configuration, loading the catalog override if set
    pub fn from_config(config: &AnalysisConfig) -> AppResult<Self> {
        let catalog = load_catalog(config)?;
        tracing::info!("Crop catalog loaded with {} crop types", catalog.len());
        Ok(Self::new(catalog, config.max_upload_bytes))
    }

    pub fn max_upload_bytes(&self) -> usize {
        self.max_upload_bytes
    }

    pub fn catalog(&self) -> &CropCatalog {
        self.analyzer.catalog()
    }

    /// Analyze an uploaded photo
    ///
    /// Only request validation can fail; an undecodable image is analyzed
    /// with the default feature vector.
    pub async fn analyze_upload(
        &self,
        image: Bytes,
        crop_type: String,
    ) -> AppResult<AnalysisResult> {
        validate_crop_type(&crop_type).map_err(|msg| AppError::field("crop_type", msg))?;
        validate_upload_size(image.len(), self.max_upload_bytes).map_err(|msg| {
            AppError::PayloadTooLarge(format!(
                "{}: {} bytes, the limit is {} bytes",
                msg,
                image.len(),
                self.max_upload_bytes
            ))
        })?;

        let started = Instant::now();
        let crop_type = crop_type.trim().to_string();
        let analyzer = self.analyzer.clone();
        let task_crop_type = crop_type.clone();
        let joined = tokio::task::spawn_blocking(move || {
            analyze_image_bytes(&analyzer, &image, &task_crop_type)
        })
        .await;

        let mut result = self.recover_from_join(joined, &crop_type);
        result.processing_duration_seconds = started.elapsed().as_secs_f64();
        Ok(result)
    }

    /// Unwrap the blocking analysis task, answering with the fallback result
    /// if the task panicked or was cancelled
    fn recover_from_join(
        &self,
        joined: Result<AnalysisResult, JoinError>,
        crop_type: &str,
    ) -> AnalysisResult {
        joined.unwrap_or_else(|e| {
            tracing::warn!("Analysis task failed, using fallback result: {}", e);
            self.analyzer.fallback_result(crop_type, &mut rand::thread_rng())
        })
    }

    /// Re-score a stored feature vector
    pub fn analyze_features(
        &self,
        features: ImageFeatures,
        crop_type: &str,
    ) -> AppResult<AnalysisResult> {
        validate_crop_type(crop_type).map_err(|msg| AppError::field("cropType", msg))?;
        validate_features(&features).map_err(|msg| AppError::field("features", msg))?;

        let mut rng = rand::thread_rng();
        Ok(self
            .analyzer
            .analyze_features(features, crop_type.trim(), &mut rng))
    }

    /// Care tips for a crop type
    pub fn care_tips(&self, crop_type: &str) -> AppResult<CareTips> {
        validate_crop_type(crop_type).map_err(|msg| AppError::field("crop_type", msg))?;
        let crop_type = crop_type.trim().to_lowercase();

        Ok(CareTips {
            known_crop: self.catalog().contains(&crop_type),
            tips: self.analyzer.care_tips(&crop_type).to_vec(),
            crop_type,
        })
    }

    /// All known crop types with their disease vocabularies
    pub fn list_crops(&self) -> Vec<CropSummary> {
        let catalog = self.catalog();
        catalog
            .crop_types()
            .map(|crop_type| CropSummary {
                crop_type: crop_type.to_string(),
                diseases: catalog.diseases(crop_type).to_vec(),
            })
            .collect()
    }
}

/// Decode and analyze image bytes, substituting the default feature vector
/// when the bytes are not a decodable image
pub fn analyze_image_bytes(
    analyzer: &CropHealthAnalyzer,
    bytes: &[u8],
    crop_type: &str,
) -> AnalysisResult {
    let mut rng = rand::thread_rng();

    match image::load_from_memory(bytes) {
        Ok(image) => {
            tracing::debug!(
                "Decoded {}x{} image for {} analysis",
                image.width(),
                image.height(),
                crop_type
            );
            analyzer.analyze(&image, crop_type, &mut rng)
        }
        Err(e) => {
            tracing::warn!("Image decode failed, using default features: {}", e);
            analyzer.analyze_features(ImageFeatures::default(), crop_type, &mut rng)
        }
    }
}

/// Load the crop catalog override, or the built-in catalog when none is set
pub fn load_catalog(config: &AnalysisConfig) -> AppResult<CropCatalog> {
    match &config.catalog_path {
        Some(path) => {
            let json = std::fs::read_to_string(path).map_err(|e| {
                AppError::Configuration(format!("Cannot read crop catalog {}: {}", path, e))
            })?;
            Ok(CropCatalog::from_json(&json)?)
        }
        None => Ok(CropCatalog::builtin()),
    }
}
