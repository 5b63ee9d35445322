//! HTTP handlers for crop photo analysis endpoints

use axum::{
    body::Bytes,
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use shared::{AnalysisResult, ImageFeatures};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Input for re-scoring a stored feature vector
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeFeaturesInput {
    pub crop_type: String,
    pub features: ImageFeatures,
}

/// Analyze an uploaded crop photo
///
/// Multipart fields: `image` (file) and `crop_type` (text).
pub async fn analyze_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<Json<AnalysisResult>> {
    let mut image: Option<Bytes> = None;
    let mut crop_type: Option<String> = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "image" => image = Some(field.bytes().await?),
            "crop_type" | "cropType" => crop_type = Some(field.text().await?),
            _ => tracing::debug!("Ignoring multipart field {}", name),
        }
    }

    let image = image.ok_or_else(|| AppError::field("image", "Image file is required"))?;
    let crop_type =
        crop_type.ok_or_else(|| AppError::field("crop_type", "Crop type is required"))?;

    let result = state.analysis.analyze_upload(image, crop_type).await?;
    Ok(Json(result))
}

/// Re-score a feature vector without an image
pub async fn analyze_features(
    State(state): State<AppState>,
    Json(input): Json<AnalyzeFeaturesInput>,
) -> AppResult<Json<AnalysisResult>> {
    let result = state
        .analysis
        .analyze_features(input.features, &input.crop_type)?;
    Ok(Json(result))
}
