//! HTTP handlers for crop catalog endpoints

use axum::{
    extract::{Path, State},
    Json,
};

use crate::error::AppResult;
use crate::services::analysis::{CareTips, CropSummary};
use crate::AppState;

/// List known crop types with their disease vocabularies
pub async fn list_crops(State(state): State<AppState>) -> Json<Vec<CropSummary>> {
    Json(state.analysis.list_crops())
}

/// Get the care tips for a crop type
pub async fn get_care_tips(
    State(state): State<AppState>,
    Path(crop_type): Path<String>,
) -> AppResult<Json<CareTips>> {
    let tips = state.analysis.care_tips(&crop_type)?;
    Ok(Json(tips))
}
