//! Crop catalog: per-crop disease vocabularies and care tips
//!
//! The catalog is built once at startup (either the built-in table or a JSON
//! override) and shared read-only across requests.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AnalysisError, EngineResult};
use crate::models::HEALTHY_LABEL;

/// Number of care tips every crop profile carries
pub const CARE_TIP_COUNT: usize = 3;

const FALLBACK_DISEASES: [&str; 2] = ["Unknown Disease", HEALTHY_LABEL];

const FALLBACK_CARE_TIPS: [&str; CARE_TIP_COUNT] = [
    "Monitor plant health regularly",
    "Provide adequate water and nutrients",
    "Protect from pests and diseases",
];

const BUILTIN_CROPS: [(&str, &[&str], [&str; CARE_TIP_COUNT]); 5] = [
    (
        "wheat",
        &["Rust", "Blight", "Powdery Mildew", "Septoria", HEALTHY_LABEL],
        [
            "Water deeply but less frequently",
            "Monitor for rust during humid conditions",
            "Harvest when grain moisture is 13-15%",
        ],
    ),
    (
        "corn",
        &[
            "Northern Corn Leaf Blight",
            "Common Rust",
            "Gray Leaf Spot",
            HEALTHY_LABEL,
        ],
        [
            "Ensure consistent soil moisture during tasseling",
            "Watch for corn borer and rootworm",
            "Side-dress with nitrogen at V6 stage",
        ],
    ),
    (
        "tomato",
        &[
            "Early Blight",
            "Late Blight",
            "Bacterial Spot",
            "Mosaic Virus",
            HEALTHY_LABEL,
        ],
        [
            "Provide consistent watering to prevent blossom end rot",
            "Stake or cage plants for support",
            "Remove suckers for better fruit development",
        ],
    ),
    (
        "potato",
        &["Late Blight", "Early Blight", "Common Scab", HEALTHY_LABEL],
        [
            "Hill soil around plants as they grow",
            "Avoid overwatering to prevent rot",
            "Harvest after foliage dies back",
        ],
    ),
    (
        "rice",
        &["Brown Spot", "Bacterial Blight", "Blast", HEALTHY_LABEL],
        [
            "Maintain 2-5cm water depth during growing season",
            "Monitor for blast disease in humid conditions",
            "Drain fields 2 weeks before harvest",
        ],
    ),
];

/// Disease vocabulary and care tips for one crop type
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CropProfile {
    /// Ordered disease names, conventionally ending with "Healthy"
    pub diseases: Vec<String>,
    pub care_tips: Vec<String>,
}

impl CropProfile {
    fn from_static(diseases: &[&str], care_tips: &[&str]) -> Self {
        Self {
            diseases: diseases.iter().map(|d| d.to_string()).collect(),
            care_tips: care_tips.iter().map(|t| t.to_string()).collect(),
        }
    }
}

/// JSON document accepted by [`CropCatalog::from_json`]
#[derive(Debug, Deserialize)]
struct CatalogDocument {
    crops: BTreeMap<String, CropProfile>,
}

/// Immutable crop-type lookup table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CropCatalog {
    crops: BTreeMap<String, CropProfile>,
    fallback: CropProfile,
}

impl CropCatalog {
    /// Catalog with the five built-in crops
    pub fn builtin() -> Self {
        let crops = BUILTIN_CROPS
            .iter()
            .map(|(key, diseases, tips)| {
                (key.to_string(), CropProfile::from_static(diseases, tips))
            })
            .collect();

        Self {
            crops,
            fallback: CropProfile::from_static(&FALLBACK_DISEASES, &FALLBACK_CARE_TIPS),
        }
    }

    /// Parse and validate a catalog from JSON
    ///
    /// Expected shape: `{ "crops": { "<key>": { "diseases": [..], "care_tips": [..] } } }`
    pub fn from_json(json: &str) -> EngineResult<Self> {
        let document: CatalogDocument =
            serde_json::from_str(json).map_err(|e| AnalysisError::Catalog(e.to_string()))?;

        if document.crops.is_empty() {
            return Err(AnalysisError::Catalog("catalog defines no crops".to_string()));
        }

        for (key, profile) in &document.crops {
            validate_profile(key, profile)?;
        }

        Ok(Self {
            crops: document.crops,
            fallback: CropProfile::from_static(&FALLBACK_DISEASES, &FALLBACK_CARE_TIPS),
        })
    }

    /// Profile for a crop type, falling back to the generic profile
    pub fn profile(&self, crop_type: &str) -> &CropProfile {
        self.crops
            .get(&normalize_key(crop_type))
            .unwrap_or(&self.fallback)
    }

    /// Disease vocabulary for a crop type
    pub fn diseases(&self, crop_type: &str) -> &[String] {
        &self.profile(crop_type).diseases
    }

    /// The three care tips for a crop type
    pub fn care_tips(&self, crop_type: &str) -> &[String] {
        &self.profile(crop_type).care_tips
    }

    pub fn contains(&self, crop_type: &str) -> bool {
        self.crops.contains_key(&normalize_key(crop_type))
    }

    /// Known crop keys in sorted order
    pub fn crop_types(&self) -> impl Iterator<Item = &str> {
        self.crops.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.crops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.crops.is_empty()
    }
}

impl Default for CropCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn normalize_key(crop_type: &str) -> String {
    crop_type.trim().to_lowercase()
}

fn validate_profile(key: &str, profile: &CropProfile) -> EngineResult<()> {
    if key.is_empty() || key != normalize_key(key) {
        return Err(AnalysisError::Catalog(format!(
            "crop key '{}' must be lower-case without surrounding whitespace",
            key
        )));
    }
    if profile.diseases.is_empty() {
        return Err(AnalysisError::Catalog(format!(
            "crop '{}' has an empty disease vocabulary",
            key
        )));
    }
    if profile.diseases.iter().any(|d| d.trim().is_empty()) {
        return Err(AnalysisError::Catalog(format!(
            "crop '{}' has a blank disease name",
            key
        )));
    }
    if profile.care_tips.len() != CARE_TIP_COUNT {
        return Err(AnalysisError::Catalog(format!(
            "crop '{}' must have exactly {} care tips, found {}",
            key,
            CARE_TIP_COUNT,
            profile.care_tips.len()
        )));
    }
    Ok(())
}
