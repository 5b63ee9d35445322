//! Image feature vector produced by the feature extractor

use serde::{Deserialize, Serialize};

/// Width and height of the source image in pixels
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

impl ImageDimensions {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// Color-ratio and brightness statistics over the sampled pixels
///
/// Ratios are percentages (0-100) of sampled pixels that fell into each
/// color bucket. Channel means and brightness are on the 0-255 scale.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ImageFeatures {
    pub green_ratio: f64,
    pub brown_ratio: f64,
    pub yellow_ratio: f64,
    pub avg_brightness: f64,
    pub avg_red: f64,
    pub avg_green: f64,
    pub avg_blue: f64,
    pub image_dimensions: ImageDimensions,
    /// Number of pixels visited by the stride scan, never zero
    pub sample_count: u32,
}

impl ImageFeatures {
    /// Sum of the three color-bucket ratios
    pub fn bucketed_ratio(&self) -> f64 {
        self.green_ratio + self.brown_ratio + self.yellow_ratio
    }

    /// True when every floating-point field is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.green_ratio,
            self.brown_ratio,
            self.yellow_ratio,
            self.avg_brightness,
            self.avg_red,
            self.avg_green,
            self.avg_blue,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Substitute feature vector used when an image cannot be decoded or scanned.
/// Describes a mostly green 224x224 image with mild discoloration.
impl Default for ImageFeatures {
    fn default() -> Self {
        Self {
            green_ratio: 45.0,
            brown_ratio: 10.0,
            yellow_ratio: 15.0,
            avg_brightness: 120.0,
            avg_red: 100.0,
            avg_green: 130.0,
            avg_blue: 90.0,
            image_dimensions: ImageDimensions::new(224, 224),
            sample_count: 50176,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_vector_matches_documented_values() {
        let features = ImageFeatures::default();
        assert_eq!(features.green_ratio, 45.0);
        assert_eq!(features.brown_ratio, 10.0);
        assert_eq!(features.yellow_ratio, 15.0);
        assert_eq!(features.avg_brightness, 120.0);
        assert_eq!(features.image_dimensions, ImageDimensions::new(224, 224));
        assert_eq!(features.sample_count, 50176);
    }

    #[test]
    fn test_serializes_camel_case() {
        let json = serde_json::to_value(ImageFeatures::default()).unwrap();
        assert_eq!(json["greenRatio"], 45.0);
        assert_eq!(json["imageDimensions"]["width"], 224);
        assert_eq!(json["sampleCount"], 50176);
    }

    #[test]
    fn test_is_finite_detects_nan() {
        let features = ImageFeatures {
            avg_blue: f64::NAN,
            ..ImageFeatures::default()
        };
        assert!(!features.is_finite());
        assert!(ImageFeatures::default().is_finite());
    }
}
