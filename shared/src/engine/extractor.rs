//! Feature extractor: strided pixel sampling and color bucketing

use image::{DynamicImage, GenericImageView, RgbImage, RgbaImage};

use super::StageOutcome;
use crate::error::{AnalysisError, EngineResult};
use crate::models::{ImageDimensions, ImageFeatures};

/// Only pixels whose x and y are both multiples of this stride are sampled
pub const SAMPLE_STRIDE: u32 = 10;

/// Decoded raster with per-pixel RGB access
pub trait PixelSource {
    /// (width, height) in pixels
    fn dimensions(&self) -> (u32, u32);

    /// RGB channels at (x, y), or `None` if the pixel cannot be read
    fn rgb(&self, x: u32, y: u32) -> Option<[u8; 3]>;
}

impl PixelSource for RgbImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgb(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.get_pixel_checked(x, y).map(|p| p.0)
    }
}

impl PixelSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgb(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.get_pixel_checked(x, y).map(|p| [p[0], p[1], p[2]])
    }
}

impl PixelSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    fn rgb(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        if !self.in_bounds(x, y) {
            return None;
        }
        let pixel = self.get_pixel(x, y);
        Some([pixel[0], pixel[1], pixel[2]])
    }
}

/// Color bucket a sampled pixel can fall into
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorBucket {
    Green,
    Brown,
    Yellow,
}

/// Classify one pixel; first matching bucket wins
pub fn classify_pixel(r: u8, g: u8, b: u8) -> Option<ColorBucket> {
    if g > r && g > b && g > 100 {
        Some(ColorBucket::Green)
    } else if r > 120 && g > 80 && b < 80 {
        Some(ColorBucket::Brown)
    } else if r > 150 && g > 150 && b < 100 {
        Some(ColorBucket::Yellow)
    } else {
        None
    }
}

/// Running sums over the sampled pixels
#[derive(Debug, Default)]
struct ColorTally {
    green: u32,
    brown: u32,
    yellow: u32,
    samples: u32,
    red_sum: f64,
    green_sum: f64,
    blue_sum: f64,
    brightness_sum: f64,
}

impl ColorTally {
    fn record(&mut self, [r, g, b]: [u8; 3]) {
        let (rf, gf, bf) = (f64::from(r), f64::from(g), f64::from(b));
        self.red_sum += rf;
        self.green_sum += gf;
        self.blue_sum += bf;
        self.brightness_sum += (rf + gf + bf) / 3.0;

        match classify_pixel(r, g, b) {
            Some(ColorBucket::Green) => self.green += 1,
            Some(ColorBucket::Brown) => self.brown += 1,
            Some(ColorBucket::Yellow) => self.yellow += 1,
            None => {}
        }

        self.samples += 1;
    }

    fn into_features(self, dimensions: ImageDimensions) -> ImageFeatures {
        // An empty scan divides by one so every statistic resolves to zero
        let samples = self.samples.max(1);
        let divisor = f64::from(samples);
        let ratio = |count: u32| f64::from(count) / divisor * 100.0;

        ImageFeatures {
            green_ratio: ratio(self.green),
            brown_ratio: ratio(self.brown),
            yellow_ratio: ratio(self.yellow),
            avg_brightness: self.brightness_sum / divisor,
            avg_red: self.red_sum / divisor,
            avg_green: self.green_sum / divisor,
            avg_blue: self.blue_sum / divisor,
            image_dimensions: dimensions,
            sample_count: samples,
        }
    }
}

/// Reduce an image to its feature vector
///
/// Degrades to [`ImageFeatures::default`] when a sampled pixel cannot be read.
pub fn extract_features<P: PixelSource + ?Sized>(image: &P) -> StageOutcome<ImageFeatures> {
    StageOutcome::from_result(try_extract_features(image), ImageFeatures::default)
}

fn try_extract_features<P: PixelSource + ?Sized>(image: &P) -> EngineResult<ImageFeatures> {
    let (width, height) = image.dimensions();
    let mut tally = ColorTally::default();

    for y in (0..height).step_by(SAMPLE_STRIDE as usize) {
        for x in (0..width).step_by(SAMPLE_STRIDE as usize) {
            let rgb = image.rgb(x, y).ok_or_else(|| {
                AnalysisError::ExtractionFailure(format!(
                    "pixel ({}, {}) unreadable in {}x{} image",
                    x, y, width, height
                ))
            })?;
            tally.record(rgb);
        }
    }

    let features = tally.into_features(ImageDimensions::new(width, height));
    tracing::debug!(
        green = features.green_ratio,
        brown = features.brown_ratio,
        yellow = features.yellow_ratio,
        brightness = features.avg_brightness,
        samples = features.sample_count,
        "Extracted image features"
    );
    Ok(features)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn solid(width: u32, height: u32, rgb: [u8; 3]) -> RgbImage {
        RgbImage::from_pixel(width, height, Rgb(rgb))
    }

    #[test]
    fn test_classify_pixel_precedence() {
        assert_eq!(classify_pixel(40, 160, 40), Some(ColorBucket::Green));
        assert_eq!(classify_pixel(140, 90, 40), Some(ColorBucket::Brown));
        // Also satisfies the brown rule, which is checked first
        assert_eq!(classify_pixel(200, 190, 50), Some(ColorBucket::Brown));
        assert_eq!(classify_pixel(200, 190, 90), Some(ColorBucket::Yellow));
        assert_eq!(classify_pixel(30, 30, 30), None);
        // Green dominant but too dark
        assert_eq!(classify_pixel(10, 90, 10), None);
    }

    #[test]
    fn test_solid_green_image() {
        let image = solid(100, 100, [50, 180, 60]);
        let features = extract_features(&image).into_value();
        assert_eq!(features.sample_count, 100);
        assert_eq!(features.green_ratio, 100.0);
        assert_eq!(features.brown_ratio, 0.0);
        assert_eq!(features.avg_green, 180.0);
        assert!((features.avg_brightness - 290.0 / 3.0).abs() < 1e-9);
        assert_eq!(features.image_dimensions, ImageDimensions::new(100, 100));
    }

    #[test]
    fn test_stride_only_samples_multiples_of_ten() {
        // Brown everywhere except the sampled grid, which is green
        let mut image = solid(25, 25, [140, 90, 40]);
        for y in (0..25).step_by(10) {
            for x in (0..25).step_by(10) {
                image.put_pixel(x, y, Rgb([50, 180, 60]));
            }
        }
        let features = extract_features(&image).into_value();
        assert_eq!(features.sample_count, 9);
        assert_eq!(features.green_ratio, 100.0);
        assert_eq!(features.brown_ratio, 0.0);
    }

    #[test]
    fn test_mixed_buckets() {
        let mut image = solid(20, 10, [50, 180, 60]);
        image.put_pixel(10, 0, Rgb([140, 90, 40]));
        let features = extract_features(&image).into_value();
        assert_eq!(features.sample_count, 2);
        assert_eq!(features.green_ratio, 50.0);
        assert_eq!(features.brown_ratio, 50.0);
        assert_eq!(features.yellow_ratio, 0.0);
    }

    #[test]
    fn test_empty_image_does_not_divide_by_zero() {
        let image = RgbImage::new(0, 0);
        let outcome = extract_features(&image);
        assert!(!outcome.is_degraded());
        let features = outcome.into_value();
        assert_eq!(features.sample_count, 1);
        assert_eq!(features.green_ratio, 0.0);
        assert_eq!(features.avg_brightness, 0.0);
        assert!(features.is_finite());
    }

    #[test]
    fn test_dynamic_image_source() {
        let image = DynamicImage::ImageRgb8(solid(30, 30, [200, 190, 90]));
        let features = extract_features(&image).into_value();
        assert_eq!(features.yellow_ratio, 100.0);
    }

    struct TruncatedRaster;

    impl PixelSource for TruncatedRaster {
        fn dimensions(&self) -> (u32, u32) {
            (50, 50)
        }

        fn rgb(&self, x: u32, y: u32) -> Option<[u8; 3]> {
            (y < 20).then_some([x as u8, 100, 100])
        }
    }

    #[test]
    fn test_unreadable_pixel_degrades_to_default_vector() {
        let outcome = extract_features(&TruncatedRaster);
        assert!(outcome.is_degraded());
        assert!(matches!(
            outcome.error(),
            Some(AnalysisError::ExtractionFailure(_))
        ));
        assert_eq!(outcome.into_value(), ImageFeatures::default());
    }
}
