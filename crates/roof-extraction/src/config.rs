//! Configuration for the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Configuration for roof extraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Band holding the roof mask (or any band to threshold).
    pub mask_band: usize,

    /// Band averaged over each region, typically annual flux in kWh/m².
    pub flux_band: usize,

    /// A pixel is foreground when its mask sample is `>= threshold`.
    pub threshold: f64,

    /// Regions smaller than this many pixels are discarded as noise.
    pub min_region_size: usize,

    /// Douglas-Peucker tolerance in pixels.
    pub simplify_tolerance_px: f64,

    /// Vectorize regions on the rayon pool.
    pub parallel: bool,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            mask_band: 0,
            flux_band: 1,
            threshold: 0.5,
            min_region_size: 10,
            simplify_tolerance_px: 1.0,
            parallel: true,
        }
    }
}

impl ExtractionConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("ROOF_MASK_BAND") {
            if let Ok(band) = val.parse() {
                config.mask_band = band;
            }
        }

        if let Ok(val) = std::env::var("ROOF_FLUX_BAND") {
            if let Ok(band) = val.parse() {
                config.flux_band = band;
            }
        }

        if let Ok(val) = std::env::var("ROOF_THRESHOLD") {
            if let Ok(threshold) = val.parse() {
                config.threshold = threshold;
            }
        }

        if let Ok(val) = std::env::var("ROOF_MIN_REGION_SIZE") {
            if let Ok(size) = val.parse() {
                config.min_region_size = size;
            }
        }

        if let Ok(val) = std::env::var("ROOF_SIMPLIFY_TOLERANCE_PX") {
            if let Ok(tolerance) = val.parse() {
                config.simplify_tolerance_px = tolerance;
            }
        }

        if let Ok(val) = std::env::var("ROOF_PARALLEL") {
            config.parallel = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.threshold.is_finite() {
            return Err("threshold must be finite".to_string());
        }

        if !self.simplify_tolerance_px.is_finite() || self.simplify_tolerance_px < 0.0 {
            return Err("simplify_tolerance_px must be >= 0".to_string());
        }

        Ok(())
    }
}
