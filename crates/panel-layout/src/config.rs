//! Tunable constants for panel layout.

use serde::{Deserialize, Serialize};

/// Configuration for the panel packer.
///
/// The defaults are empirical and carry no deeper meaning; adjust them per
/// deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PackingConfig {
    /// Candidate grid half-extent as a multiple of the polygon's radius
    /// around its centroid. Must be at least 1 to cover the polygon under
    /// any rotation.
    pub grid_margin_factor: f64,

    /// Share of the roof area assumed usable by the quick capacity estimate.
    pub usable_area_ratio: f64,

    /// Also try grids shifted by half a step on each axis and keep the
    /// phase that fits the most panels.
    pub phase_search: bool,
}

impl Default for PackingConfig {
    fn default() -> Self {
        Self {
            grid_margin_factor: 1.5,
            usable_area_ratio: 0.6,
            phase_search: true,
        }
    }
}

impl PackingConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PANEL_GRID_MARGIN") {
            if let Ok(margin) = val.parse() {
                config.grid_margin_factor = margin;
            }
        }

        if let Ok(val) = std::env::var("PANEL_USABLE_AREA_RATIO") {
            if let Ok(ratio) = val.parse() {
                config.usable_area_ratio = ratio;
            }
        }

        if let Ok(val) = std::env::var("PANEL_PHASE_SEARCH") {
            config.phase_search = val.to_lowercase() == "true" || val == "1";
        }

        config
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.grid_margin_factor.is_finite() || self.grid_margin_factor < 1.0 {
            return Err("grid_margin_factor must be >= 1.0".to_string());
        }

        if !(self.usable_area_ratio > 0.0 && self.usable_area_ratio <= 1.0) {
            return Err("usable_area_ratio must be in (0, 1]".to_string());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = PackingConfig::default();
        assert_eq!(config.grid_margin_factor, 1.5);
        assert_eq!(config.usable_area_ratio, 0.6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_values() {
        let config = PackingConfig {
            grid_margin_factor: 0.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PackingConfig {
            usable_area_ratio: 0.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
