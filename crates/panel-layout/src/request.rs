//! Packing request and result types.

use serde::{Deserialize, Serialize};
use solar_common::{ExclusionZone, GeoPoint, PanelFootprint, SolarError, SolarResult};

/// Accepted panels, in candidate order.
pub type PackingResult = Vec<PanelFootprint>;

/// One layout job: a roof outline and the panel to tile it with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackingRequest {
    pub target_polygon: Vec<GeoPoint>,
    /// Panel extent along the roof's principal direction, in metres.
    pub panel_width_m: f64,
    /// Panel extent across the principal direction, in metres.
    pub panel_height_m: f64,
    /// Clearance between neighbouring panels, in metres.
    #[serde(default)]
    pub gap_m: f64,
    #[serde(default)]
    pub exclusions: Vec<ExclusionZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_panels: Option<usize>,
}

impl PackingRequest {
    pub fn new(target_polygon: Vec<GeoPoint>, panel_width_m: f64, panel_height_m: f64) -> Self {
        Self {
            target_polygon,
            panel_width_m,
            panel_height_m,
            gap_m: 0.0,
            exclusions: Vec::new(),
            max_panels: None,
        }
    }

    pub fn with_gap(mut self, gap_m: f64) -> Self {
        self.gap_m = gap_m;
        self
    }

    pub fn with_exclusion(mut self, zone: ExclusionZone) -> Self {
        self.exclusions.push(zone);
        self
    }

    pub fn with_max_panels(mut self, max_panels: usize) -> Self {
        self.max_panels = Some(max_panels);
        self
    }

    /// Check the panel dimensions. Polygon shape is not checked here: a
    /// degenerate outline is a valid request that yields no panels.
    pub fn validate(&self) -> SolarResult<()> {
        if !(self.panel_width_m.is_finite() && self.panel_width_m > 0.0) {
            return Err(SolarError::invalid_parameter(
                "panelWidthM",
                format!("must be > 0, got {}", self.panel_width_m),
            ));
        }
        if !(self.panel_height_m.is_finite() && self.panel_height_m > 0.0) {
            return Err(SolarError::invalid_parameter(
                "panelHeightM",
                format!("must be > 0, got {}", self.panel_height_m),
            ));
        }
        if !(self.gap_m.is_finite() && self.gap_m >= 0.0) {
            return Err(SolarError::invalid_parameter(
                "gapM",
                format!("must be >= 0, got {}", self.gap_m),
            ));
        }
        Ok(())
    }
}
