//! Outputs of the extraction pipeline and the panel packer.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::geo::{GeoPoint, PixelCoord};

/// A connected set of foreground pixels.
///
/// Pixels are unique and kept in discovery order so that downstream sums
/// are reproducible run to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelRegion {
    pixels: Vec<PixelCoord>,
}

impl PixelRegion {
    /// Build a region, dropping repeated coordinates (first occurrence wins).
    pub fn new(pixels: Vec<PixelCoord>) -> Self {
        let mut seen = HashSet::with_capacity(pixels.len());
        let pixels = pixels.into_iter().filter(|p| seen.insert(*p)).collect();
        Self { pixels }
    }

    pub fn pixels(&self) -> &[PixelCoord] {
        &self.pixels
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Inclusive pixel extent as `(min, max)`, `None` for an empty region.
    pub fn extent(&self) -> Option<(PixelCoord, PixelCoord)> {
        let first = *self.pixels.first()?;
        let (mut min, mut max) = (first, first);
        for p in &self.pixels[1..] {
            min.x = min.x.min(p.x);
            min.y = min.y.min(p.y);
            max.x = max.x.max(p.x);
            max.y = max.y.max(p.y);
        }
        Some((min, max))
    }

    /// Coordinates as a set, for order-independent comparisons.
    pub fn to_set(&self) -> HashSet<PixelCoord> {
        self.pixels.iter().copied().collect()
    }
}

/// One extracted roof surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoofRegion {
    /// Simplified outer ring in WGS84, implicitly closed.
    pub outline: Vec<GeoPoint>,
    /// Mean of the flux band over the region's pixels.
    pub average_flux: f64,
    pub pixel_count: usize,
}

/// A placed panel, stored as its four resolved corners.
///
/// Corners run around the rectangle in order so they can be drawn as a ring
/// directly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PanelFootprint {
    pub corners: [GeoPoint; 4],
}

impl PanelFootprint {
    /// Mean of the corners.
    pub fn center(&self) -> GeoPoint {
        let (lng, lat) = self
            .corners
            .iter()
            .fold((0.0, 0.0), |(lng, lat), c| (lng + c.lng, lat + c.lat));
        GeoPoint::new(lng / 4.0, lat / 4.0)
    }
}

/// An area panels must keep clear of (chimney, skylight, dormer...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExclusionZone {
    pub polygon: Vec<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl ExclusionZone {
    pub fn new(polygon: Vec<GeoPoint>) -> Self {
        Self {
            polygon,
            label: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }
}
