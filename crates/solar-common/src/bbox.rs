//! Geographic bounding box of a raster tile.

use serde::{Deserialize, Serialize};

use crate::error::{SolarError, SolarResult};
use crate::geo::GeoPoint;

/// A WGS84 bounding box in degrees.
///
/// Rasters are delivered north-up, so `north > south` and `east > west`
/// always hold for a validated box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoBounds {
    pub north: f64,
    pub south: f64,
    pub east: f64,
    pub west: f64,
}

impl GeoBounds {
    /// Create a bounding box, rejecting inverted or non-finite edges.
    pub fn new(north: f64, south: f64, east: f64, west: f64) -> SolarResult<Self> {
        let bounds = Self {
            north,
            south,
            east,
            west,
        };
        bounds.validate()?;
        Ok(bounds)
    }

    /// Check the ordering invariants.
    ///
    /// Needed separately from `new` because deserialized boxes skip the
    /// constructor.
    pub fn validate(&self) -> SolarResult<()> {
        let edges = [self.north, self.south, self.east, self.west];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(SolarError::invalid_raster(format!(
                "bounds contain a non-finite edge: {:?}",
                self
            )));
        }
        if self.north <= self.south {
            return Err(SolarError::invalid_raster(format!(
                "north ({}) must be greater than south ({})",
                self.north, self.south
            )));
        }
        if self.east <= self.west {
            return Err(SolarError::invalid_raster(format!(
                "east ({}) must be greater than west ({})",
                self.east, self.west
            )));
        }
        Ok(())
    }

    /// Width of the box in degrees of longitude.
    pub fn width_deg(&self) -> f64 {
        self.east - self.west
    }

    /// Height of the box in degrees of latitude.
    pub fn height_deg(&self) -> f64 {
        self.north - self.south
    }

    /// Get the center point of the bounding box.
    pub fn center(&self) -> GeoPoint {
        GeoPoint::new(
            (self.west + self.east) / 2.0,
            (self.south + self.north) / 2.0,
        )
    }

    /// Check if a point is contained within this bbox (edges inclusive).
    pub fn contains(&self, point: GeoPoint) -> bool {
        point.lng >= self.west
            && point.lng <= self.east
            && point.lat >= self.south
            && point.lat <= self.north
    }
}
