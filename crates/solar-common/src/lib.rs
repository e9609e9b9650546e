//! Common types and utilities shared across the solar roof engine crates.

pub mod bbox;
pub mod error;
pub mod geo;
pub mod geometry;
pub mod raster;
pub mod region;

pub use bbox::GeoBounds;
pub use error::{SolarError, SolarResult};
pub use geo::{GeoPoint, PixelCoord};
pub use raster::RasterGrid;
pub use region::{ExclusionZone, PanelFootprint, PixelRegion, RoofRegion};
