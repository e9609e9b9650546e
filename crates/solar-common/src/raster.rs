//! Decoded raster tiles.
//!
//! A [`RasterGrid`] is what the fetching layer hands to the engine: one or
//! more bands of samples in row-major order (row 0 is the northern edge)
//! together with the WGS84 box the tile covers. Typical inputs are a roof
//! mask band and an annual solar flux band on the same grid.

use serde::{Deserialize, Serialize};

use crate::bbox::GeoBounds;
use crate::error::{SolarError, SolarResult};
use crate::geo::{GeoPoint, PixelCoord};

/// Immutable multi-band raster with a geographic extent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "RasterGridData")]
pub struct RasterGrid {
    width: u32,
    height: u32,
    bands: Vec<Vec<f64>>,
    bounds: GeoBounds,
}

/// Unvalidated wire form; deserialization goes through [`RasterGrid::new`].
#[derive(Deserialize)]
struct RasterGridData {
    width: u32,
    height: u32,
    bands: Vec<Vec<f64>>,
    bounds: GeoBounds,
}

impl TryFrom<RasterGridData> for RasterGrid {
    type Error = SolarError;

    fn try_from(data: RasterGridData) -> SolarResult<Self> {
        RasterGrid::new(data.width, data.height, data.bands, data.bounds)
    }
}

impl RasterGrid {
    /// Build a raster, checking that every band has exactly
    /// `width * height` samples.
    pub fn new(
        width: u32,
        height: u32,
        bands: Vec<Vec<f64>>,
        bounds: GeoBounds,
    ) -> SolarResult<Self> {
        if width == 0 || height == 0 {
            return Err(SolarError::invalid_raster(format!(
                "dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        if bands.is_empty() {
            return Err(SolarError::invalid_raster("raster has no bands"));
        }

        let expected = width as usize * height as usize;
        for (index, band) in bands.iter().enumerate() {
            if band.len() != expected {
                return Err(SolarError::invalid_raster(format!(
                    "band {} has {} samples, expected {} ({}x{})",
                    index,
                    band.len(),
                    expected,
                    width,
                    height
                )));
            }
        }
        bounds.validate()?;

        Ok(Self {
            width,
            height,
            bands,
            bounds,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn bounds(&self) -> &GeoBounds {
        &self.bounds
    }

    pub fn band_count(&self) -> usize {
        self.bands.len()
    }

    /// Total number of pixels per band.
    pub fn len(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Always false for a constructed grid; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Borrow a whole band as a flat row-major slice.
    ///
    /// # Panics
    /// If `band` is not a valid band index. Band layout is fixed at
    /// construction so a bad index is a caller bug.
    pub fn band(&self, band: usize) -> &[f64] {
        match self.bands.get(band) {
            Some(samples) => samples,
            None => panic!(
                "band index {} out of range for raster with {} bands",
                band,
                self.bands.len()
            ),
        }
    }

    /// Check whether a pixel lies on the grid.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Read one sample.
    ///
    /// # Panics
    /// If `band` is not a valid band index (see [`RasterGrid::band`]).
    pub fn sample(&self, band: usize, x: i32, y: i32) -> SolarResult<f64> {
        let samples = self.band(band);
        if !self.in_bounds(x, y) {
            return Err(SolarError::OutOfBounds {
                x: x as i64,
                y: y as i64,
                width: self.width,
                height: self.height,
            });
        }
        Ok(samples[y as usize * self.width as usize + x as usize])
    }

    /// Map pixel-space coordinates to WGS84.
    ///
    /// Pixel `(0, 0)` is the north-west corner and `(width, height)` the
    /// south-east corner; fractional positions interpolate linearly.
    pub fn pixel_to_geo(&self, x: f64, y: f64) -> GeoPoint {
        let b = &self.bounds;
        GeoPoint {
            lng: b.west + (x / self.width as f64) * (b.east - b.west),
            lat: b.north - (y / self.height as f64) * (b.north - b.south),
        }
    }

    /// Find the pixel containing a geographic position, if it is on the grid.
    pub fn geo_to_pixel(&self, point: GeoPoint) -> Option<PixelCoord> {
        if !self.bounds.contains(point) {
            return None;
        }
        let b = &self.bounds;
        let fx = (point.lng - b.west) / (b.east - b.west) * self.width as f64;
        let fy = (b.north - point.lat) / (b.north - b.south) * self.height as f64;

        // The east/south edges belong to the last column/row.
        let x = (fx.floor() as i64).min(self.width as i64 - 1) as i32;
        let y = (fy.floor() as i64).min(self.height as i64 - 1) as i32;
        Some(PixelCoord::new(x, y))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bounds() -> GeoBounds {
        GeoBounds::new(47.0, 46.0, 8.0, 7.0).unwrap()
    }

    #[test]
    fn test_band_length_mismatch() {
        let result = RasterGrid::new(3, 3, vec![vec![0.0; 9], vec![0.0; 8]], bounds());
        assert!(matches!(result, Err(SolarError::InvalidRaster(_))));
    }

    #[test]
    fn test_zero_dimension() {
        let result = RasterGrid::new(0, 3, vec![vec![]], bounds());
        assert!(matches!(result, Err(SolarError::InvalidRaster(_))));
    }

    #[test]
    fn test_pixel_to_geo_corners() {
        let grid = RasterGrid::new(10, 20, vec![vec![0.0; 200]], bounds()).unwrap();

        let nw = grid.pixel_to_geo(0.0, 0.0);
        assert!((nw.lng - 7.0).abs() < 1e-12);
        assert!((nw.lat - 47.0).abs() < 1e-12);

        let se = grid.pixel_to_geo(10.0, 20.0);
        assert!((se.lng - 8.0).abs() < 1e-12);
        assert!((se.lat - 46.0).abs() < 1e-12);
    }

    #[test]
    fn test_sample_out_of_bounds() {
        let grid = RasterGrid::new(2, 2, vec![vec![1.0, 2.0, 3.0, 4.0]], bounds()).unwrap();
        assert_eq!(grid.sample(0, 1, 1).unwrap(), 4.0);
        assert!(matches!(
            grid.sample(0, 2, 0),
            Err(SolarError::OutOfBounds { x: 2, y: 0, .. })
        ));
        assert!(grid.sample(0, 0, -1).is_err());
    }

    #[test]
    #[should_panic(expected = "band index 3 out of range")]
    fn test_bad_band_panics() {
        let grid = RasterGrid::new(1, 1, vec![vec![1.0]], bounds()).unwrap();
        let _ = grid.sample(3, 0, 0);
    }

    #[test]
    fn test_geo_to_pixel() {
        let grid = RasterGrid::new(10, 10, vec![vec![0.0; 100]], bounds()).unwrap();
        assert_eq!(
            grid.geo_to_pixel(GeoPoint::new(7.05, 46.95)),
            Some(PixelCoord::new(0, 0))
        );
        assert_eq!(
            grid.geo_to_pixel(GeoPoint::new(8.0, 46.0)),
            Some(PixelCoord::new(9, 9))
        );
        assert_eq!(grid.geo_to_pixel(GeoPoint::new(9.0, 46.5)), None);
    }
}
