//! Pixel-space polygons to geographic polygons.

use solar_common::{GeoPoint, PixelCoord, RasterGrid};

/// Map every vertex of a pixel-space ring through the grid's bounding box.
///
/// Vertices are placed at pixel corners (`(x, y)` is the north-west corner
/// of pixel `(x, y)`), consistent with [`RasterGrid::pixel_to_geo`].
pub fn pixels_to_geo(poly: &[PixelCoord], grid: &RasterGrid) -> Vec<GeoPoint> {
    poly.iter()
        .map(|p| grid.pixel_to_geo(p.x as f64, p.y as f64))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use solar_common::GeoBounds;

    #[test]
    fn test_pixels_to_geo() {
        let bounds = GeoBounds::new(1.0, 0.0, 1.0, 0.0).unwrap();
        let grid = RasterGrid::new(4, 4, vec![vec![0.0; 16]], bounds).unwrap();
        let ring = [
            PixelCoord::new(0, 0),
            PixelCoord::new(2, 0),
            PixelCoord::new(2, 4),
        ];
        let geo = pixels_to_geo(&ring, &grid);
        assert_eq!(geo.len(), 3);
        assert!((geo[0].lng - 0.0).abs() < 1e-12 && (geo[0].lat - 1.0).abs() < 1e-12);
        assert!((geo[1].lng - 0.5).abs() < 1e-12 && (geo[1].lat - 1.0).abs() < 1e-12);
        assert!((geo[2].lng - 0.5).abs() < 1e-12 && (geo[2].lat - 0.0).abs() < 1e-12);
    }
}
