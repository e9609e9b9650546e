//! Swiss LV95 (CH1903+, EPSG:2056) <-> WGS84.
//!
//! Uses the swisstopo approximate polynomial formulas. Coordinates are
//! shifted to the Bern origin (E 2 600 000, N 1 200 000) and scaled to
//! units of 1000 km before evaluation.
//!
//! Accuracy is on the order of one metre inside Switzerland and degrades
//! quickly outside it. The formulas are not meant to be extrapolated; use a
//! full datum transformation for anything beyond the Swiss border.
//!
//! Reference: swisstopo, "Approximate formulas for the transformation
//! between Swiss projection coordinates and WGS84".

use solar_common::GeoPoint;

/// LV95 easting of the projection origin (Bern).
pub const ORIGIN_EASTING: f64 = 2_600_000.0;
/// LV95 northing of the projection origin (Bern).
pub const ORIGIN_NORTHING: f64 = 1_200_000.0;

const SCALE: f64 = 1_000_000.0;

/// Convert an LV95 easting/northing pair (metres) to WGS84.
pub fn lv95_to_wgs84(easting: f64, northing: f64) -> GeoPoint {
    let y = (easting - ORIGIN_EASTING) / SCALE;
    let x = (northing - ORIGIN_NORTHING) / SCALE;

    // Results are in units of 10000"
    let lng = 2.6779094 + 4.728982 * y + 0.791484 * y * x + 0.1306 * y * x * x
        - 0.0436 * y * y * y;
    let lat = 16.9023892 + 3.238272 * x
        - 0.270978 * y * y
        - 0.002528 * x * x
        - 0.0447 * y * y * x
        - 0.0140 * x * x * x;

    GeoPoint {
        lng: lng * 100.0 / 36.0,
        lat: lat * 100.0 / 36.0,
    }
}

/// Convert a WGS84 position to LV95 `(easting, northing)` in metres.
pub fn wgs84_to_lv95(point: GeoPoint) -> (f64, f64) {
    // Auxiliary values in units of 10000" relative to Bern
    let phi = (point.lat * 3600.0 - 169_028.66) / 10_000.0;
    let lambda = (point.lng * 3600.0 - 26_782.5) / 10_000.0;

    let easting = 2_600_072.37 + 211_455.93 * lambda
        - 10_938.51 * lambda * phi
        - 0.36 * lambda * phi * phi
        - 44.54 * lambda * lambda * lambda;
    let northing = 1_200_147.07 + 308_807.95 * phi + 3_745.25 * lambda * lambda
        + 76.63 * phi * phi
        - 194.56 * lambda * lambda * phi
        + 119.79 * phi * phi * phi;

    (easting, northing)
}

/// Convert a Sonnendach-style ring of LV95 vertices to WGS84.
///
/// Sonnendach rings repeat their first vertex at the end; that closing
/// vertex is dropped so the output is an implicitly closed ring.
pub fn lv95_ring_to_wgs84(ring: &[(f64, f64)]) -> Vec<GeoPoint> {
    let open = match ring {
        [first, rest @ .., last] if !rest.is_empty() && first == last => &ring[..ring.len() - 1],
        _ => ring,
    };
    open.iter().map(|&(e, n)| lv95_to_wgs84(e, n)).collect()
}
