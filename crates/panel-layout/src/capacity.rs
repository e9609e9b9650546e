//! Quick area-based capacity estimates.

use projection::LocalFrame;
use solar_common::{geometry, GeoPoint};

use crate::config::PackingConfig;

/// Planar area of a WGS84 polygon in square metres, measured in a local
/// frame anchored at its centroid. Orientation does not matter, nor does
/// an explicit closing vertex.
pub fn polygon_area_m2(polygon: &[GeoPoint]) -> f64 {
    let polygon = geometry::open_ring(polygon);
    let Some(origin) = geometry::centroid(polygon) else {
        return 0.0;
    };
    let frame = LocalFrame::new(origin);
    let local: Vec<GeoPoint> = polygon
        .iter()
        .map(|p| {
            let (x, y) = frame.to_local(*p);
            GeoPoint::new(x, y)
        })
        .collect();

    geometry::signed_area(&local).abs()
}

/// Upper-bound style estimate of how many panels a roof can hold, without
/// running the packer.
pub fn estimate_capacity(
    area_m2: f64,
    panel_width_m: f64,
    panel_height_m: f64,
    config: &PackingConfig,
) -> usize {
    let panel_area = panel_width_m * panel_height_m;
    if !(panel_area > 0.0) || !(area_m2 > 0.0) {
        return 0;
    }
    (area_m2 * config.usable_area_ratio / panel_area).floor() as usize
}
