//! Integration tests for panel packing.

use panel_layout::{
    estimate_capacity, pack, pack_all, polygon_area_m2, try_pack, PackingConfig, PackingRequest,
};
use projection::{lv95_ring_to_wgs84, LocalFrame};
use solar_common::{geometry, ExclusionZone, GeoPoint, PanelFootprint, SolarError};
use test_utils::{assert_approx_eq, l_shape_m, rotated_rectangle_m, square_m, swiss};

fn frame() -> LocalFrame {
    let (_, _, lng, lat) = swiss::BERN;
    LocalFrame::new(GeoPoint::new(lng, lat))
}

fn to_geo(ring: &[(f64, f64)]) -> Vec<GeoPoint> {
    let frame = frame();
    ring.iter().map(|&(x, y)| frame.to_geo(x, y)).collect()
}

fn corners_local(panel: &PanelFootprint) -> Vec<(f64, f64)> {
    let frame = frame();
    panel.corners.iter().map(|c| frame.to_local(*c)).collect()
}

/// Panel edge bearing from corner 0 to corner 1, in the local frame.
fn panel_angle(panel: &PanelFootprint) -> f64 {
    let c = corners_local(panel);
    (c[1].1 - c[0].1).atan2(c[1].0 - c[0].0)
}

fn assert_contained(panels: &[PanelFootprint], polygon: &[GeoPoint]) {
    for panel in panels {
        for corner in &panel.corners {
            assert!(
                geometry::contains(*corner, polygon),
                "corner {:?} outside target polygon",
                corner
            );
        }
    }
}

/// Two same-sized panels on one rotated grid overlap only if their centres
/// are closer than a panel extent on both grid axes.
fn assert_no_overlap(panels: &[PanelFootprint], width: f64, height: f64) {
    let Some(first) = panels.first() else {
        return;
    };
    let (sin, cos) = panel_angle(first).sin_cos();
    let frame = frame();
    let centers: Vec<(f64, f64)> = panels.iter().map(|p| frame.to_local(p.center())).collect();

    for i in 0..centers.len() {
        for j in (i + 1)..centers.len() {
            let (dx, dy) = (centers[j].0 - centers[i].0, centers[j].1 - centers[i].1);
            let du = dx * cos + dy * sin;
            let dv = -dx * sin + dy * cos;
            assert!(
                du.abs() >= width - 1e-6 || dv.abs() >= height - 1e-6,
                "panels {} and {} overlap (du={}, dv={})",
                i,
                j,
                du,
                dv
            );
        }
    }
}

// ============================================================================
// Basic layouts
// ============================================================================

#[test]
fn test_ten_metre_square_one_metre_panels() {
    // 1 cm of slack so edge-aligned panels are not decided on the boundary
    let target = to_geo(&square_m(10.02));
    let panels = pack(&PackingRequest::new(target.clone(), 1.0, 1.0), &PackingConfig::default());

    assert!(
        (98..=102).contains(&panels.len()),
        "expected about 100 panels, got {}",
        panels.len()
    );
    assert_contained(&panels, &target);
    assert_no_overlap(&panels, 1.0, 1.0);
}

#[test]
fn test_without_phase_search_uses_centred_grid() {
    let target = to_geo(&square_m(10.02));
    let config = PackingConfig {
        phase_search: false,
        ..Default::default()
    };
    let panels = pack(&PackingRequest::new(target.clone(), 1.0, 1.0), &config);

    // A panel centred on the centroid leaves room for 4 more each way
    assert_eq!(panels.len(), 81);
    assert_contained(&panels, &target);
}

#[test]
fn test_panel_corners_keep_panel_size() {
    let target = to_geo(&square_m(10.02));
    let panels = pack(&PackingRequest::new(target, 1.7, 1.0), &PackingConfig::default());
    assert!(!panels.is_empty());

    for panel in &panels {
        let c = corners_local(panel);
        let side = |a: (f64, f64), b: (f64, f64)| ((b.0 - a.0).powi(2) + (b.1 - a.1).powi(2)).sqrt();
        assert_approx_eq!(side(c[0], c[1]), 1.7, 1e-6);
        assert_approx_eq!(side(c[1], c[2]), 1.0, 1e-6);
    }
}

#[test]
fn test_gap_reduces_count() {
    let target = to_geo(&square_m(10.02));
    let config = PackingConfig::default();
    let tight = pack(&PackingRequest::new(target.clone(), 1.0, 1.0), &config);
    let spaced = pack(&PackingRequest::new(target.clone(), 1.0, 1.0).with_gap(0.5), &config);

    assert!(spaced.len() < tight.len());
    assert_contained(&spaced, &target);
    assert_no_overlap(&spaced, 1.5, 1.5);
}

#[test]
fn test_polygon_smaller_than_panel() {
    let target = to_geo(&square_m(0.5));
    let panels = pack(&PackingRequest::new(target, 1.0, 1.0), &PackingConfig::default());
    assert!(panels.is_empty());
}

#[test]
fn test_degenerate_target_polygons() {
    let config = PackingConfig::default();
    assert!(pack(&PackingRequest::new(Vec::new(), 1.0, 1.0), &config).is_empty());

    let two = to_geo(&[(0.0, 0.0), (5.0, 0.0)]);
    assert!(pack(&PackingRequest::new(two, 1.0, 1.0), &config).is_empty());
}

#[test]
fn test_explicitly_closed_ring() {
    let open = to_geo(&square_m(10.02));
    let mut closed = open.clone();
    closed.push(open[0]);
    let config = PackingConfig::default();

    let from_open = pack(&PackingRequest::new(open, 1.0, 1.0), &config);
    let from_closed = pack(&PackingRequest::new(closed.clone(), 1.0, 1.0), &config);

    assert!((98..=102).contains(&from_closed.len()));
    assert_eq!(from_closed, from_open);
    assert_contained(&from_closed, &closed);
}

#[test]
fn test_lv95_segment_ring() {
    // Sonnendach rings arrive in LV95 with the first vertex repeated.
    // 10 cm of slack absorbs the LV95 to local-frame scale difference.
    let (e, n, _, _) = swiss::BERN;
    let mut ring: Vec<(f64, f64)> = square_m(10.1)
        .into_iter()
        .map(|(x, y)| (e + x, n + y))
        .collect();
    ring.push(ring[0]);

    let target = lv95_ring_to_wgs84(&ring);
    let panels = pack(&PackingRequest::new(target.clone(), 1.0, 1.0), &PackingConfig::default());

    assert!((98..=102).contains(&panels.len()), "got {} panels", panels.len());
    assert_contained(&panels, &target);
    assert_no_overlap(&panels, 1.0, 1.0);
}

#[test]
fn test_oversized_lattice_rejected() {
    // 1 cm panels on a 1 km roof
    let target = to_geo(&square_m(1000.0));
    let req = PackingRequest::new(target, 0.01, 0.01);

    match try_pack(&req, &PackingConfig::default()) {
        Err(SolarError::InvalidParameter { param, .. }) => assert_eq!(param, "targetPolygon"),
        other => panic!("expected InvalidParameter, got {:?}", other.map(|p| p.len())),
    }
    assert!(pack(&req, &PackingConfig::default()).is_empty());
}

#[test]
fn test_invalid_panel_size_reported() {
    let target = to_geo(&square_m(10.0));
    let result = try_pack(&PackingRequest::new(target, 0.0, 1.0), &PackingConfig::default());

    match result {
        Err(SolarError::InvalidParameter { param, .. }) => assert_eq!(param, "panelWidthM"),
        other => panic!("expected InvalidParameter, got {:?}", other.map(|p| p.len())),
    }
}

// ============================================================================
// Orientation
// ============================================================================

#[test]
fn test_rotated_rectangle_aligned_with_longest_edge() {
    let target = to_geo(&rotated_rectangle_m(8.02, 4.02, 30.0));
    let panels = pack(&PackingRequest::new(target.clone(), 1.0, 1.0), &PackingConfig::default());

    assert_eq!(panels.len(), 32);
    assert_contained(&panels, &target);
    assert_no_overlap(&panels, 1.0, 1.0);
    // Opposite long edges tie; either one gives the same grid axis
    for panel in &panels {
        let axis = panel_angle(panel).to_degrees().rem_euclid(180.0);
        assert_approx_eq!(axis, 30.0, 1e-6);
    }
}

#[test]
fn test_l_shape() {
    let target = to_geo(&l_shape_m());
    let panels = pack(&PackingRequest::new(target.clone(), 1.0, 1.0), &PackingConfig::default());

    // 80 m2 of roof, and the notch must stay empty
    assert!(!panels.is_empty());
    assert!(panels.len() <= 80);
    assert_contained(&panels, &target);
    assert_no_overlap(&panels, 1.0, 1.0);

    let frame = frame();
    for panel in &panels {
        let (x, y) = frame.to_local(panel.center());
        assert!(!(x > -2.0 && y > -2.0), "panel centre ({}, {}) in the notch", x, y);
    }
}

// ============================================================================
// Exclusions and limits
// ============================================================================

#[test]
fn test_exclusion_zone_kept_clear() {
    let target = to_geo(&square_m(10.02));
    let chimney = to_geo(&square_m(2.02));
    let config = PackingConfig::default();

    let open = pack(&PackingRequest::new(target.clone(), 1.0, 1.0), &config);
    let req = PackingRequest::new(target.clone(), 1.0, 1.0)
        .with_exclusion(ExclusionZone::new(chimney.clone()).with_label("chimney"));
    let panels = pack(&req, &config);

    assert!(!panels.is_empty());
    assert!(panels.len() < open.len());
    assert_contained(&panels, &target);
    for panel in &panels {
        for corner in &panel.corners {
            assert!(!geometry::contains(*corner, &chimney));
        }
    }
}

#[test]
fn test_exclusion_covering_roof() {
    let target = to_geo(&square_m(10.02));
    let req = PackingRequest::new(target, 1.0, 1.0)
        .with_exclusion(ExclusionZone::new(to_geo(&square_m(30.0))));
    assert!(pack(&req, &PackingConfig::default()).is_empty());
}

#[test]
fn test_max_panels() {
    let target = to_geo(&square_m(10.02));
    let config = PackingConfig::default();

    let panels = pack(&PackingRequest::new(target.clone(), 1.0, 1.0).with_max_panels(5), &config);
    assert_eq!(panels.len(), 5);

    let none = pack(&PackingRequest::new(target, 1.0, 1.0).with_max_panels(0), &config);
    assert!(none.is_empty());
}

// ============================================================================
// Determinism and batching
// ============================================================================

#[test]
fn test_pack_is_deterministic() {
    let target = to_geo(&rotated_rectangle_m(12.3, 7.1, 17.0));
    let req = PackingRequest::new(target, 1.7, 1.0).with_gap(0.02);
    let config = PackingConfig::default();

    assert_eq!(pack(&req, &config), pack(&req, &config));
}

#[test]
fn test_pack_all_preserves_order() {
    let config = PackingConfig::default();
    let requests = vec![
        PackingRequest::new(to_geo(&square_m(10.02)), 1.0, 1.0),
        PackingRequest::new(to_geo(&square_m(0.5)), 1.0, 1.0),
        PackingRequest::new(to_geo(&rotated_rectangle_m(8.02, 4.02, 30.0)), 1.0, 1.0),
        PackingRequest::new(to_geo(&l_shape_m()), 1.0, 1.0),
    ];

    let batched = pack_all(&requests, &config);
    assert_eq!(batched.len(), requests.len());
    for (req, result) in requests.iter().zip(&batched) {
        assert_eq!(&pack(req, &config), result);
    }
    assert!(batched[1].is_empty());
}

// ============================================================================
// Capacity estimate
// ============================================================================

#[test]
fn test_capacity_estimate_for_square() {
    let target = to_geo(&square_m(10.0));
    let area = polygon_area_m2(&target);
    assert_approx_eq!(area, 100.0, 1e-3);

    // 100 * 0.6 / 1.7
    assert_eq!(estimate_capacity(area, 1.0, 1.7, &PackingConfig::default()), 35);
}
