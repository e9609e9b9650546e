//! Plain polygon primitives shared by the extraction and packing stages.
//!
//! Rings are slices of [`GeoPoint`] with an implicit closing edge from the
//! last vertex back to the first.

use crate::geo::GeoPoint;

/// Even-odd ray-casting containment test.
///
/// A horizontal ray from `point` is tested against every edge; an edge
/// counts when the ray's latitude falls between its endpoints (half-open on
/// one end) and the crossing lies to the east of the point.
///
/// Points exactly on an edge or vertex are classified inconsistently: some
/// boundary points come back inside, others outside, depending on edge
/// orientation and rounding. This is inherent to ray casting and callers
/// must not rely on boundary membership.
pub fn contains(point: GeoPoint, polygon: &[GeoPoint]) -> bool {
    if polygon.len() < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        let (pi, pj) = (polygon[i], polygon[j]);
        if (pi.lat > point.lat) != (pj.lat > point.lat) {
            let cross_lng = (pj.lng - pi.lng) * (point.lat - pi.lat) / (pj.lat - pi.lat) + pi.lng;
            if point.lng < cross_lng {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Vertex mean of a ring. `None` for an empty slice.
pub fn centroid(polygon: &[GeoPoint]) -> Option<GeoPoint> {
    if polygon.is_empty() {
        return None;
    }
    let n = polygon.len() as f64;
    let (lng, lat) = polygon
        .iter()
        .fold((0.0, 0.0), |(lng, lat), p| (lng + p.lng, lat + p.lat));
    Some(GeoPoint::new(lng / n, lat / n))
}

/// Shoelace area in squared coordinate units; positive when the ring runs
/// counter-clockwise in (lng, lat).
pub fn signed_area(polygon: &[GeoPoint]) -> f64 {
    if polygon.len() < 3 {
        return 0.0;
    }
    let mut twice_area = 0.0;
    let mut j = polygon.len() - 1;
    for i in 0..polygon.len() {
        twice_area += polygon[j].lng * polygon[i].lat - polygon[i].lng * polygon[j].lat;
        j = i;
    }
    twice_area / 2.0
}

/// Drop a trailing vertex that repeats the first one, so explicitly
/// closed rings (GeoJSON, Sonnendach) read the same as implicitly closed
/// ones.
pub fn open_ring(polygon: &[GeoPoint]) -> &[GeoPoint] {
    match polygon {
        [first, rest @ .., last] if !rest.is_empty() && first == last => {
            &polygon[..polygon.len() - 1]
        }
        _ => polygon,
    }
}

/// A ring is usable when it has at least three distinct vertices and its
/// first and last points differ.
pub fn is_valid_ring(polygon: &[GeoPoint]) -> bool {
    if polygon.len() < 3 {
        return false;
    }
    if polygon.first() == polygon.last() {
        return false;
    }
    let mut distinct: Vec<GeoPoint> = Vec::with_capacity(3);
    for p in polygon {
        if !distinct.contains(p) {
            distinct.push(*p);
            if distinct.len() >= 3 {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square() -> Vec<GeoPoint> {
        vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 10.0),
            GeoPoint::new(10.0, 10.0),
            GeoPoint::new(10.0, 0.0),
        ]
    }

    #[test]
    fn test_contains_square() {
        let poly = square();
        assert!(contains(GeoPoint::new(5.0, 5.0), &poly));
        assert!(!contains(GeoPoint::new(15.0, 15.0), &poly));
        assert!(!contains(GeoPoint::new(-1.0, 5.0), &poly));
    }

    #[test]
    fn test_contains_concave() {
        // U shape open to the north
        let poly = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(6.0, 0.0),
            GeoPoint::new(6.0, 6.0),
            GeoPoint::new(4.0, 6.0),
            GeoPoint::new(4.0, 2.0),
            GeoPoint::new(2.0, 2.0),
            GeoPoint::new(2.0, 6.0),
            GeoPoint::new(0.0, 6.0),
        ];
        assert!(contains(GeoPoint::new(1.0, 4.0), &poly));
        assert!(contains(GeoPoint::new(5.0, 4.0), &poly));
        assert!(!contains(GeoPoint::new(3.0, 4.0), &poly));
        assert!(contains(GeoPoint::new(3.0, 1.0), &poly));
    }

    #[test]
    fn test_contains_degenerate() {
        let line = vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)];
        assert!(!contains(GeoPoint::new(0.5, 0.5), &line));
    }

    #[test]
    fn test_centroid_and_area() {
        let poly = square();
        let c = centroid(&poly).unwrap();
        assert!((c.lng - 5.0).abs() < 1e-12);
        assert!((c.lat - 5.0).abs() < 1e-12);
        // Clockwise in (lng, lat)
        assert!((signed_area(&poly) + 100.0).abs() < 1e-9);
        assert!(centroid(&[]).is_none());
    }

    #[test]
    fn test_valid_ring() {
        assert!(is_valid_ring(&square()));
        let closed = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 0.0),
        ];
        assert!(!is_valid_ring(&closed));
        let repeated = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 0.0),
        ];
        assert!(!is_valid_ring(&repeated));
    }

    #[test]
    fn test_open_ring() {
        let closed = vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(1.0, 0.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(0.0, 0.0),
        ];
        let open = open_ring(&closed);
        assert_eq!(open.len(), 3);
        assert!(is_valid_ring(open));

        // Already open rings and short slices are left alone
        assert_eq!(open_ring(&square()).len(), 4);
        let pair = [GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 0.0)];
        assert_eq!(open_ring(&pair).len(), 2);
    }
}
