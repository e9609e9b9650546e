//! Douglas-Peucker polyline simplification in pixel space.

use solar_common::PixelCoord;

/// Simplify a polyline to within `tolerance_px`.
///
/// The output is always a subsequence of the input that keeps the first and
/// last points. Inputs shorter than three points are returned unchanged.
/// Distances are measured to the chord as a segment (projection clamped to
/// the endpoints), so a zero-length chord falls back to plain point
/// distance.
pub fn simplify(points: &[PixelCoord], tolerance_px: f64) -> Vec<PixelCoord> {
    if points.len() < 3 {
        return points.to_vec();
    }

    let mut keep = vec![false; points.len()];
    keep[0] = true;
    keep[points.len() - 1] = true;
    mark_kept(points, 0, points.len() - 1, tolerance_px, &mut keep);

    points
        .iter()
        .zip(keep)
        .filter_map(|(p, kept)| kept.then_some(*p))
        .collect()
}

/// Recursive step over `points[first..=last]`.
fn mark_kept(points: &[PixelCoord], first: usize, last: usize, tolerance: f64, keep: &mut [bool]) {
    if last <= first + 1 {
        return;
    }

    let (a, b) = (points[first], points[last]);
    let mut max_dist = 0.0;
    let mut max_idx = first;
    for (i, &p) in points.iter().enumerate().take(last).skip(first + 1) {
        let dist = segment_distance(p, a, b);
        if dist > max_dist {
            max_dist = dist;
            max_idx = i;
        }
    }

    if max_dist > tolerance {
        keep[max_idx] = true;
        mark_kept(points, first, max_idx, tolerance, keep);
        mark_kept(points, max_idx, last, tolerance, keep);
    }
}

/// Distance from `p` to the segment `a`-`b`.
fn segment_distance(p: PixelCoord, a: PixelCoord, b: PixelCoord) -> f64 {
    let (px, py) = (p.x as f64, p.y as f64);
    let (ax, ay) = (a.x as f64, a.y as f64);
    let (bx, by) = (b.x as f64, b.y as f64);

    let (dx, dy) = (bx - ax, by - ay);
    let len_sq = dx * dx + dy * dy;
    if len_sq == 0.0 {
        return ((px - ax).powi(2) + (py - ay).powi(2)).sqrt();
    }

    let t = (((px - ax) * dx + (py - ay) * dy) / len_sq).clamp(0.0, 1.0);
    let (cx, cy) = (ax + t * dx, ay + t * dy);
    ((px - cx).powi(2) + (py - cy).powi(2)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(i32, i32)]) -> Vec<PixelCoord> {
        coords.iter().map(|&(x, y)| PixelCoord::new(x, y)).collect()
    }

    #[test]
    fn test_short_input_unchanged() {
        let line = pts(&[(0, 0), (5, 5)]);
        assert_eq!(simplify(&line, 10.0), line);
        assert!(simplify(&[], 1.0).is_empty());
    }

    #[test]
    fn test_collinear_collapses() {
        let line = pts(&[(0, 0), (1, 0), (2, 0), (3, 0), (4, 0)]);
        assert_eq!(simplify(&line, 0.5), pts(&[(0, 0), (4, 0)]));
    }

    #[test]
    fn test_corner_kept() {
        let line = pts(&[(0, 0), (2, 0), (4, 0), (4, 2), (4, 4)]);
        assert_eq!(simplify(&line, 0.5), pts(&[(0, 0), (4, 0), (4, 4)]));
    }

    #[test]
    fn test_zero_length_chord() {
        // First and last coincide: distance falls back to the point distance
        let line = pts(&[(0, 0), (3, 0), (3, 3), (0, 0)]);
        let out = simplify(&line, 1.0);
        assert_eq!(out.first(), Some(&PixelCoord::new(0, 0)));
        assert_eq!(out.last(), Some(&PixelCoord::new(0, 0)));
        assert!(out.contains(&PixelCoord::new(3, 3)));
    }

    #[test]
    fn test_segment_distance_clamped() {
        // Beyond endpoint b, distance is to b, not to the infinite line
        let d = segment_distance(PixelCoord::new(6, 0), PixelCoord::new(0, 0), PixelCoord::new(4, 0));
        assert!((d - 2.0).abs() < 1e-12);
    }
}
