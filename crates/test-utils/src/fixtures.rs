//! Reference coordinates and shapes shared across the test suite.

/// Swiss reference points as `(easting, northing, lng, lat)`.
pub mod swiss {
    /// LV95 origin (old observatory of Bern). The approximation is within
    /// about 0.01 degrees of the published WGS84 position.
    pub const BERN: (f64, f64, f64, f64) = (2_600_000.0, 1_200_000.0, 7.4474, 46.9480);

    /// Worked example from the swisstopo approximate formulas:
    /// 46°2'38.87" N, 8°43'49.79" E.
    pub const SWISSTOPO_EXAMPLE: (f64, f64, f64, f64) =
        (2_700_000.0, 1_100_000.0, 8.730497, 46.044131);

    /// Bounding box (north, south, east, west) of a small tile over Bern.
    pub const BERN_TILE: (f64, f64, f64, f64) = (46.9490, 46.9470, 7.4490, 7.4460);
}

/// Axis-aligned square of side `side_m` centered on the origin, in local
/// metres as `(x_east, y_north)`, counter-clockwise.
pub fn square_m(side_m: f64) -> Vec<(f64, f64)> {
    rectangle_m(side_m, side_m)
}

/// Axis-aligned rectangle centered on the origin, in local metres.
pub fn rectangle_m(width_m: f64, height_m: f64) -> Vec<(f64, f64)> {
    let (hw, hh) = (width_m / 2.0, height_m / 2.0);
    vec![(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
}

/// Rectangle rotated by `angle_deg` counter-clockwise about the origin.
pub fn rotated_rectangle_m(width_m: f64, height_m: f64, angle_deg: f64) -> Vec<(f64, f64)> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    rectangle_m(width_m, height_m)
        .into_iter()
        .map(|(x, y)| (x * cos - y * sin, x * sin + y * cos))
        .collect()
}

/// L-shaped roof outline in local metres: a 12 x 4 bar with a 4 x 8 wing.
pub fn l_shape_m() -> Vec<(f64, f64)> {
    vec![
        (-6.0, -6.0),
        (6.0, -6.0),
        (6.0, -2.0),
        (-2.0, -2.0),
        (-2.0, 6.0),
        (-6.0, 6.0),
    ]
}
