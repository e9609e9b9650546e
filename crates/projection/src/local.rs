//! Local tangent plane in metres.
//!
//! An equirectangular approximation anchored at one point: longitude
//! differences are scaled by `cos(anchor latitude)`. Distortion stays well
//! below a centimetre over a single building, which is the only scale this
//! frame is used at.

use solar_common::GeoPoint;

/// Metres per degree of latitude (and of longitude at the equator).
pub const METERS_PER_DEGREE: f64 = 111_320.0;

/// Equirectangular metric frame around an anchor point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalFrame {
    origin: GeoPoint,
    m_per_deg_lng: f64,
    m_per_deg_lat: f64,
}

impl LocalFrame {
    /// Create a frame whose `(0, 0)` is `origin`.
    pub fn new(origin: GeoPoint) -> Self {
        Self {
            origin,
            m_per_deg_lng: METERS_PER_DEGREE * origin.lat.to_radians().cos(),
            m_per_deg_lat: METERS_PER_DEGREE,
        }
    }

    pub fn origin(&self) -> GeoPoint {
        self.origin
    }

    /// Project to `(x_east_m, y_north_m)`.
    pub fn to_local(&self, point: GeoPoint) -> (f64, f64) {
        (
            (point.lng - self.origin.lng) * self.m_per_deg_lng,
            (point.lat - self.origin.lat) * self.m_per_deg_lat,
        )
    }

    /// Inverse of [`LocalFrame::to_local`].
    pub fn to_geo(&self, x_m: f64, y_m: f64) -> GeoPoint {
        GeoPoint {
            lng: self.origin.lng + x_m / self.m_per_deg_lng,
            lat: self.origin.lat + y_m / self.m_per_deg_lat,
        }
    }
}
