//! Coordinate system translations.
//!
//! Everything here is stateless and total: functions never fail, and the
//! caller is responsible for feeding inputs inside each transform's
//! validity domain.
//!
//! - [`pixel`]: raster pixel indices to WGS84 via a tile's bounding box
//! - [`lv95`]: Swiss LV95 (EPSG:2056) to and from WGS84, polynomial approximation
//! - [`local`]: building-scale tangent plane in metres around an anchor point

pub mod local;
pub mod lv95;
pub mod pixel;

pub use local::LocalFrame;
pub use lv95::{lv95_ring_to_wgs84, lv95_to_wgs84, wgs84_to_lv95};
pub use pixel::pixels_to_geo;
