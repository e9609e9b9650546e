//! Solar panel layout on roof polygons.
//!
//! Given a roof outline in WGS84 and a panel size in metres, lays out a
//! rotated grid of panel footprints aligned with the roof's longest edge,
//! keeping only panels that sit fully inside the outline and clear of every
//! exclusion zone.
//!
//! The packer does not care where the outline came from: the extraction
//! pipeline and a hand-drawn polygon are treated the same.

pub mod capacity;
pub mod config;
pub mod packer;
pub mod request;

pub use capacity::{estimate_capacity, polygon_area_m2};
pub use config::PackingConfig;
pub use packer::{pack, pack_all, principal_angle, try_pack, MAX_GRID_CELLS};
pub use request::{PackingRequest, PackingResult};
