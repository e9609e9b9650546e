//! Raster-to-polygon roof extraction.
//!
//! Turns a decoded roof mask (plus a solar flux band on the same grid) into
//! simplified geographic outlines with an average flux per roof surface.
//!
//! # Architecture
//!
//! ```text
//! RasterGrid
//!      │
//!      ▼
//! labeler::label            4-connected flood fill, noise filter
//!      │
//!      ├─► tracer::trace         Moore-neighbour outer boundary
//!      │        │
//!      │        ▼
//!      │   simplify::simplify    Douglas-Peucker in pixel units
//!      │        │
//!      │        ▼
//!      │   projection::pixels_to_geo
//!      │
//!      └─► aggregate::aggregate  mean flux over the region
//!               │
//!               ▼
//!        Vec<RoofRegion> + skipped-region diagnostics
//! ```
//!
//! # Example
//!
//! ```ignore
//! use roof_extraction::{extract_roof_regions, ExtractionConfig};
//!
//! let output = extract_roof_regions(&grid, &ExtractionConfig::default())?;
//! for roof in &output.regions {
//!     println!("{} px, {:.0} kWh/m²", roof.pixel_count, roof.average_flux);
//! }
//! ```

pub mod aggregate;
pub mod config;
pub mod labeler;
pub mod pipeline;
pub mod simplify;
pub mod tracer;

// Re-export commonly used items at crate root
pub use aggregate::aggregate;
pub use config::ExtractionConfig;
pub use labeler::label;
pub use pipeline::{extract_roof_regions, ExtractionOutput, SkipReason, SkippedRegion};
pub use simplify::simplify;
pub use tracer::{trace, trace_boundary, BoundaryTrace};
