//! End-to-end extraction: raster in, roof outlines with flux out.

use std::fmt;

use projection::pixels_to_geo;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use solar_common::{PixelCoord, PixelRegion, RasterGrid, RoofRegion, SolarError, SolarResult};
use tracing::{debug, info, instrument, warn};

use crate::aggregate::aggregate;
use crate::config::ExtractionConfig;
use crate::labeler::label;
use crate::simplify::simplify;
use crate::tracer::trace;

/// Why a labeled region did not produce a [`RoofRegion`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// Fewer than three outline points survived tracing and simplification,
    /// or the points enclose no area.
    DegenerateOutline { points: usize },
    /// The flux statistic could not be computed.
    Aggregation { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::DegenerateOutline { points } => {
                write!(f, "outline has {} points after simplification", points)
            }
            SkipReason::Aggregation { message } => write!(f, "aggregation failed: {}", message),
        }
    }
}

/// Diagnostic for a region that was dropped without failing the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkippedRegion {
    /// Position of the region in labeling order.
    pub region_index: usize,
    pub pixel_count: usize,
    pub reason: SkipReason,
}

/// Result of one extraction run.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExtractionOutput {
    pub regions: Vec<RoofRegion>,
    #[serde(default)]
    pub skipped: Vec<SkippedRegion>,
}

/// Extract roof regions from `grid`.
///
/// Fails only when the configuration is invalid or names a band the grid
/// does not have. Problems with an individual region are isolated: that
/// region goes to `skipped` and the rest are still returned. Output order
/// follows labeling order whether or not `config.parallel` is set.
#[instrument(skip_all, fields(width = grid.width(), height = grid.height()))]
pub fn extract_roof_regions(
    grid: &RasterGrid,
    config: &ExtractionConfig,
) -> SolarResult<ExtractionOutput> {
    config.validate().map_err(SolarError::config)?;
    for (param, band) in [("mask_band", config.mask_band), ("flux_band", config.flux_band)] {
        if band >= grid.band_count() {
            return Err(SolarError::invalid_parameter(
                param,
                format!("band {} requested but raster has {}", band, grid.band_count()),
            ));
        }
    }

    let labeled = label(grid, config.mask_band, config.threshold, config.min_region_size);
    let flux = grid.band(config.flux_band);

    let outcomes: Vec<Result<RoofRegion, SkipReason>> = if config.parallel {
        labeled
            .par_iter()
            .map(|region| vectorize(region, grid, flux, config))
            .collect()
    } else {
        labeled
            .iter()
            .map(|region| vectorize(region, grid, flux, config))
            .collect()
    };

    let mut output = ExtractionOutput::default();
    for (index, (outcome, region)) in outcomes.into_iter().zip(&labeled).enumerate() {
        match outcome {
            Ok(roof) => output.regions.push(roof),
            Err(reason) => {
                warn!(region_index = index, pixels = region.len(), %reason, "Skipping region");
                output.skipped.push(SkippedRegion {
                    region_index: index,
                    pixel_count: region.len(),
                    reason,
                });
            }
        }
    }

    info!(
        labeled = labeled.len(),
        regions = output.regions.len(),
        skipped = output.skipped.len(),
        "Extraction complete"
    );

    Ok(output)
}

/// Outline and flux for a single region.
fn vectorize(
    region: &PixelRegion,
    grid: &RasterGrid,
    flux: &[f64],
    config: &ExtractionConfig,
) -> Result<RoofRegion, SkipReason> {
    let boundary = trace(region);
    let simplified = simplify(&boundary, config.simplify_tolerance_px);
    debug!(
        pixels = region.len(),
        boundary = boundary.len(),
        simplified = simplified.len(),
        "Vectorized region"
    );

    if simplified.len() < 3 || twice_area(&simplified) == 0 {
        return Err(SkipReason::DegenerateOutline {
            points: simplified.len(),
        });
    }

    let average_flux = aggregate(region, flux, grid.width()).map_err(|e| SkipReason::Aggregation {
        message: e.to_string(),
    })?;

    Ok(RoofRegion {
        outline: pixels_to_geo(&simplified, grid),
        average_flux,
        pixel_count: region.len(),
    })
}

/// Exact doubled shoelace area of a pixel ring.
fn twice_area(ring: &[PixelCoord]) -> i64 {
    let mut sum = 0i64;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        sum += ring[j].x as i64 * ring[i].y as i64 - ring[i].x as i64 * ring[j].y as i64;
        j = i;
    }
    sum
}
