//! JSON job handling for the `extract` and `pack` subcommands.

use anyhow::{Context, Result};
use panel_layout::{estimate_capacity, pack_all, polygon_area_m2, PackingRequest};
use roof_extraction::{extract_roof_regions, ExtractionOutput};
use serde::{Deserialize, Serialize};
use solar_common::{PanelFootprint, RasterGrid};
use tracing::info;

use crate::config::AnalyzerConfig;

/// Input of the `pack` subcommand: independent roofs to lay out.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PackingJob {
    pub requests: Vec<PackingRequest>,
}

/// Layout for one roof, with the area-based estimate alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackedRoof {
    pub area_m2: f64,
    pub estimated_capacity: usize,
    pub panel_count: usize,
    pub panels: Vec<PanelFootprint>,
}

/// Output of the `pack` subcommand, one entry per request in job order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackingReport {
    pub roofs: Vec<PackedRoof>,
}

/// Parse a raster from JSON and extract its roof regions.
pub fn run_extract(raster_json: &str, config: &AnalyzerConfig) -> Result<ExtractionOutput> {
    let grid: RasterGrid =
        serde_json::from_str(raster_json).context("Failed to parse raster JSON")?;
    info!(
        width = grid.width(),
        height = grid.height(),
        bands = grid.band_count(),
        "Loaded raster"
    );

    let output =
        extract_roof_regions(&grid, &config.extraction).context("Roof extraction failed")?;
    Ok(output)
}

/// Parse a packing job from JSON and lay out every roof in it.
pub fn run_pack(job_json: &str, config: &AnalyzerConfig) -> Result<PackingReport> {
    let job: PackingJob =
        serde_json::from_str(job_json).context("Failed to parse packing job JSON")?;
    info!(requests = job.requests.len(), "Loaded packing job");

    let results = pack_all(&job.requests, &config.packing);

    let roofs = job
        .requests
        .iter()
        .zip(results)
        .map(|(req, panels)| {
            let area_m2 = polygon_area_m2(&req.target_polygon);
            PackedRoof {
                area_m2,
                estimated_capacity: estimate_capacity(
                    area_m2,
                    req.panel_width_m,
                    req.panel_height_m,
                    &config.packing,
                ),
                panel_count: panels.len(),
                panels,
            }
        })
        .collect();

    Ok(PackingReport { roofs })
}
