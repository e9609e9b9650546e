//! Connected-component labeling of a thresholded raster band.

use std::collections::VecDeque;

use solar_common::{PixelCoord, PixelRegion, RasterGrid};
use tracing::debug;

/// Find 4-connected regions of pixels with `sample >= threshold`.
///
/// Each foreground pixel is enqueued exactly once across the whole call, so
/// the work is linear in the pixel count whatever the region shapes.
/// Regions smaller than `min_region_size` are dropped; their pixels stay
/// marked and are never revisited. NaN samples are background.
///
/// Regions come out in raster-scan order of their first pixel. That order
/// is stable for a given input but carries no meaning.
///
/// # Panics
/// If `band` is not a band of `grid`.
pub fn label(
    grid: &RasterGrid,
    band: usize,
    threshold: f64,
    min_region_size: usize,
) -> Vec<PixelRegion> {
    let samples = grid.band(band);
    let width = grid.width() as usize;
    let height = grid.height() as usize;

    let is_foreground = |idx: usize| samples[idx] >= threshold;

    let mut visited = vec![false; samples.len()];
    let mut queue = VecDeque::new();
    let mut regions = Vec::new();
    let mut discarded = 0usize;

    for start in 0..samples.len() {
        if visited[start] || !is_foreground(start) {
            continue;
        }

        visited[start] = true;
        queue.push_back(start);
        let mut pixels = Vec::new();

        while let Some(idx) = queue.pop_front() {
            let (x, y) = (idx % width, idx / width);
            pixels.push(PixelCoord::new(x as i32, y as i32));

            let neighbors = [
                (y > 0).then(|| idx - width),
                (y + 1 < height).then(|| idx + width),
                (x > 0).then(|| idx - 1),
                (x + 1 < width).then(|| idx + 1),
            ];
            for n in neighbors.into_iter().flatten() {
                if !visited[n] && is_foreground(n) {
                    visited[n] = true;
                    queue.push_back(n);
                }
            }
        }

        if pixels.len() >= min_region_size {
            regions.push(PixelRegion::new(pixels));
        } else {
            discarded += 1;
        }
    }

    debug!(
        width,
        height,
        threshold,
        regions = regions.len(),
        discarded,
        "Labeled raster band"
    );

    regions
}
