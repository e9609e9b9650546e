//! Per-region statistics over a second band.

use solar_common::{PixelRegion, SolarError, SolarResult};

/// Arithmetic mean of `flux_band` over the region's pixels.
///
/// `flux_band` is a row-major band of a grid `width` pixels wide. An empty
/// region is a caller bug and is reported as [`SolarError::EmptyRegion`];
/// a pixel that falls outside the band is reported as
/// [`SolarError::OutOfBounds`].
pub fn aggregate(region: &PixelRegion, flux_band: &[f64], width: u32) -> SolarResult<f64> {
    if region.is_empty() {
        return Err(SolarError::EmptyRegion);
    }

    let height = if width == 0 {
        0
    } else {
        (flux_band.len() / width as usize) as u32
    };

    let mut sum = 0.0;
    for p in region.pixels() {
        if p.x < 0 || p.y < 0 || p.x as u32 >= width || p.y as u32 >= height {
            return Err(SolarError::OutOfBounds {
                x: p.x as i64,
                y: p.y as i64,
                width,
                height,
            });
        }
        sum += flux_band[p.y as usize * width as usize + p.x as usize];
    }

    Ok(sum / region.len() as f64)
}
