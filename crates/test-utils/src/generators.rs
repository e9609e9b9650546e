//! Synthetic raster bands for roof extraction tests.
//!
//! All bands are `Vec<f64>` in row-major order (row 0 first), matching the
//! layout the engine expects from a decoded GeoTIFF.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// An axis-aligned block of pixels: `(x, y, width, height)`.
pub type Block = (usize, usize, usize, usize);

/// Creates a band that is `background` everywhere except inside `blocks`,
/// where it is `value`.
///
/// Blocks are clipped to the grid.
///
/// # Example
///
/// ```
/// use test_utils::block_band;
///
/// let band = block_band(4, 3, &[(1, 1, 2, 1)], 1.0, 0.0);
/// assert_eq!(band.len(), 12);
/// assert_eq!(band[5], 1.0); // x=1, y=1
/// assert_eq!(band[4], 0.0); // x=0, y=1
/// ```
pub fn block_band(
    width: usize,
    height: usize,
    blocks: &[Block],
    value: f64,
    background: f64,
) -> Vec<f64> {
    let mut data = vec![background; width * height];
    for &(bx, by, bw, bh) in blocks {
        for y in by..(by + bh).min(height) {
            for x in bx..(bx + bw).min(width) {
                data[y * width + x] = value;
            }
        }
    }
    data
}

/// Creates a binary roof mask (1.0 inside blocks, 0.0 elsewhere).
pub fn roof_mask(width: usize, height: usize, blocks: &[Block]) -> Vec<f64> {
    block_band(width, height, blocks, 1.0, 0.0)
}

/// Creates a flux band where each pixel's value is `x * 10 + y`.
///
/// Handy for checking that region averages read the right pixels.
pub fn indexed_flux(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push((x * 10 + y) as f64);
        }
    }
    data
}

/// Creates a flux band with a south-facing gradient, roughly 800 kWh/m²
/// at the top row rising to 1300 kWh/m² at the bottom row.
pub fn gradient_flux(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        let t = y as f64 / height.max(1) as f64;
        for _ in 0..width {
            data.push(800.0 + t * 500.0);
        }
    }
    data
}

/// Creates a seeded random binary mask where each pixel is foreground with
/// probability `density`.
///
/// The same seed always produces the same mask.
pub fn random_mask(width: usize, height: usize, density: f64, seed: u64) -> Vec<f64> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..width * height)
        .map(|_| if rng.gen_bool(density) { 1.0 } else { 0.0 })
        .collect()
}

/// Creates a checkerboard mask; no two foreground pixels are 4-connected.
pub fn checkerboard_mask(width: usize, height: usize) -> Vec<f64> {
    let mut data = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            data.push(if (x + y) % 2 == 0 { 1.0 } else { 0.0 });
        }
    }
    data
}
