//! Histogram equalization.
//!
//! Converts the grid to grayscale, then remaps intensities so the
//! cumulative distribution of the result is as flat as the input allows.
//! Sparse histograms stretch across the full range; the brightest occupied
//! bucket always maps to pure white.

use crate::color::{self, GRAYSCALE};
use crate::grid::{PixelGrid, Rgb};

/// Number of intensity buckets.
const BUCKETS: usize = 256;

/// Equalize the grid's contrast in place.
///
/// The grid is grayscaled first, so the histogram is built over a single
/// intensity per pixel. Each intensity `i` then remaps to
/// `cumulative(i) * 255 / pixel_count`, rounded down. The output is
/// grayscale by construction.
pub fn equalize(grid: &mut PixelGrid) {
    let (height, width) = grid.dimensions();
    tracing::debug!(height, width, "Equalizing contrast");

    color::transform(grid, &GRAYSCALE);

    let mut histogram = [0u64; BUCKETS];
    for pixel in grid.pixels() {
        histogram[usize::from(pixel.r)] += 1;
    }

    let total = (height * width) as u64;
    let mut remap = [0u8; BUCKETS];
    let mut cumulative = 0u64;
    for (bucket, &count) in histogram.iter().enumerate() {
        cumulative += count;
        remap[bucket] = (cumulative * 255 / total) as u8;
    }

    for row in 0..height {
        for col in 0..width {
            let level = remap[usize::from(grid.get(row, col).r)];
            grid.set(row, col, Rgb::new(level, level, level));
        }
    }
}
