//! Neighborhood convolution over the pixel grid.
//!
//! [`filter`] runs the shared convolution pass used by blur and sharpen;
//! [`edge_detect`] layers the two-pass Sobel magnitude computation on top
//! of it. Both read the complete pre-filter grid before writing anything
//! back, so no output pixel ever sees a partially filtered neighbor.
//!
//! Kernel taps falling outside the grid contribute zero, which darkens
//! borders slightly under weight-sum-1 kernels instead of inventing
//! out-of-range reads.

pub mod kernel;

pub use kernel::Kernel;

use crate::color::{self, GRAYSCALE};
use crate::grid::{clamp_channel, PixelGrid, Rgb};

/// Gradient magnitude that maps to full intensity after normalization.
///
/// 1024 * sqrt(2), measured for 8-bit input under the Sobel pair. Observed
/// magnitudes top out just below it, so normalized output peaks at 253.
const SOBEL_MAGNITUDE_CEILING: f64 = 1448.154;

/// Convolve every channel of every pixel with `kernel`.
///
/// Each output channel is `round(sum(weight * input))` clamped to 0..=255,
/// accumulated in `f64` and rounded exactly once so a weight-sum-1 kernel
/// is the identity on uniform regions.
pub fn filter(grid: &mut PixelGrid, kernel: &Kernel) {
    let (height, width) = grid.dimensions();
    tracing::debug!(height, width, size = kernel.size(), "Applying convolution");

    let mut output = Vec::with_capacity(height * width);
    for row in 0..height {
        for col in 0..width {
            let sums = convolve_channels(grid, kernel, row, col);
            output.push(Rgb::new(
                clamp_channel(sums[0].round() as i32),
                clamp_channel(sums[1].round() as i32),
                clamp_channel(sums[2].round() as i32),
            ));
        }
    }
    grid.replace_pixels(output);
}

/// Replace the grid with its Sobel edge magnitude map.
///
/// The pass pipeline: optional Gaussian pre-blur to suppress noise, then
/// grayscale conversion, then per interior pixel the horizontal and
/// vertical gradients whose magnitude `sqrt(gx^2 + gy^2)` fills a separate
/// map (border pixels are pinned to zero gradient). Once the whole map
/// exists, every magnitude is rescaled against
/// [`SOBEL_MAGNITUDE_CEILING`] and written back as a gray pixel.
pub fn edge_detect(grid: &mut PixelGrid, pre_blur: bool) {
    let (height, width) = grid.dimensions();
    tracing::debug!(height, width, pre_blur, "Applying edge detection");

    if pre_blur {
        filter(grid, &Kernel::gaussian_blur());
    }
    color::transform(grid, &GRAYSCALE);

    let sobel_x = Kernel::sobel_x();
    let sobel_y = Kernel::sobel_y();

    // Pass 1: gradient magnitudes. Interior only; borders stay zero.
    let mut magnitudes = vec![0.0f64; height * width];
    for row in 1..height - 1 {
        for col in 1..width - 1 {
            let gx = convolve_channels(grid, &sobel_x, row, col)[0];
            let gy = convolve_channels(grid, &sobel_y, row, col)[0];
            magnitudes[row * width + col] = (gx * gx + gy * gy).sqrt();
        }
    }

    // Pass 2: rescale into 0..=255 and write back as grayscale.
    let mut output = Vec::with_capacity(height * width);
    for &magnitude in &magnitudes {
        let scaled = (magnitude.trunc() * 255.0 / SOBEL_MAGNITUDE_CEILING) as i32;
        let value = clamp_channel(scaled);
        output.push(Rgb::new(value, value, value));
    }
    grid.replace_pixels(output);
}

/// Weighted per-channel sums of the kernel neighborhood around (row, col).
///
/// Taps outside the grid are skipped, contributing zero.
fn convolve_channels(grid: &PixelGrid, kernel: &Kernel, row: usize, col: usize) -> [f64; 3] {
    let (height, width) = grid.dimensions();
    let radius = kernel.radius() as i64;

    let mut sums = [0.0f64; 3];
    for tap_row in 0..kernel.size() {
        for tap_col in 0..kernel.size() {
            let sample_row = row as i64 + tap_row as i64 - radius;
            let sample_col = col as i64 + tap_col as i64 - radius;
            let outside = sample_row < 0
                || sample_row >= height as i64
                || sample_col < 0
                || sample_col >= width as i64;
            if outside {
                continue;
            }

            let weight = kernel.weight(tap_row, tap_col);
            let channels = grid.get(sample_row as usize, sample_col as usize).channels();
            for (sum, value) in sums.iter_mut().zip(channels) {
                *sum += weight * f64::from(value);
            }
        }
    }
    sums
}
