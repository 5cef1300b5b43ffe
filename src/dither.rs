//! Binary error-diffusion dithering.
//!
//! Quantizes every pixel to black or white by thresholding the red channel,
//! then pushes the signed quantization error onto not-yet-visited neighbors
//! so local average intensity survives the binarization. The scan order is
//! strict row-major, left to right then top to bottom; the kernel offsets
//! assume it (all diffusion targets lie to the right or below).

use crate::grid::{clamp_channel, PixelGrid, Rgb};

/// An error diffusion kernel.
///
/// Each entry names a neighbor offset and the share of the quantization
/// error it receives, as a numerator over `divisor`. Offsets reaching
/// outside the grid are skipped, so their share of the error is dropped.
#[derive(Debug, Clone, Copy)]
pub struct DiffusionKernel {
    /// (d_row, d_col, weight) entries.
    ///
    /// - `d_row`: rows below the current pixel (never negative)
    /// - `d_col`: columns right of the current pixel (negative = left)
    /// - `weight`: numerator of the error share, over `divisor`
    pub entries: &'static [(i64, i64, i32)],

    /// Total divisor for normalizing weights.
    pub divisor: i32,
}

/// Floyd-Steinberg diffusion kernel.
///
/// Pushes 100% of the error (16/16) onto four forward neighbors:
///
/// ```text
///        X   7
///    3   5   1
/// ```
pub const FLOYD_STEINBERG: DiffusionKernel = DiffusionKernel {
    entries: &[
        (0, 1, 7),  // right
        (1, -1, 3), // below-left
        (1, 0, 5),  // below
        (1, 1, 1),  // below-right
    ],
    divisor: 16,
};

/// Red-channel values at or above this quantize to white.
const WHITE_THRESHOLD: u8 = 127;

/// Dither the grid to pure black and white with [`FLOYD_STEINBERG`].
pub fn floyd_steinberg(grid: &mut PixelGrid) {
    apply(grid, &FLOYD_STEINBERG);
}

/// Dither the grid to pure black and white with the given kernel.
///
/// Classification reads the red channel (after a grayscale pass all three
/// channels agree, and binarization overwrites them all anyway). The error
/// share added to a neighbor applies to all of its channels and is clamped
/// immediately, so the grid never holds an out-of-range value.
pub fn apply(grid: &mut PixelGrid, kernel: &DiffusionKernel) {
    let (height, width) = grid.dimensions();
    tracing::debug!(height, width, "Dithering to binary");

    for row in 0..height {
        for col in 0..width {
            let old = grid.get(row, col).r;
            let new = if old >= WHITE_THRESHOLD { 255 } else { 0 };
            grid.set(row, col, Rgb::new(new, new, new));

            let error = i32::from(old) - i32::from(new);
            if error == 0 {
                continue;
            }
            for &(d_row, d_col, weight) in kernel.entries {
                let neighbor_row = row as i64 + d_row;
                let neighbor_col = col as i64 + d_col;
                let outside = neighbor_row < 0
                    || neighbor_row >= height as i64
                    || neighbor_col < 0
                    || neighbor_col >= width as i64;
                if outside {
                    continue;
                }

                // Integer division truncates toward zero, exactly like the
                // dyadic fractions 7/16, 3/16, 5/16, 1/16 applied in f64.
                let share = (weight * error) / kernel.divisor;
                let (neighbor_row, neighbor_col) = (neighbor_row as usize, neighbor_col as usize);
                let [r, g, b] = grid.get(neighbor_row, neighbor_col).channels();
                grid.set(
                    neighbor_row,
                    neighbor_col,
                    Rgb::new(
                        clamp_channel(i32::from(r) + share),
                        clamp_channel(i32::from(g) + share),
                        clamp_channel(i32::from(b) + share),
                    ),
                );
            }
        }
    }
}
