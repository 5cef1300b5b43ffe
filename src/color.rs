//! Linear color-space transforms.
//!
//! A [`ColorMatrix`] maps each pixel independently: every output channel is
//! a weighted mix of the three input channels. The mix is computed in `f64`,
//! truncated toward zero and clamped, which keeps parity with how these
//! matrices have historically been applied (note that truncation, not
//! rounding, is the contract here).

use crate::grid::{clamp_channel, PixelGrid, Rgb};

/// A 3x3 color mixing matrix.
///
/// Row `i` holds the input-channel weights for output channel `i`, so
/// `output[i] = rows[i][0] * r + rows[i][1] * g + rows[i][2] * b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMatrix {
    rows: [[f64; 3]; 3],
}

impl ColorMatrix {
    /// Create a matrix from its weight rows.
    pub const fn new(rows: [[f64; 3]; 3]) -> Self {
        Self { rows }
    }

    /// The weight rows.
    #[inline]
    pub fn rows(&self) -> &[[f64; 3]; 3] {
        &self.rows
    }

    /// Mix one pixel through the matrix.
    ///
    /// Each output channel is truncated toward zero and clamped to 0..=255.
    ///
    /// # Example
    ///
    /// ```
    /// use rasterfx::color::GRAYSCALE;
    /// use rasterfx::Rgb;
    ///
    /// let gray = GRAYSCALE.mix(Rgb::new(50, 100, 200));
    /// assert_eq!(gray, Rgb::new(96, 96, 96));
    /// ```
    pub fn mix(&self, pixel: Rgb) -> Rgb {
        let input = pixel.channels();
        let mut output = [0u8; 3];
        for (channel, weights) in output.iter_mut().zip(&self.rows) {
            let mut sum = 0.0f64;
            for (weight, value) in weights.iter().zip(input) {
                sum += weight * f64::from(value);
            }
            *channel = clamp_channel(sum as i32);
        }
        Rgb::from_channels(output)
    }
}

/// BT.709 luma weights on every row, so all three output channels carry the
/// perceptual intensity of the input.
///
/// ```text
///   0.2126  0.7152  0.0722
///   0.2126  0.7152  0.0722
///   0.2126  0.7152  0.0722
/// ```
pub const GRAYSCALE: ColorMatrix = ColorMatrix::new([
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
    [0.2126, 0.7152, 0.0722],
]);

/// Classic sepia toning matrix.
pub const SEPIA: ColorMatrix = ColorMatrix::new([
    [0.393, 0.769, 0.189],
    [0.349, 0.686, 0.168],
    [0.272, 0.534, 0.131],
]);

/// Mix every pixel of the grid through `matrix`.
///
/// Pointwise: no pixel's result depends on any other pixel.
pub fn transform(grid: &mut PixelGrid, matrix: &ColorMatrix) {
    let (height, width) = grid.dimensions();
    tracing::debug!(height, width, "Applying color matrix");
    for row in 0..height {
        for col in 0..width {
            let mixed = matrix.mix(grid.get(row, col));
            grid.set(row, col, mixed);
        }
    }
}
