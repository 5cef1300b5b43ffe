//! Convolution kernel definitions.
//!
//! This module defines the weight matrices for the built-in neighborhood
//! filters and validated construction for caller-supplied kernels. A kernel
//! is always square with an odd size, so it has a center tap to anchor on
//! the pixel being computed.

use crate::error::TransformError;

/// 3x3 Gaussian-style blur.
///
/// ```text
///   1/16  1/8  1/16
///   1/8   1/4  1/8
///   1/16  1/8  1/16
/// ```
///
/// Weights sum to 1, so uniform regions pass through unchanged.
const GAUSSIAN_BLUR_3X3: [[f64; 3]; 3] = [
    [0.0625, 0.125, 0.0625],
    [0.125, 0.25, 0.125],
    [0.0625, 0.125, 0.0625],
];

/// 5x5 sharpen.
///
/// A negative outer ring, positive inner ring and a full-weight center:
///
/// ```text
///   -1/8  -1/8  -1/8  -1/8  -1/8
///   -1/8   1/4   1/4   1/4  -1/8
///   -1/8   1/4   1     1/4  -1/8
///   -1/8   1/4   1/4   1/4  -1/8
///   -1/8  -1/8  -1/8  -1/8  -1/8
/// ```
///
/// Weights sum to 1 (16 x -1/8 + 8 x 1/4 + 1), boosting local contrast
/// without shifting overall brightness.
const SHARPEN_5X5: [[f64; 5]; 5] = [
    [-0.125, -0.125, -0.125, -0.125, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, 0.25, 1.0, 0.25, -0.125],
    [-0.125, 0.25, 0.25, 0.25, -0.125],
    [-0.125, -0.125, -0.125, -0.125, -0.125],
];

/// Sobel operator, horizontal gradient (responds to vertical edges).
///
/// ```text
///    1   0  -1
///    2   0  -2
///    1   0  -1
/// ```
const SOBEL_X_3X3: [[f64; 3]; 3] = [[1.0, 0.0, -1.0], [2.0, 0.0, -2.0], [1.0, 0.0, -1.0]];

/// Sobel operator, vertical gradient (responds to horizontal edges).
///
/// ```text
///    1   2   1
///    0   0   0
///   -1  -2  -1
/// ```
const SOBEL_Y_3X3: [[f64; 3]; 3] = [[1.0, 2.0, 1.0], [0.0, 0.0, 0.0], [-1.0, -2.0, -1.0]];

/// A square convolution kernel with real-valued weights.
///
/// Immutable once constructed. Weights are stored row-major; the size must
/// be odd and non-zero so the kernel centers on a pixel.
///
/// # Example
///
/// ```
/// use rasterfx::Kernel;
///
/// // A 3x3 box blur.
/// let kernel = Kernel::new(3, vec![1.0 / 9.0; 9]).unwrap();
/// assert_eq!(kernel.size(), 3);
/// assert_eq!(kernel.radius(), 1);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Kernel {
    size: usize,
    /// `size * size` weights, row-major.
    weights: Box<[f64]>,
}

impl Kernel {
    /// Create a kernel from row-major weights.
    ///
    /// `size` must be odd and non-zero, and `weights.len()` must equal
    /// `size * size`.
    pub fn new(size: usize, weights: Vec<f64>) -> Result<Self, TransformError> {
        if size == 0 || size % 2 == 0 {
            return Err(TransformError::InvalidKernelSize { size });
        }
        if weights.len() != size * size {
            return Err(TransformError::KernelWeightMismatch {
                size,
                expected: size * size,
                actual: weights.len(),
            });
        }
        Ok(Self {
            size,
            weights: weights.into_boxed_slice(),
        })
    }

    /// The 3x3 Gaussian-style blur kernel.
    pub fn gaussian_blur() -> Self {
        Self::from_table(GAUSSIAN_BLUR_3X3)
    }

    /// The 5x5 sharpen kernel.
    pub fn sharpen() -> Self {
        Self::from_table(SHARPEN_5X5)
    }

    /// The Sobel horizontal-gradient kernel.
    pub fn sobel_x() -> Self {
        Self::from_table(SOBEL_X_3X3)
    }

    /// The Sobel vertical-gradient kernel.
    pub fn sobel_y() -> Self {
        Self::from_table(SOBEL_Y_3X3)
    }

    /// Build from a const table; the odd-size invariant holds for all
    /// built-in tables.
    fn from_table<const N: usize>(rows: [[f64; N]; N]) -> Self {
        debug_assert!(N % 2 == 1, "built-in kernel tables must have odd size");
        let weights: Vec<f64> = rows.iter().flat_map(|row| row.iter().copied()).collect();
        Self {
            size: N,
            weights: weights.into_boxed_slice(),
        }
    }

    /// Kernel side length.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of taps reaching out from the center, `size / 2`.
    #[inline]
    pub fn radius(&self) -> usize {
        self.size / 2
    }

    /// The weight at (row, col) within the kernel.
    #[inline]
    pub fn weight(&self, row: usize, col: usize) -> f64 {
        debug_assert!(
            row < self.size && col < self.size,
            "kernel tap ({}, {}) outside {}x{} kernel",
            row,
            col,
            self.size,
            self.size,
        );
        self.weights[row * self.size + col]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn weight_sum(kernel: &Kernel) -> f64 {
        let mut sum = 0.0;
        for row in 0..kernel.size() {
            for col in 0..kernel.size() {
                sum += kernel.weight(row, col);
            }
        }
        sum
    }

    #[test]
    fn test_gaussian_blur_weights_sum_to_one() {
        let kernel = Kernel::gaussian_blur();
        assert_eq!(kernel.size(), 3, "blur kernel should be 3x3");
        assert!(
            (weight_sum(&kernel) - 1.0).abs() < 1e-12,
            "blur weights should sum to 1 so brightness is preserved"
        );
    }

    #[test]
    fn test_sharpen_weights_sum_to_one() {
        let kernel = Kernel::sharpen();
        assert_eq!(kernel.size(), 5, "sharpen kernel should be 5x5");
        assert!(
            (weight_sum(&kernel) - 1.0).abs() < 1e-12,
            "sharpen weights should sum to 1 so brightness is preserved"
        );
        assert_eq!(kernel.weight(2, 2), 1.0, "center tap carries full weight");
        assert_eq!(kernel.weight(0, 0), -0.125, "outer ring is negative");
        assert_eq!(kernel.weight(1, 1), 0.25, "inner ring is positive");
    }

    #[test]
    fn test_sobel_weights_sum_to_zero() {
        for kernel in [Kernel::sobel_x(), Kernel::sobel_y()] {
            assert_eq!(kernel.size(), 3);
            assert!(
                weight_sum(&kernel).abs() < 1e-12,
                "gradient kernels should have zero net weight"
            );
        }
    }

    #[test]
    fn test_sobel_kernels_are_transposes() {
        let x = Kernel::sobel_x();
        let y = Kernel::sobel_y();
        for row in 0..3 {
            for col in 0..3 {
                assert_eq!(
                    x.weight(row, col),
                    y.weight(col, row),
                    "Sobel X and Y should be transposes of each other"
                );
            }
        }
    }

    #[test]
    fn test_new_rejects_even_size() {
        let error = Kernel::new(4, vec![0.0; 16]).unwrap_err();
        assert_eq!(error, TransformError::InvalidKernelSize { size: 4 });
    }

    #[test]
    fn test_new_rejects_zero_size() {
        let error = Kernel::new(0, vec![]).unwrap_err();
        assert_eq!(error, TransformError::InvalidKernelSize { size: 0 });
    }

    #[test]
    fn test_new_rejects_weight_count_mismatch() {
        let error = Kernel::new(3, vec![0.0; 6]).unwrap_err();
        assert_eq!(
            error,
            TransformError::KernelWeightMismatch {
                size: 3,
                expected: 9,
                actual: 6,
            }
        );
    }

    #[test]
    fn test_weight_accessor_is_row_major() {
        let kernel = Kernel::new(3, (0..9).map(f64::from).collect()).unwrap();
        assert_eq!(kernel.weight(0, 0), 0.0);
        assert_eq!(kernel.weight(0, 2), 2.0);
        assert_eq!(kernel.weight(1, 0), 3.0);
        assert_eq!(kernel.weight(2, 2), 8.0);
    }

    #[test]
    fn test_radius() {
        assert_eq!(Kernel::gaussian_blur().radius(), 1);
        assert_eq!(Kernel::sharpen().radius(), 2);
    }
}
