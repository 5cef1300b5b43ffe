use thiserror::Error;

use crate::grid::CropRect;

/// Errors raised while constructing a pixel grid.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("Grid dimensions must be non-zero, got {height}x{width}")]
    ZeroDimension { height: usize, width: usize },

    #[error("Pixel count mismatch: {len} pixels for a {height}x{width} grid")]
    PixelCountMismatch {
        len: usize,
        height: usize,
        width: usize,
    },
}

/// Errors raised by grid transformations.
///
/// Every variant is reported before the operation mutates anything, so a
/// rejected call leaves the grid exactly as it was.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransformError {
    #[error("Seed count {seeds} exceeds pixel count {pixels}")]
    SeedCountExceedsPixels { seeds: usize, pixels: usize },

    #[error("Invalid crop rectangle ({rect}) for a {height}x{width} grid")]
    InvalidCropRect {
        rect: CropRect,
        height: usize,
        width: usize,
    },

    #[error("Kernel size must be odd and non-zero, got {size}")]
    InvalidKernelSize { size: usize },

    #[error("Kernel weight count mismatch: {size}x{size} kernel needs {expected} weights, got {actual}")]
    KernelWeightMismatch {
        size: usize,
        expected: usize,
        actual: usize,
    },
}
