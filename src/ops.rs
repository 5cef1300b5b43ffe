//! Declarative transform pipelines.
//!
//! An [`Operation`] names one in-place grid transform together with its
//! parameters; a [`Pipeline`] is an ordered list of them. Both serialize
//! cleanly, so a pipeline can live in a config file or a request body and
//! be replayed against any grid.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::color;
use crate::contrast;
use crate::convolve::{self, Kernel};
use crate::dither;
use crate::error::TransformError;
use crate::grid::{CropRect, PixelGrid};
use crate::mosaic;

/// One grid transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operation {
    /// 3x3 Gaussian blur.
    Blur,
    /// 5x5 sharpen.
    Sharpen,
    /// BT.709 grayscale conversion.
    Grayscale,
    /// Sepia toning.
    Sepia,
    /// Floyd-Steinberg binary dither.
    Dither,
    /// Sobel edge magnitude map, optionally blurring first.
    EdgeDetect { pre_blur: bool },
    /// Histogram equalization.
    Equalize,
    /// Mosaic around `seeds` random seed pixels.
    Mosaic { seeds: usize },
    /// Crop to an inclusive rectangle.
    Crop { rect: CropRect },
    /// Quarter turn to the right.
    RotateClockwise,
    /// Quarter turn to the left.
    RotateCounterclockwise,
    /// Mirror left-to-right.
    FlipHorizontal,
    /// Mirror top-to-bottom.
    FlipVertical,
}

impl Operation {
    /// Apply this operation to `grid` in place.
    ///
    /// [`Operation::Mosaic`] draws its seeds from the thread-local RNG;
    /// use [`Operation::apply_with`] for reproducible runs.
    pub fn apply(&self, grid: &mut PixelGrid) -> Result<(), TransformError> {
        self.apply_with(grid, &mut rand::thread_rng())
    }

    /// Apply this operation, drawing any randomness from `rng`.
    pub fn apply_with<R: Rng>(
        &self,
        grid: &mut PixelGrid,
        rng: &mut R,
    ) -> Result<(), TransformError> {
        tracing::debug!(operation = %self, "Applying operation");
        match self {
            Operation::Blur => convolve::filter(grid, &Kernel::gaussian_blur()),
            Operation::Sharpen => convolve::filter(grid, &Kernel::sharpen()),
            Operation::Grayscale => color::transform(grid, &color::GRAYSCALE),
            Operation::Sepia => color::transform(grid, &color::SEPIA),
            Operation::Dither => dither::floyd_steinberg(grid),
            Operation::EdgeDetect { pre_blur } => convolve::edge_detect(grid, *pre_blur),
            Operation::Equalize => contrast::equalize(grid),
            Operation::Mosaic { seeds } => mosaic::render_with(grid, *seeds, rng)?,
            Operation::Crop { rect } => grid.crop(*rect)?,
            Operation::RotateClockwise => grid.rotate_clockwise(),
            Operation::RotateCounterclockwise => grid.rotate_counterclockwise(),
            Operation::FlipHorizontal => grid.flip_horizontal(),
            Operation::FlipVertical => grid.flip_vertical(),
        }
        Ok(())
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Blur => "blur",
            Operation::Sharpen => "sharpen",
            Operation::Grayscale => "grayscale",
            Operation::Sepia => "sepia",
            Operation::Dither => "dither",
            Operation::EdgeDetect { .. } => "edge detect",
            Operation::Equalize => "equalize",
            Operation::Mosaic { .. } => "mosaic",
            Operation::Crop { .. } => "crop",
            Operation::RotateClockwise => "rotate clockwise",
            Operation::RotateCounterclockwise => "rotate counterclockwise",
            Operation::FlipHorizontal => "flip horizontal",
            Operation::FlipVertical => "flip vertical",
        };
        write!(f, "{}", name)
    }
}

/// An ordered list of operations, applied front to back.
///
/// Serializes as a plain array of operations. A failing operation stops
/// the run and leaves the grid as the preceding operations left it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pipeline(Vec<Operation>);

impl Pipeline {
    pub fn new(operations: Vec<Operation>) -> Self {
        Self(operations)
    }

    /// The operations in application order.
    #[inline]
    pub fn operations(&self) -> &[Operation] {
        &self.0
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Append an operation to the end of the pipeline.
    pub fn push(&mut self, operation: Operation) {
        self.0.push(operation);
    }

    /// Run every operation against `grid` in order.
    pub fn run(&self, grid: &mut PixelGrid) -> Result<(), TransformError> {
        self.run_with(grid, &mut rand::thread_rng())
    }

    /// Like [`Pipeline::run`], with an explicit randomness source.
    pub fn run_with<R: Rng>(
        &self,
        grid: &mut PixelGrid,
        rng: &mut R,
    ) -> Result<(), TransformError> {
        tracing::debug!(operations = self.0.len(), "Running pipeline");
        for operation in &self.0 {
            operation.apply_with(grid, rng)?;
        }
        Ok(())
    }
}
