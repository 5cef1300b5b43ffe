//! rasterfx: In-place filters, dithering and mosaic effects for RGB rasters
//!
//! This library operates on an in-memory three-channel [`PixelGrid`] and
//! rewrites it in place: convolution filters (blur, sharpen, Sobel edge
//! magnitude), linear color transforms (grayscale, sepia), Floyd-Steinberg
//! binary dithering, histogram equalization, a seed-clustered mosaic
//! effect backed by a k-d tree, and the usual geometry passes (crop,
//! rotate, flip).
//!
//! # Quick Start
//!
//! Describe the transforms as a [`Pipeline`] and run it against a grid:
//!
//! ```
//! use rasterfx::{Operation, Pipeline, PixelGrid, Rgb};
//!
//! let mut grid = PixelGrid::filled(2, 2, Rgb::new(90, 140, 20)).unwrap();
//!
//! let pipeline = Pipeline::new(vec![Operation::Grayscale, Operation::Dither]);
//! pipeline.run(&mut grid).unwrap();
//!
//! assert_eq!(grid.dimensions(), (2, 2));
//! for &pixel in grid.pixels() {
//!     assert!(pixel == Rgb::new(0, 0, 0) || pixel == Rgb::new(255, 255, 255));
//! }
//! ```
//!
//! # Direct Transform API
//!
//! Every transform is also a plain function over the grid, for callers
//! that do not need the pipeline layer:
//!
//! ```
//! use rasterfx::convolve::{self, Kernel};
//! use rasterfx::{PixelGrid, Rgb};
//!
//! let mut grid = PixelGrid::filled(4, 4, Rgb::new(100, 100, 100)).unwrap();
//! convolve::filter(&mut grid, &Kernel::gaussian_blur());
//!
//! // A weight-sum-1 kernel leaves a uniform interior alone.
//! assert_eq!(grid.get(1, 1), Rgb::new(100, 100, 100));
//! ```
//!
//! # Transform Overview
//!
//! ```text
//! PixelGrid                  (owned by the caller)
//!     |
//!     v
//! Pipeline::run / Operation::apply      (in place, front to back)
//!     |
//!     +-- convolve::filter         blur, sharpen
//!     +-- convolve::edge_detect    Sobel magnitude map
//!     +-- color::transform         grayscale, sepia
//!     +-- dither::floyd_steinberg  binary error diffusion
//!     +-- contrast::equalize       histogram equalization
//!     +-- mosaic::render           nearest-seed clustering via KdTree
//!     +-- PixelGrid geometry       crop, rotate, flip
//! ```
//!
//! # Numeric Conventions
//!
//! The integer results are pinned down precisely, because downstream
//! consumers compare outputs byte for byte:
//!
//! - Convolution accumulates in `f64`, rounds half away from zero exactly
//!   once per channel, then clamps to `0..=255`.
//! - Color matrices ([`color::GRAYSCALE`], [`color::SEPIA`]) truncate
//!   toward zero instead of rounding.
//! - Dithering distributes error in integer arithmetic; each neighbor's
//!   share is `weight * error / 16`, truncated, applied to all three
//!   channels and clamped immediately.
//! - Edge magnitudes are truncated, normalized against a fixed ceiling of
//!   `1448.154` and truncated again; border pixels are always zero.
//! - Mosaic cluster averages divide channel sums by the member count,
//!   truncating.
//!
//! # Randomness
//!
//! Only the mosaic effect is randomized (seed placement). [`Operation`]
//! and [`Pipeline`] expose `*_with` variants taking any [`rand::Rng`], so
//! a seeded generator reproduces a run exactly; the plain variants fall
//! back to the thread-local RNG.

pub mod color;
pub mod contrast;
pub mod convolve;
pub mod dither;
pub mod error;
pub mod grid;
pub mod mosaic;
pub mod ops;
pub mod spatial;


pub use color::ColorMatrix;
pub use convolve::Kernel;
pub use dither::DiffusionKernel;
pub use error::{GridError, TransformError};
pub use grid::{CropRect, PixelGrid, Rgb};
pub use ops::{Operation, Pipeline};
pub use spatial::{KdTree, SeedPoint};
