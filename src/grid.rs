//! Pixel grid storage and geometry operations.
//!
//! [`PixelGrid`] owns the three-channel buffer every filter operates on:
//! a row-major `Vec<Rgb>` plus (height, width). Channel values are stored
//! as `u8`, so the 0..=255 range holds by construction; filters that work
//! in wider arithmetic clamp through [`clamp_channel`] before storing.
//!
//! Geometry operations (crop, quarter-turn rotations, flips) live here
//! because they change the buffer shape rather than its colors.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GridError, TransformError};

/// Clamp a wide intermediate channel value into the storable 0..=255 range.
#[inline]
pub(crate) fn clamp_channel(value: i32) -> u8 {
    value.clamp(0, 255) as u8
}

/// One pixel: three 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb {
    /// Red channel (0..=255)
    pub r: u8,
    /// Green channel (0..=255)
    pub g: u8,
    /// Blue channel (0..=255)
    pub b: u8,
}

impl Rgb {
    /// Create a pixel from individual channel values.
    #[inline]
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Create a pixel from a `[R, G, B]` array.
    #[inline]
    pub fn from_channels(channels: [u8; 3]) -> Self {
        Self::new(channels[0], channels[1], channels[2])
    }

    /// The channels as a `[R, G, B]` array, for per-channel loops.
    #[inline]
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }
}

/// A crop region with inclusive corners.
///
/// Both corners are part of the kept region, so a crop to
/// `CropRect::new(1, 1, 2, 2)` keeps a 2x2 area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CropRect {
    /// First kept row.
    pub top: usize,
    /// First kept column.
    pub left: usize,
    /// Last kept row (inclusive).
    pub bottom: usize,
    /// Last kept column (inclusive).
    pub right: usize,
}

impl CropRect {
    /// Create a rectangle from its inclusive corner coordinates.
    #[inline]
    pub fn new(top: usize, left: usize, bottom: usize, right: usize) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }
}

impl fmt::Display for CropRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "rows {}..={}, cols {}..={}",
            self.top, self.bottom, self.left, self.right
        )
    }
}

/// A dense, rectangular grid of [`Rgb`] pixels.
///
/// Pixels are stored row-major and addressed by (row, column). The grid is
/// rectangular by construction: [`PixelGrid::new`] rejects buffers whose
/// length does not match the requested dimensions, and every later
/// operation preserves the `pixels.len() == height * width` invariant.
///
/// # Example
///
/// ```
/// use rasterfx::{PixelGrid, Rgb};
///
/// let mut grid = PixelGrid::filled(2, 3, Rgb::new(10, 20, 30)).unwrap();
/// grid.set(1, 2, Rgb::new(200, 0, 0));
///
/// assert_eq!(grid.dimensions(), (2, 3));
/// assert_eq!(grid.get(1, 2), Rgb::new(200, 0, 0));
/// assert_eq!(grid.get(0, 0), Rgb::new(10, 20, 30));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelGrid {
    /// Pixels in row-major order, `height * width` entries.
    pixels: Vec<Rgb>,
    height: usize,
    width: usize,
}

impl PixelGrid {
    /// Create a grid from row-major pixels.
    ///
    /// Dimensions must be non-zero and `pixels.len()` must equal
    /// `height * width`.
    pub fn new(pixels: Vec<Rgb>, height: usize, width: usize) -> Result<Self, GridError> {
        if height == 0 || width == 0 {
            return Err(GridError::ZeroDimension { height, width });
        }
        if pixels.len() != height * width {
            return Err(GridError::PixelCountMismatch {
                len: pixels.len(),
                height,
                width,
            });
        }
        Ok(Self {
            pixels,
            height,
            width,
        })
    }

    /// Create a grid filled with a single color.
    pub fn filled(height: usize, width: usize, color: Rgb) -> Result<Self, GridError> {
        Self::new(vec![color; height * width], height, width)
    }

    /// Grid height in rows.
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Grid width in columns.
    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid dimensions as (height, width).
    #[inline]
    pub fn dimensions(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// The pixel buffer in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Read the pixel at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if `row >= height` or `col >= width`, like slice indexing.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> Rgb {
        self.pixels[self.index(row, col)]
    }

    /// Write the pixel at (row, col).
    ///
    /// # Panics
    ///
    /// Panics if `row >= height` or `col >= width`, like slice indexing.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, color: Rgb) {
        let index = self.index(row, col);
        self.pixels[index] = color;
    }

    // A row-in-range, column-out-of-range pair can still produce a flat
    // index inside the buffer, so the slice bounds check alone would read
    // the wrong pixel. The documented panic has to be enforced here.
    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.height && col < self.width,
            "pixel ({}, {}) outside {}x{} grid",
            row,
            col,
            self.height,
            self.width,
        );
        row * self.width + col
    }

    /// Take a deep copy to restore from later.
    ///
    /// Pair with [`restore`](Self::restore) to implement a revert-to-original
    /// baseline across any sequence of transformations.
    pub fn snapshot(&self) -> PixelGrid {
        self.clone()
    }

    /// Replace this grid wholesale with a previously taken snapshot.
    ///
    /// Valid across dimension-changing operations: the snapshot's dimensions
    /// win.
    pub fn restore(&mut self, snapshot: &PixelGrid) {
        *self = snapshot.clone();
    }

    /// Swap in a new same-shape pixel buffer.
    ///
    /// For filters that compute a full output copy before writing back.
    #[inline]
    pub(crate) fn replace_pixels(&mut self, pixels: Vec<Rgb>) {
        debug_assert_eq!(
            pixels.len(),
            self.height * self.width,
            "replacement buffer must keep the {}x{} shape",
            self.height,
            self.width,
        );
        self.pixels = pixels;
    }

    /// Crop the grid to an inclusive rectangle.
    ///
    /// Rejects inverted rectangles and rectangles reaching outside the grid
    /// before touching any pixel.
    pub fn crop(&mut self, rect: CropRect) -> Result<(), TransformError> {
        let valid = rect.top <= rect.bottom
            && rect.left <= rect.right
            && rect.bottom < self.height
            && rect.right < self.width;
        if !valid {
            return Err(TransformError::InvalidCropRect {
                rect,
                height: self.height,
                width: self.width,
            });
        }

        let new_height = rect.bottom - rect.top + 1;
        let new_width = rect.right - rect.left + 1;
        let mut pixels = Vec::with_capacity(new_height * new_width);
        for row in rect.top..=rect.bottom {
            for col in rect.left..=rect.right {
                pixels.push(self.get(row, col));
            }
        }

        self.pixels = pixels;
        self.height = new_height;
        self.width = new_width;
        Ok(())
    }

    /// Rotate the grid a quarter turn clockwise, swapping dimensions.
    pub fn rotate_clockwise(&mut self) {
        let (height, width) = (self.height, self.width);
        let mut pixels = Vec::with_capacity(height * width);
        for row in 0..width {
            for col in 0..height {
                pixels.push(self.get(height - 1 - col, row));
            }
        }
        self.pixels = pixels;
        self.height = width;
        self.width = height;
    }

    /// Rotate the grid a quarter turn counterclockwise, swapping dimensions.
    pub fn rotate_counterclockwise(&mut self) {
        let (height, width) = (self.height, self.width);
        let mut pixels = Vec::with_capacity(height * width);
        for row in 0..width {
            for col in 0..height {
                pixels.push(self.get(col, width - 1 - row));
            }
        }
        self.pixels = pixels;
        self.height = width;
        self.width = height;
    }

    /// Mirror the grid left-right.
    pub fn flip_horizontal(&mut self) {
        for row in 0..self.height {
            self.pixels[row * self.width..(row + 1) * self.width].reverse();
        }
    }

    /// Mirror the grid top-bottom.
    pub fn flip_vertical(&mut self) {
        for row in 0..self.height / 2 {
            let opposite = self.height - 1 - row;
            for col in 0..self.width {
                self.pixels
                    .swap(row * self.width + col, opposite * self.width + col);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Helper: 2x3 grid with one distinct color per pixel.
    ///
    /// ```text
    ///   a b c
    ///   d e f
    /// ```
    fn lettered_grid() -> PixelGrid {
        let pixels = vec![
            Rgb::new(1, 0, 0), // a
            Rgb::new(2, 0, 0), // b
            Rgb::new(3, 0, 0), // c
            Rgb::new(4, 0, 0), // d
            Rgb::new(5, 0, 0), // e
            Rgb::new(6, 0, 0), // f
        ];
        PixelGrid::new(pixels, 2, 3).unwrap()
    }

    fn reds(grid: &PixelGrid) -> Vec<u8> {
        grid.pixels().iter().map(|pixel| pixel.r).collect()
    }

    #[test]
    fn test_new_rejects_zero_dimensions() {
        let error = PixelGrid::new(vec![], 0, 4).unwrap_err();
        assert_eq!(
            error,
            GridError::ZeroDimension {
                height: 0,
                width: 4
            }
        );

        let error = PixelGrid::filled(3, 0, Rgb::new(0, 0, 0)).unwrap_err();
        assert_eq!(
            error,
            GridError::ZeroDimension {
                height: 3,
                width: 0
            }
        );
    }

    #[test]
    fn test_new_rejects_pixel_count_mismatch() {
        let error = PixelGrid::new(vec![Rgb::new(0, 0, 0); 5], 2, 3).unwrap_err();
        assert_eq!(
            error,
            GridError::PixelCountMismatch {
                len: 5,
                height: 2,
                width: 3
            }
        );
    }

    #[test]
    fn test_get_set_roundtrip() {
        let mut grid = PixelGrid::filled(3, 3, Rgb::new(0, 0, 0)).unwrap();
        grid.set(2, 1, Rgb::new(9, 8, 7));
        assert_eq!(grid.get(2, 1), Rgb::new(9, 8, 7));
        assert_eq!(grid.get(1, 2), Rgb::new(0, 0, 0), "other pixels untouched");
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn test_get_panics_on_out_of_range_column() {
        // (0, 2) flattens to index 2, which is still inside the 4-pixel
        // buffer; without the coordinate check this would read (1, 0).
        let grid = PixelGrid::filled(2, 2, Rgb::new(30, 30, 30)).unwrap();
        let _ = grid.get(0, 2);
    }

    #[test]
    #[should_panic(expected = "outside 2x2 grid")]
    fn test_set_panics_on_out_of_range_column() {
        let mut grid = PixelGrid::filled(2, 2, Rgb::new(30, 30, 30)).unwrap();
        grid.set(0, 2, Rgb::new(255, 0, 0));
    }

    #[test]
    fn test_crop_keeps_inclusive_corners() {
        let mut grid = lettered_grid();
        grid.crop(CropRect::new(0, 1, 1, 2)).unwrap();

        assert_eq!(grid.dimensions(), (2, 2));
        assert_eq!(reds(&grid), vec![2, 3, 5, 6], "b c / e f");
    }

    #[test]
    fn test_crop_single_pixel() {
        let mut grid = lettered_grid();
        grid.crop(CropRect::new(1, 1, 1, 1)).unwrap();

        assert_eq!(grid.dimensions(), (1, 1));
        assert_eq!(reds(&grid), vec![5], "just e");
    }

    #[test]
    fn test_crop_rejects_inverted_rect() {
        let mut grid = lettered_grid();
        let before = grid.clone();

        let error = grid.crop(CropRect::new(1, 0, 0, 2)).unwrap_err();
        assert!(matches!(error, TransformError::InvalidCropRect { .. }));
        assert_eq!(grid, before, "rejected crop must not mutate the grid");
    }

    #[test]
    fn test_crop_rejects_out_of_bounds_rect() {
        let mut grid = lettered_grid();
        let error = grid.crop(CropRect::new(0, 0, 2, 2)).unwrap_err();
        assert!(matches!(
            error,
            TransformError::InvalidCropRect {
                height: 2,
                width: 3,
                ..
            }
        ));
    }

    #[test]
    fn test_rotate_clockwise() {
        let mut grid = lettered_grid();
        grid.rotate_clockwise();

        // a b c      d a
        // d e f  ->  e b
        //            f c
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(reds(&grid), vec![4, 1, 5, 2, 6, 3]);
    }

    #[test]
    fn test_rotate_counterclockwise() {
        let mut grid = lettered_grid();
        grid.rotate_counterclockwise();

        // a b c      c f
        // d e f  ->  b e
        //            a d
        assert_eq!(grid.dimensions(), (3, 2));
        assert_eq!(reds(&grid), vec![3, 6, 2, 5, 1, 4]);
    }

    #[test]
    fn test_rotate_clockwise_four_times_is_identity() {
        let mut grid = lettered_grid();
        let original = grid.clone();
        for _ in 0..4 {
            grid.rotate_clockwise();
        }
        assert_eq!(grid, original);
    }

    #[test]
    fn test_opposite_rotations_cancel() {
        let mut grid = lettered_grid();
        let original = grid.clone();
        grid.rotate_clockwise();
        grid.rotate_counterclockwise();
        assert_eq!(grid, original);
    }

    #[test]
    fn test_flip_horizontal() {
        let mut grid = lettered_grid();
        grid.flip_horizontal();

        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(reds(&grid), vec![3, 2, 1, 6, 5, 4], "c b a / f e d");
    }

    #[test]
    fn test_flip_vertical() {
        let mut grid = lettered_grid();
        grid.flip_vertical();

        assert_eq!(grid.dimensions(), (2, 3));
        assert_eq!(reds(&grid), vec![4, 5, 6, 1, 2, 3], "d e f / a b c");
    }

    #[test]
    fn test_flip_twice_is_identity() {
        let mut grid = lettered_grid();
        let original = grid.clone();
        grid.flip_horizontal();
        grid.flip_horizontal();
        assert_eq!(grid, original);

        grid.flip_vertical();
        grid.flip_vertical();
        assert_eq!(grid, original);
    }

    #[test]
    fn test_snapshot_restore_across_dimension_change() {
        let mut grid = lettered_grid();
        let baseline = grid.snapshot();

        grid.crop(CropRect::new(0, 0, 0, 0)).unwrap();
        grid.rotate_clockwise();
        assert_eq!(grid.dimensions(), (1, 1));

        grid.restore(&baseline);
        assert_eq!(grid, baseline);
        assert_eq!(grid.dimensions(), (2, 3));
    }

    #[test]
    fn test_clamp_channel_bounds() {
        assert_eq!(clamp_channel(-40), 0);
        assert_eq!(clamp_channel(0), 0);
        assert_eq!(clamp_channel(128), 128);
        assert_eq!(clamp_channel(255), 255);
        assert_eq!(clamp_channel(301), 255);
    }

    #[test]
    fn test_crop_rect_display() {
        let rect = CropRect::new(1, 2, 3, 4);
        assert_eq!(rect.to_string(), "rows 1..=3, cols 2..=4");
    }
}
