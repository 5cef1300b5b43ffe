//! Seed-clustered mosaic effect.
//!
//! Partitions the grid into Voronoi-style regions around randomly sampled
//! seed pixels and floods each region with its average color. Region
//! membership comes from nearest-seed lookups on a [`KdTree`].

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::TransformError;
use crate::grid::{PixelGrid, Rgb};
use crate::spatial::{KdTree, SeedPoint};

/// Per-seed running totals for the averaging pass.
#[derive(Debug, Clone, Copy, Default)]
struct ClusterAccumulator {
    sum: [u64; 3],
    count: u64,
}

/// Repaint the grid as a mosaic around `seed_count` random seed pixels.
///
/// Seeds come from the thread-local RNG; use [`render_with`] to supply a
/// seeded generator for reproducible output.
pub fn render(grid: &mut PixelGrid, seed_count: usize) -> Result<(), TransformError> {
    render_with(grid, seed_count, &mut rand::thread_rng())
}

/// Like [`render`], with an explicit randomness source.
///
/// Seed positions are a prefix of a full shuffle of the grid coordinates,
/// so they are always distinct. Each pixel joins the cluster of its nearest
/// seed, and each cluster is flooded with the truncated mean of its
/// members' colors. A seed pixel counts toward its cluster's size but not
/// its color sum, so a cluster holding nothing but its own seed comes out
/// black.
///
/// A `seed_count` of zero leaves the grid untouched.
pub fn render_with<R: Rng>(
    grid: &mut PixelGrid,
    seed_count: usize,
    rng: &mut R,
) -> Result<(), TransformError> {
    let (height, width) = grid.dimensions();
    let pixel_count = height * width;
    if seed_count > pixel_count {
        return Err(TransformError::SeedCountExceedsPixels {
            seeds: seed_count,
            pixels: pixel_count,
        });
    }
    tracing::debug!(height, width, seed_count, "Rendering mosaic");
    if seed_count == 0 {
        return Ok(());
    }

    let seeds = sample_seeds(height, width, seed_count, rng);
    let tree = KdTree::build(&seeds);
    let seed_slots: HashMap<SeedPoint, usize> = seeds
        .iter()
        .enumerate()
        .map(|(slot, &seed)| (seed, slot))
        .collect();

    // Pass 1: assign every pixel to its nearest seed and accumulate.
    let mut clusters = vec![ClusterAccumulator::default(); seeds.len()];
    let mut assignments: Vec<Option<usize>> = Vec::with_capacity(pixel_count);
    for row in 0..height {
        for col in 0..width {
            let point = SeedPoint::new(row, col);
            let slot = tree
                .nearest(point)
                .and_then(|seed| seed_slots.get(&seed).copied());
            if let Some(slot) = slot {
                let cluster = &mut clusters[slot];
                cluster.count += 1;
                if point != seeds[slot] {
                    let [r, g, b] = grid.get(row, col).channels();
                    cluster.sum[0] += u64::from(r);
                    cluster.sum[1] += u64::from(g);
                    cluster.sum[2] += u64::from(b);
                }
            }
            assignments.push(slot);
        }
    }

    // Pass 2: average each cluster and flood its members. Sums of in-range
    // channels divided by the member count stay within 0..=255.
    tracing::trace!(clusters = seeds.len(), "Averaging clusters");
    let colors: Vec<Rgb> = clusters
        .iter()
        .map(|cluster| {
            if cluster.count == 0 {
                Rgb::new(0, 0, 0)
            } else {
                Rgb::new(
                    (cluster.sum[0] / cluster.count) as u8,
                    (cluster.sum[1] / cluster.count) as u8,
                    (cluster.sum[2] / cluster.count) as u8,
                )
            }
        })
        .collect();
    for row in 0..height {
        for col in 0..width {
            if let Some(slot) = assignments[row * width + col] {
                grid.set(row, col, colors[slot]);
            }
        }
    }
    Ok(())
}

/// A `seed_count`-long prefix of a Fisher-Yates shuffle of every grid
/// coordinate. Sampling without replacement keeps the seeds distinct.
fn sample_seeds<R: Rng>(
    height: usize,
    width: usize,
    seed_count: usize,
    rng: &mut R,
) -> Vec<SeedPoint> {
    let mut coordinates: Vec<SeedPoint> = (0..height)
        .flat_map(|row| (0..width).map(move |col| SeedPoint::new(row, col)))
        .collect();
    coordinates.shuffle(rng);
    coordinates.truncate(seed_count);
    coordinates
}
