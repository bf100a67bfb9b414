//! Jittered nearest-seed partition of the grid.

use rand_chacha::rand_core::Rng;

use crate::types::{DistrictId, Pos};

use super::grid::CellGrid;
use super::model::Seed;
use super::rng::symmetric_offset;

/// Assigns every cell to the seed with the smallest perturbed distance and
/// returns how many cells the true-distance fallback had to fill.
pub(super) fn grow_regions<R: Rng + ?Sized>(
    grid: &mut CellGrid,
    seeds: &[Seed],
    jitter: f64,
    rng: &mut R,
) -> usize {
    for cell in &mut grid.cells {
        let mut best: Option<(f64, DistrictId)> = None;
        for seed in seeds {
            let perturbed = cell.pos.distance(seed.center) + symmetric_offset(rng, jitter);
            // Strict comparison keeps the earlier seed on ties.
            if best.is_none_or(|(best_distance, _)| perturbed < best_distance) {
                best = Some((perturbed, seed.id));
            }
        }
        cell.district = best.map(|(_, id)| id);
    }

    fill_unassigned(grid, seeds)
}

fn fill_unassigned(grid: &mut CellGrid, seeds: &[Seed]) -> usize {
    let mut filled = 0;
    for cell in grid.cells.iter_mut().filter(|cell| cell.district.is_none()) {
        cell.district = nearest_seed(cell.pos, seeds);
        filled += usize::from(cell.district.is_some());
    }
    filled
}

/// Nearest seed by unperturbed distance; earlier seeds win ties.
pub(super) fn nearest_seed(pos: Pos, seeds: &[Seed]) -> Option<DistrictId> {
    let mut best: Option<(f64, DistrictId)> = None;
    for seed in seeds {
        let distance = pos.distance(seed.center);
        if best.is_none_or(|(best_distance, _)| distance < best_distance) {
            best = Some((distance, seed.id));
        }
    }
    best.map(|(_, id)| id)
}
