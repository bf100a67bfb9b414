//! Cellular-automata relaxation of district boundaries.

use crate::types::{DistrictId, Pos};

use super::grid::{CellGrid, MOORE, neighbors};

/// Cells differing from at least this many of their 8 neighbors count as minority cells.
const MINORITY_DIFFERING_NEIGHBORS: usize = 6;

/// Runs `iterations` simultaneous-update passes and returns the total number
/// of reassignments.
pub(super) fn smooth_boundaries(grid: &mut CellGrid, iterations: u32, threshold: usize) -> usize {
    let mut reassigned = 0;
    for _ in 0..iterations {
        let snapshot = grid.district_snapshot();
        let mut next = snapshot.clone();

        for pos in grid.interior() {
            if grid.cell(pos).is_street {
                continue;
            }
            let index = grid.index(pos);
            let Some(current) = snapshot[index] else {
                continue;
            };
            let around = neighbor_districts(grid, &snapshot, pos);
            let same = around.iter().filter(|&&district| district == Some(current)).count();
            if same >= threshold {
                continue;
            }
            if let Some(majority) = majority_district(&around)
                && majority != current
            {
                next[index] = Some(majority);
                reassigned += 1;
            }
        }

        for (cell, district) in grid.cells.iter_mut().zip(next) {
            cell.district = district;
        }
    }
    reassigned
}

/// Interior cells that share their district with at most two of their 8 neighbors.
pub(super) fn minority_cell_count(grid: &CellGrid) -> usize {
    let snapshot = grid.district_snapshot();
    grid.interior()
        .filter(|&pos| {
            let current = snapshot[grid.index(pos)];
            let differing = neighbor_districts(grid, &snapshot, pos)
                .iter()
                .filter(|&&district| district != current)
                .count();
            differing >= MINORITY_DIFFERING_NEIGHBORS
        })
        .count()
}

fn neighbor_districts(
    grid: &CellGrid,
    snapshot: &[Option<DistrictId>],
    pos: Pos,
) -> [Option<DistrictId>; 8] {
    let mut around = [None; 8];
    for (slot, neighbor) in around.iter_mut().zip(neighbors(pos, &MOORE)) {
        *slot = snapshot[grid.index(neighbor)];
    }
    around
}

/// Most frequent district; among equal counts the one seen first wins.
fn majority_district(around: &[Option<DistrictId>]) -> Option<DistrictId> {
    let mut tallies: Vec<(DistrictId, usize)> = Vec::with_capacity(around.len());
    for district in around.iter().flatten() {
        match tallies.iter_mut().find(|(id, _)| id == district) {
            Some((_, count)) => *count += 1,
            None => tallies.push((*district, 1)),
        }
    }

    let mut best: Option<(DistrictId, usize)> = None;
    for (id, count) in tallies {
        if best.is_none_or(|(_, best_count)| count > best_count) {
            best = Some((id, count));
        }
    }
    best.map(|(id, _)| id)
}
