//! Street carving: widened main roads between nearby seeds, then sparse
//! arterial cells along district borders.

use std::collections::BTreeSet;

use rand_chacha::rand_core::Rng;

use crate::types::{DistrictId, Pos, StreetKind};

use super::grid::{CellGrid, ORTHOGONAL, neighbors};
use super::model::{Seed, StreetSegment};
use super::rng::chance;

/// Bresenham rasterization from `start` to `end`, both endpoints included.
pub fn rasterize_line(start: Pos, end: Pos) -> Vec<Pos> {
    let mut cells = Vec::new();
    let dx = (end.x - start.x).abs();
    let dy = -(end.y - start.y).abs();
    let sx = if start.x < end.x { 1 } else { -1 };
    let sy = if start.y < end.y { 1 } else { -1 };
    let mut err = dx + dy;
    let mut current = start;

    loop {
        cells.push(current);
        if current == end {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            current.x += sx;
        }
        if e2 <= dx {
            err += dx;
            current.y += sy;
        }
    }
    cells
}

/// The `links` nearest other seeds by true distance, earlier seeds first on ties.
fn nearest_others(seed: &Seed, seeds: &[Seed], links: usize) -> Vec<DistrictId> {
    let mut others: Vec<(f64, DistrictId)> = seeds
        .iter()
        .filter(|other| other.id != seed.id)
        .map(|other| (seed.center.distance(other.center), other.id))
        .collect();
    others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
    others.into_iter().take(links).map(|(_, id)| id).collect()
}

/// Carves main streets and returns one segment per connected seed pair.
pub(super) fn carve_main_streets(
    grid: &mut CellGrid,
    seeds: &[Seed],
    links: usize,
) -> Vec<StreetSegment> {
    let mut connected = BTreeSet::new();
    let mut segments = Vec::new();

    for seed in seeds {
        for other_id in nearest_others(seed, seeds, links) {
            let pair = (seed.id.min(other_id), seed.id.max(other_id));
            if !connected.insert(pair) {
                continue;
            }
            let other = &seeds[other_id.index()];
            if other.center == seed.center {
                continue;
            }

            for pos in rasterize_line(seed.center, other.center) {
                grid.mark_street(pos);
                for neighbor in neighbors(pos, &ORTHOGONAL) {
                    grid.mark_street(neighbor);
                }
            }
            segments.push(StreetSegment {
                start: seed.center,
                end: other.center,
                kind: StreetKind::Main,
            });
        }
    }

    segments
}

/// Marks border cells as street with probability `street_chance`. Cells that
/// are already street draw nothing. Returns the number of newly marked cells.
pub(super) fn carve_boundary_streets<R: Rng + ?Sized>(
    grid: &mut CellGrid,
    street_chance: f64,
    rng: &mut R,
) -> usize {
    let mut marked = 0;
    for pos in grid.interior() {
        if grid.cell(pos).is_street || !is_border(grid, pos) {
            continue;
        }
        if chance(rng, street_chance) {
            grid.cell_mut(pos).is_street = true;
            marked += 1;
        }
    }
    marked
}

fn is_border(grid: &CellGrid, pos: Pos) -> bool {
    let district = grid.district(pos);
    neighbors(pos, &ORTHOGONAL).any(|neighbor| grid.district(neighbor) != district)
}
