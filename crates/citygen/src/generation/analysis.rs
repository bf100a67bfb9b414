//! Derives per-district membership, bounds, and adjacency from the final grid.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::InvariantViolation;
use crate::types::DistrictId;

use super::grid::{CellGrid, MOORE, neighbors};
use super::model::{Bounds, DistrictInfo, Seed};

pub(super) fn analyze_districts(
    grid: &CellGrid,
    seeds: &[Seed],
) -> Result<BTreeMap<DistrictId, DistrictInfo>, InvariantViolation> {
    let mut districts: BTreeMap<DistrictId, DistrictInfo> = BTreeMap::new();
    let mut touching: BTreeMap<DistrictId, BTreeSet<DistrictId>> = BTreeMap::new();

    for cell in grid.cells.iter().filter(|cell| !cell.is_street) {
        let Some(id) = cell.district else {
            return Err(InvariantViolation::UnassignedCell { pos: cell.pos });
        };
        let Some(seed) = seeds.get(id.index()) else {
            return Err(InvariantViolation::UnknownDistrict { pos: cell.pos, district: id });
        };

        let district = districts.entry(id).or_insert_with(|| DistrictInfo {
            id,
            archetype: seed.archetype.clone(),
            cells: Vec::new(),
            bounds: Bounds::point(cell.pos),
            center: seed.center,
            neighbors: Vec::new(),
            color: seed.color,
        });
        district.cells.push(cell.pos);
        district.bounds.include(cell.pos);

        let adjacent = touching.entry(id).or_default();
        for neighbor in neighbors(cell.pos, &MOORE).filter(|&pos| grid.in_bounds(pos)) {
            if let Some(other) = grid.district(neighbor)
                && other != id
            {
                adjacent.insert(other);
            }
        }
    }

    // A member cell may touch a district only through that district's street
    // cells; mirror every edge so the graph stays undirected.
    let edges: Vec<(DistrictId, DistrictId)> = touching
        .iter()
        .flat_map(|(&from, targets)| targets.iter().map(move |&to| (from, to)))
        .collect();
    for (from, to) in edges {
        touching.entry(to).or_default().insert(from);
    }

    let surviving: BTreeSet<DistrictId> = districts.keys().copied().collect();
    for (id, district) in &mut districts {
        if let Some(adjacent) = touching.get(id) {
            district.neighbors = adjacent.intersection(&surviving).copied().collect();
        }
    }

    Ok(districts)
}
