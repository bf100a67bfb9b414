//! Consistency checks between pipeline stages. A failure here means a stage is
//! broken, never that the caller passed bad input.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::InvariantViolation;
use crate::types::DistrictId;

use super::grid::CellGrid;
use super::model::{DistrictInfo, Seed};

/// Every cell owns a district that belongs to a seed.
pub(super) fn check_assignment(grid: &CellGrid, seeds: &[Seed]) -> Result<(), InvariantViolation> {
    for cell in &grid.cells {
        let Some(district) = cell.district else {
            return Err(InvariantViolation::UnassignedCell { pos: cell.pos });
        };
        if district.index() >= seeds.len() {
            return Err(InvariantViolation::UnknownDistrict { pos: cell.pos, district });
        }
    }
    Ok(())
}

/// Seeds and surviving districts agree, membership covers the grid, and
/// adjacency is symmetric.
///
/// A seed that owns no cell at all can only occur when the grid is too small to
/// give every archetype territory; such seeds are not required to survive.
pub(super) fn check_districts(
    grid: &CellGrid,
    seeds: &[Seed],
    districts: &BTreeMap<DistrictId, DistrictInfo>,
) -> Result<(), InvariantViolation> {
    let owners: BTreeSet<DistrictId> = grid.cells.iter().filter_map(|cell| cell.district).collect();
    for seed in seeds {
        if owners.contains(&seed.id) && !districts.contains_key(&seed.id) {
            return Err(InvariantViolation::SeedWithoutDistrict {
                seed: seed.id,
                archetype: seed.archetype.clone(),
            });
        }
    }

    let members: usize = districts.values().map(|district| district.cells.len()).sum();
    let streets = grid.cells.iter().filter(|cell| cell.is_street).count();
    let expected = grid.width * grid.height;
    if members + streets != expected {
        return Err(InvariantViolation::CoverageMismatch { expected, actual: members + streets });
    }

    for district in districts.values() {
        for &neighbor in &district.neighbors {
            let mirrored = districts
                .get(&neighbor)
                .is_some_and(|other| other.neighbors.binary_search(&district.id).is_ok());
            if !mirrored {
                return Err(InvariantViolation::AsymmetricAdjacency {
                    from: district.id,
                    to: neighbor,
                });
            }
        }
    }

    Ok(())
}
