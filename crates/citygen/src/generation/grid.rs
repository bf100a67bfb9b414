//! Working cell buffer shared by the pipeline stages, plus neighborhood helpers.

use crate::types::{DistrictId, Pos};

use super::model::Cell;

/// Orthogonal neighbors: left, right, up, down.
pub(super) const ORTHOGONAL: [(i32, i32); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// Moore neighborhood. Orthogonal directions come first; majority ties resolve
/// in this order.
pub(super) const MOORE: [(i32, i32); 8] =
    [(-1, 0), (1, 0), (0, -1), (0, 1), (-1, -1), (1, -1), (-1, 1), (1, 1)];

pub(super) struct CellGrid {
    pub(super) width: usize,
    pub(super) height: usize,
    pub(super) cells: Vec<Cell>,
}

impl CellGrid {
    pub(super) fn in_bounds(&self, pos: Pos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    pub(super) fn index(&self, pos: Pos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    pub(super) fn cell(&self, pos: Pos) -> &Cell {
        &self.cells[self.index(pos)]
    }

    pub(super) fn cell_mut(&mut self, pos: Pos) -> &mut Cell {
        let index = self.index(pos);
        &mut self.cells[index]
    }

    pub(super) fn district(&self, pos: Pos) -> Option<DistrictId> {
        self.cell(pos).district
    }

    pub(super) fn mark_street(&mut self, pos: Pos) {
        if self.in_bounds(pos) {
            self.cell_mut(pos).is_street = true;
        }
    }

    /// Positions that have a full Moore neighborhood, row-major.
    pub(super) fn interior(&self) -> impl Iterator<Item = Pos> + use<> {
        let (width, height) = (self.width, self.height);
        (1..height.saturating_sub(1)).flat_map(move |y| {
            (1..width.saturating_sub(1)).map(move |x| Pos::new(x as i32, y as i32))
        })
    }

    pub(super) fn district_snapshot(&self) -> Vec<Option<DistrictId>> {
        self.cells.iter().map(|cell| cell.district).collect()
    }

    pub(super) fn into_cells(self) -> Vec<Cell> {
        self.cells
    }
}

pub(super) fn neighbors<'a>(
    pos: Pos,
    offsets: &'a [(i32, i32)],
) -> impl Iterator<Item = Pos> + 'a {
    offsets.iter().map(move |&(dx, dy)| pos.offset(dx, dy))
}
