//! Public data model for generated cities: cells, seeds, streets, and districts.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::types::{DistrictId, Pos, Rgb, StreetKind};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub pos: Pos,
    pub district: Option<DistrictId>,
    pub is_street: bool,
    /// Filled in by gameplay consumers; generation never sets it.
    pub building: Option<String>,
    /// Advisory terrain height; no later stage reads it.
    pub elevation: f32,
}

impl Cell {
    pub fn new(pos: Pos, elevation: f32) -> Self {
        Self { pos, district: None, is_street: false, building: None, elevation }
    }
}

/// Anchor of one district archetype.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub id: DistrictId,
    pub archetype: String,
    pub center: Pos,
    pub color: Rgb,
    /// Reserved for weighted partitions; always 1.0.
    pub weight: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreetSegment {
    pub start: Pos,
    pub end: Pos,
    pub kind: StreetKind,
}

/// Inclusive axis-aligned bounding box.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Pos,
    pub max: Pos,
}

impl Bounds {
    pub fn point(pos: Pos) -> Self {
        Self { min: pos, max: pos }
    }

    pub fn include(&mut self, pos: Pos) {
        self.min.x = self.min.x.min(pos.x);
        self.min.y = self.min.y.min(pos.y);
        self.max.x = self.max.x.max(pos.x);
        self.max.y = self.max.y.max(pos.y);
    }

    pub fn width(&self) -> u32 {
        self.max.x.abs_diff(self.min.x) + 1
    }

    pub fn height(&self) -> u32 {
        self.max.y.abs_diff(self.min.y) + 1
    }

    pub fn contains(&self, pos: Pos) -> bool {
        (self.min.x..=self.max.x).contains(&pos.x) && (self.min.y..=self.max.y).contains(&pos.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistrictInfo {
    pub id: DistrictId,
    pub archetype: String,
    /// Non-street member cells in row-major order.
    pub cells: Vec<Pos>,
    pub bounds: Bounds,
    pub center: Pos,
    /// Sorted, deduplicated ids of touching districts.
    pub neighbors: Vec<DistrictId>,
    pub color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GeneratedCity {
    pub width: usize,
    pub height: usize,
    /// Row-major, `width * height` entries.
    pub cells: Vec<Cell>,
    pub districts: BTreeMap<DistrictId, DistrictInfo>,
    pub streets: Vec<StreetSegment>,
}

impl GeneratedCity {
    pub fn cell(&self, x: usize, y: usize) -> Option<&Cell> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.cells.get(y * self.width + x)
    }

    pub fn cell_at(&self, pos: Pos) -> Option<&Cell> {
        let x = usize::try_from(pos.x).ok()?;
        let y = usize::try_from(pos.y).ok()?;
        self.cell(x, y)
    }

    /// Rows top to bottom, so `rows().nth(y)` then `[x]` mirrors `cells[y][x]`.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1))
    }

    pub fn district(&self, id: DistrictId) -> Option<&DistrictInfo> {
        self.districts.get(&id)
    }

    pub fn district_at(&self, pos: Pos) -> Option<&DistrictInfo> {
        self.cell_at(pos).and_then(|cell| cell.district).and_then(|id| self.district(id))
    }

    pub fn districts_of_archetype<'a>(
        &'a self,
        archetype: &'a str,
    ) -> impl Iterator<Item = &'a DistrictInfo> + 'a {
        self.districts.values().filter(move |district| district.archetype == archetype)
    }

    pub fn street_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_street).count()
    }

    /// District adjacency graph keyed by id, neighbor lists sorted ascending.
    pub fn adjacency(&self) -> BTreeMap<DistrictId, Vec<DistrictId>> {
        self.districts.iter().map(|(&id, district)| (id, district.neighbors.clone())).collect()
    }

    /// Tags the building placed on a cell. Returns `false` when `pos` is off the grid.
    pub fn set_building(&mut self, pos: Pos, building: impl Into<String>) -> bool {
        let (Ok(x), Ok(y)) = (usize::try_from(pos.x), usize::try_from(pos.y)) else {
            return false;
        };
        if x >= self.width || y >= self.height {
            return false;
        }
        self.cells[y * self.width + x].building = Some(building.into());
        true
    }

    /// Stable byte encoding of the generated layout. Building tags are left out
    /// since they are owned by consumers, not by generation.
    pub fn canonical_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend((self.width as u32).to_le_bytes());
        bytes.extend((self.height as u32).to_le_bytes());
        for cell in &self.cells {
            bytes.extend(cell.district.map_or(u16::MAX, |id| id.0).to_le_bytes());
            bytes.push(u8::from(cell.is_street));
            bytes.extend(cell.elevation.to_bits().to_le_bytes());
        }

        bytes.extend((self.districts.len() as u32).to_le_bytes());
        for district in self.districts.values() {
            bytes.extend(district.id.0.to_le_bytes());
            bytes.extend(district.archetype.as_bytes());
            bytes.push(0);
            bytes.extend((district.cells.len() as u32).to_le_bytes());
            for pos in [district.bounds.min, district.bounds.max, district.center] {
                bytes.extend(pos.y.to_le_bytes());
                bytes.extend(pos.x.to_le_bytes());
            }
            bytes.extend((district.neighbors.len() as u32).to_le_bytes());
            for neighbor in &district.neighbors {
                bytes.extend(neighbor.0.to_le_bytes());
            }
        }

        bytes.extend((self.streets.len() as u32).to_le_bytes());
        for segment in &self.streets {
            for pos in [segment.start, segment.end] {
                bytes.extend(pos.y.to_le_bytes());
                bytes.extend(pos.x.to_le_bytes());
            }
            bytes.push(match segment.kind {
                StreetKind::Main => 0,
                StreetKind::Boundary => 1,
            });
        }

        bytes
    }

    pub fn fingerprint(&self) -> u64 {
        xxh3_64(&self.canonical_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny_city() -> GeneratedCity {
        let mut cells = Vec::new();
        for y in 0..2 {
            for x in 0..3 {
                let mut cell = Cell::new(Pos::new(x, y), 0.0);
                cell.district = Some(DistrictId(u16::from(x >= 2)));
                cell.is_street = x == 1;
                cells.push(cell);
            }
        }
        let left = DistrictInfo {
            id: DistrictId(0),
            archetype: "warehouse".to_string(),
            cells: vec![Pos::new(0, 0), Pos::new(0, 1)],
            bounds: Bounds { min: Pos::new(0, 0), max: Pos::new(0, 1) },
            center: Pos::new(0, 0),
            neighbors: vec![DistrictId(1)],
            color: Rgb::new(1, 2, 3),
        };
        let right = DistrictInfo {
            id: DistrictId(1),
            archetype: "arts".to_string(),
            cells: vec![Pos::new(2, 0), Pos::new(2, 1)],
            bounds: Bounds { min: Pos::new(2, 0), max: Pos::new(2, 1) },
            center: Pos::new(2, 1),
            neighbors: vec![DistrictId(0)],
            color: Rgb::new(4, 5, 6),
        };
        GeneratedCity {
            width: 3,
            height: 2,
            cells,
            districts: BTreeMap::from([(left.id, left), (right.id, right)]),
            streets: Vec::new(),
        }
    }

    #[test]
    fn cell_lookups_reject_out_of_range_positions() {
        let city = tiny_city();
        assert_eq!(city.cell(2, 1).map(|cell| cell.pos), Some(Pos::new(2, 1)));
        assert!(city.cell(3, 0).is_none());
        assert!(city.cell_at(Pos::new(-1, 0)).is_none());
        assert!(city.cell_at(Pos::new(0, 2)).is_none());
    }

    #[test]
    fn rows_expose_row_major_indexing() {
        let city = tiny_city();
        let rows: Vec<&[Cell]> = city.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1][2].pos, Pos::new(2, 1));
    }

    #[test]
    fn district_queries_follow_cell_ownership() {
        let city = tiny_city();
        assert_eq!(
            city.district_at(Pos::new(2, 0)).map(|district| district.id),
            Some(DistrictId(1))
        );
        assert_eq!(city.districts_of_archetype("warehouse").count(), 1);
        assert_eq!(city.districts_of_archetype("college").count(), 0);
        assert_eq!(city.street_cell_count(), 2);
        assert_eq!(city.adjacency()[&DistrictId(0)], vec![DistrictId(1)]);
    }

    #[test]
    fn building_tags_do_not_change_the_fingerprint() {
        let mut city = tiny_city();
        let before = city.fingerprint();
        assert!(city.set_building(Pos::new(0, 1), "bar"));
        assert!(!city.set_building(Pos::new(5, 5), "bar"));
        assert_eq!(city.cell(0, 1).and_then(|cell| cell.building.as_deref()), Some("bar"));
        assert_eq!(city.fingerprint(), before);
    }

    #[test]
    fn bounds_grow_to_cover_included_points() {
        let mut bounds = Bounds::point(Pos::new(4, 4));
        bounds.include(Pos::new(2, 7));
        assert_eq!(bounds, Bounds { min: Pos::new(2, 4), max: Pos::new(4, 7) });
        assert_eq!((bounds.width(), bounds.height()), (3, 4));
        assert!(bounds.contains(Pos::new(3, 5)));
        assert!(!bounds.contains(Pos::new(5, 5)));
    }

    #[test]
    fn json_round_trip_preserves_city() {
        let city = tiny_city();
        let json = serde_json::to_string(&city).expect("serialize city");
        let decoded: GeneratedCity = serde_json::from_str(&json).expect("deserialize city");
        assert_eq!(decoded, city);
    }
}
