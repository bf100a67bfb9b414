//! Seed placement: one anchor per archetype at a fixed fraction of the grid.

use crate::config::Archetype;
use crate::types::{DistrictId, Pos};

use super::model::Seed;

/// Seeds in catalog order. The catalog is validated beforehand, so its length fits a `u16`.
pub(super) fn place_seeds(archetypes: &[Archetype], width: usize, height: usize) -> Vec<Seed> {
    archetypes
        .iter()
        .enumerate()
        .map(|(index, archetype)| {
            let [anchor_x, anchor_y] = archetype.anchor;
            Seed {
                id: DistrictId(index as u16),
                archetype: archetype.tag.clone(),
                center: Pos::new(scale_anchor(anchor_x, width), scale_anchor(anchor_y, height)),
                color: archetype.color,
                weight: 1.0,
            }
        })
        .collect()
}

/// `floor(anchor * extent)`, kept on the grid when the anchor sits on the far edge.
fn scale_anchor(anchor: f64, extent: usize) -> i32 {
    let scaled = (anchor * extent as f64).floor() as usize;
    scaled.min(extent.saturating_sub(1)) as i32
}
