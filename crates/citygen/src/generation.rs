//! Procedural district generation split into one submodule per pipeline stage.

pub mod model;

mod analysis;
mod anchors;
mod elevation;
mod generator;
mod grid;
mod invariants;
mod regions;
mod rng;
mod smoothing;
mod streets;

pub use generator::{CityGenerator, generate};
pub use model::{Bounds, Cell, DistrictInfo, GeneratedCity, Seed, StreetSegment};
pub use streets::rasterize_line;

use crate::error::CityGenError;

/// Generates a city with the reference configuration from a single seed.
pub fn generate_city(seed: u64, width: i64, height: i64) -> Result<GeneratedCity, CityGenError> {
    CityGenerator::new(width, height)?.generate(seed)
}
