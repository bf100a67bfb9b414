//! High-level city generation orchestration that runs the six stages in order.

use rand_chacha::ChaCha8Rng;
use rand_chacha::rand_core::{Rng, SeedableRng};

use crate::config::{CityConfig, validate_dimensions};
use crate::error::CityGenError;

use super::analysis::analyze_districts;
use super::anchors::place_seeds;
use super::elevation::initialize_grid;
use super::invariants::{check_assignment, check_districts};
use super::model::GeneratedCity;
use super::regions::grow_regions;
use super::smoothing::smooth_boundaries;
use super::streets::{carve_boundary_streets, carve_main_streets};

const PIPELINE_TARGET: &str = "citygen::pipeline";

/// Runs the full pipeline on a caller-owned random stream.
///
/// Dimensions and configuration are validated before anything is allocated.
/// The scratch grid lives only for the duration of the call and is moved into
/// the returned city.
pub fn generate<R: Rng + ?Sized>(
    width: i64,
    height: i64,
    config: &CityConfig,
    rng: &mut R,
) -> Result<GeneratedCity, CityGenError> {
    let (width, height) = validate_dimensions(width, height)?;
    config.validate()?;

    let mut grid = initialize_grid(width, height, &config.elevation, rng);
    let seeds = place_seeds(&config.archetypes, width, height);
    tracing::debug!(
        target: PIPELINE_TARGET,
        width,
        height,
        seeds = seeds.len(),
        "grid initialized"
    );

    let fallback_filled = grow_regions(&mut grid, &seeds, config.jitter, rng);
    check_assignment(&grid, &seeds)?;
    tracing::debug!(target: PIPELINE_TARGET, fallback_filled, "regions grown");

    let reassigned =
        smooth_boundaries(&mut grid, config.smoothing_iterations, config.smoothing_threshold);
    tracing::debug!(
        target: PIPELINE_TARGET,
        iterations = config.smoothing_iterations,
        reassigned,
        "boundaries smoothed"
    );

    let streets = carve_main_streets(&mut grid, &seeds, config.main_street_links);
    let boundary_cells = carve_boundary_streets(&mut grid, config.boundary_street_chance, rng);
    tracing::debug!(
        target: PIPELINE_TARGET,
        main_segments = streets.len(),
        boundary_cells,
        "streets carved"
    );

    let districts = analyze_districts(&grid, &seeds)?;
    check_districts(&grid, &seeds, &districts)?;

    let city = GeneratedCity { width, height, cells: grid.into_cells(), districts, streets };
    tracing::info!(
        target: PIPELINE_TARGET,
        width,
        height,
        districts = city.districts.len(),
        street_cells = city.street_cell_count(),
        "city generated"
    );
    Ok(city)
}

/// Fixed-size generator bound to a configuration; each call to
/// [`CityGenerator::generate`] produces an independent city.
#[derive(Clone, Debug)]
pub struct CityGenerator {
    width: i64,
    height: i64,
    config: CityConfig,
}

impl CityGenerator {
    pub fn new(width: i64, height: i64) -> Result<Self, CityGenError> {
        validate_dimensions(width, height)?;
        Ok(Self { width, height, config: CityConfig::default() })
    }

    pub fn with_config(mut self, config: CityConfig) -> Result<Self, CityGenError> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    pub fn config(&self) -> &CityConfig {
        &self.config
    }

    pub fn generate(&self, seed: u64) -> Result<GeneratedCity, CityGenError> {
        self.generate_with_rng(&mut ChaCha8Rng::seed_from_u64(seed))
    }

    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        rng: &mut R,
    ) -> Result<GeneratedCity, CityGenError> {
        generate(self.width, self.height, &self.config, rng)
    }
}
