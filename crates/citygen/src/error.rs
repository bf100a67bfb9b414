//! Error kinds surfaced by configuration loading and city generation.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::types::{DistrictId, Pos};

/// Top-level failure of a `generate` call.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum CityGenError {
    /// Caller error, detected before any grid allocation.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(#[from] ConfigError),
    /// A pipeline stage produced an inconsistent grid. Always a bug.
    #[error("internal invariant violation: {0}")]
    InternalInvariantViolation(#[from] InvariantViolation),
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("grid dimensions {width}x{height} must be positive and at most {max} per side")]
    InvalidDimensions { width: i64, height: i64, max: i64 },
    #[error("archetype catalog is empty")]
    EmptyCatalog,
    #[error("archetype catalog holds {count} entries, more than the supported {max}")]
    TooManyArchetypes { count: usize, max: usize },
    #[error("archetype `{0}` is configured more than once")]
    DuplicateArchetype(String),
    #[error("anchor ({x}, {y}) of archetype `{archetype}` lies outside the unit square")]
    AnchorOutOfRange { archetype: String, x: f64, y: f64 },
    #[error("jitter {0} must be finite and non-negative")]
    InvalidJitter(f64),
    #[error("boundary street chance {0} must lie in [0, 1]")]
    InvalidProbability(f64),
    #[error("elevation noise setting `{field}` = {value} must be finite and non-negative")]
    InvalidNoise { field: &'static str, value: f64 },
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum InvariantViolation {
    #[error("cell {pos:?} has no district after region growth")]
    UnassignedCell { pos: Pos },
    #[error("cell {pos:?} references district {district} which has no seed")]
    UnknownDistrict { pos: Pos, district: DistrictId },
    #[error("seed {seed} (`{archetype}`) owns territory but no non-street cell survived")]
    SeedWithoutDistrict { seed: DistrictId, archetype: String },
    #[error("member cells plus street cells cover {actual} cells, expected {expected}")]
    CoverageMismatch { expected: usize, actual: usize },
    #[error("district {from} lists {to} as a neighbor but not the reverse")]
    AsymmetricAdjacency { from: DistrictId, to: DistrictId },
}

/// Failure to obtain a [`crate::config::CityConfig`] from disk.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read city config from {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse city config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("city config is not usable: {0}")]
    Invalid(#[from] ConfigError),
}
