pub mod config;
pub mod error;
pub mod generation;
pub mod types;

pub use config::{Archetype, CityConfig, ElevationConfig, MAX_GRID_EXTENT};
pub use error::{CityGenError, ConfigError, ConfigLoadError, InvariantViolation};
pub use generation::*;
pub use types::*;
