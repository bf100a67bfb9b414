//! Tunable generation parameters and the district archetype catalog.
//!
//! Configuration is plain data: `CityConfig::default()` reproduces the
//! five-archetype reference layout, and the same shape can be loaded from a
//! TOML file (see `data/city.toml`).

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigLoadError};
use crate::types::Rgb;

/// Largest accepted grid extent per side.
pub const MAX_GRID_EXTENT: i64 = 4096;

/// One district category and the fixed normalized position of its seed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Archetype {
    pub tag: String,
    /// `[x, y]` in the unit square, scaled by the grid extent at placement time.
    pub anchor: [f64; 2],
    pub color: Rgb,
}

impl Archetype {
    pub fn new(tag: &str, anchor: [f64; 2], color: Rgb) -> Self {
        Self { tag: tag.to_string(), anchor, color }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ElevationConfig {
    /// Upper bound of the uniform per-cell baseline.
    pub baseline_max: f64,
    pub noise_frequency: f64,
    pub noise_amplitude: f64,
}

impl Default for ElevationConfig {
    fn default() -> Self {
        Self { baseline_max: 0.2, noise_frequency: 0.1, noise_amplitude: 0.3 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CityConfig {
    /// Half-width of the uniform offset added to every seed distance.
    pub jitter: f64,
    pub smoothing_iterations: u32,
    /// Cells with fewer same-district neighbors than this are relaxed.
    pub smoothing_threshold: usize,
    /// How many nearest seeds each seed is connected to by a main street.
    pub main_street_links: usize,
    pub boundary_street_chance: f64,
    pub elevation: ElevationConfig,
    pub archetypes: Vec<Archetype>,
}

impl Default for CityConfig {
    fn default() -> Self {
        Self {
            jitter: 1.0,
            smoothing_iterations: 2,
            smoothing_threshold: 3,
            main_street_links: 2,
            boundary_street_chance: 0.3,
            elevation: ElevationConfig::default(),
            archetypes: default_archetypes(),
        }
    }
}

fn default_archetypes() -> Vec<Archetype> {
    vec![
        Archetype::new("warehouse", [0.3, 0.3], Rgb::new(0x8d, 0x6e, 0x63)),
        Archetype::new("college", [0.7, 0.3], Rgb::new(0x42, 0x85, 0xf4)),
        Archetype::new("downtown", [0.5, 0.5], Rgb::new(0xe5, 0x39, 0x35)),
        Archetype::new("residential", [0.3, 0.7], Rgb::new(0x43, 0xa0, 0x47)),
        Archetype::new("arts", [0.7, 0.7], Rgb::new(0xab, 0x47, 0xbc)),
    ]
}

impl CityConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigLoadError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let text = fs::read_to_string(path)
            .map_err(|source| ConfigLoadError::Read { path: path.to_path_buf(), source })?;
        let config = Self::from_toml_str(&text)?;
        tracing::info!(
            target: "citygen::config",
            path = %path.display(),
            archetypes = config.archetypes.len(),
            "city config loaded"
        );
        Ok(config)
    }

    /// Checks every parameter the pipeline relies on. Dimensions are checked
    /// separately by [`validate_dimensions`] since they are not part of the config.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.archetypes.is_empty() {
            return Err(ConfigError::EmptyCatalog);
        }
        let max = usize::from(u16::MAX) + 1;
        if self.archetypes.len() > max {
            return Err(ConfigError::TooManyArchetypes { count: self.archetypes.len(), max });
        }

        let mut seen = BTreeSet::new();
        for archetype in &self.archetypes {
            if !seen.insert(archetype.tag.as_str()) {
                return Err(ConfigError::DuplicateArchetype(archetype.tag.clone()));
            }
            let [x, y] = archetype.anchor;
            if !(0.0..=1.0).contains(&x) || !(0.0..=1.0).contains(&y) {
                return Err(ConfigError::AnchorOutOfRange {
                    archetype: archetype.tag.clone(),
                    x,
                    y,
                });
            }
        }

        if !self.jitter.is_finite() || self.jitter < 0.0 {
            return Err(ConfigError::InvalidJitter(self.jitter));
        }
        if !(0.0..=1.0).contains(&self.boundary_street_chance) {
            return Err(ConfigError::InvalidProbability(self.boundary_street_chance));
        }

        for (field, value) in [
            ("baseline_max", self.elevation.baseline_max),
            ("noise_frequency", self.elevation.noise_frequency),
            ("noise_amplitude", self.elevation.noise_amplitude),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::InvalidNoise { field, value });
            }
        }

        Ok(())
    }
}

/// Converts caller-supplied extents into grid dimensions, rejecting anything
/// that cannot be allocated as a positive grid.
pub fn validate_dimensions(width: i64, height: i64) -> Result<(usize, usize), ConfigError> {
    let invalid = || ConfigError::InvalidDimensions { width, height, max: MAX_GRID_EXTENT };
    if !(1..=MAX_GRID_EXTENT).contains(&width) || !(1..=MAX_GRID_EXTENT).contains(&height) {
        return Err(invalid());
    }
    let width = usize::try_from(width).map_err(|_| invalid())?;
    let height = usize::try_from(height).map_err(|_| invalid())?;
    Ok((width, height))
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    const CHECKED_IN_CONFIG: &str = include_str!("../data/city.toml");

    #[test]
    fn checked_in_config_matches_defaults() {
        let parsed = CityConfig::from_toml_str(CHECKED_IN_CONFIG).expect("data/city.toml parses");
        assert_eq!(parsed, CityConfig::default());
    }

    #[test]
    fn default_catalog_is_the_quincunx_layout() {
        let anchors: Vec<[f64; 2]> =
            CityConfig::default().archetypes.iter().map(|archetype| archetype.anchor).collect();
        assert_eq!(anchors, vec![[0.3, 0.3], [0.7, 0.3], [0.5, 0.5], [0.3, 0.7], [0.7, 0.7]]);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config = CityConfig::from_toml_str("jitter = 0.5\n").expect("partial config parses");
        assert_eq!(config.jitter, 0.5);
        assert_eq!(config.smoothing_iterations, 2);
        assert_eq!(config.archetypes, CityConfig::default().archetypes);
    }

    #[test]
    fn toml_round_trip_preserves_config() {
        let mut config = CityConfig::default();
        config.archetypes.truncate(2);
        config.boundary_street_chance = 0.1;
        let text = toml::to_string(&config).expect("serialize config");
        assert_eq!(CityConfig::from_toml_str(&text).expect("reparse"), config);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        let err = CityConfig::from_toml_str("jiter = 0.5\n").expect_err("typo should fail");
        assert!(matches!(err, ConfigLoadError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn bad_colors_surface_as_parse_errors() {
        let text = "[[archetypes]]\ntag = \"docks\"\nanchor = [0.5, 0.5]\ncolor = \"blue\"\n";
        let err = CityConfig::from_toml_str(text).expect_err("color must be hex");
        assert!(matches!(err, ConfigLoadError::Parse(_)), "got {err:?}");
    }

    #[test]
    fn validation_rejects_unusable_values() {
        let mut config = CityConfig { archetypes: Vec::new(), ..CityConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::EmptyCatalog));

        config = CityConfig::default();
        config.archetypes[1].tag = "warehouse".to_string();
        assert_eq!(
            config.validate(),
            Err(ConfigError::DuplicateArchetype("warehouse".to_string()))
        );

        config = CityConfig::default();
        config.archetypes[0].anchor = [1.2, 0.5];
        assert!(matches!(config.validate(), Err(ConfigError::AnchorOutOfRange { .. })));

        config = CityConfig { jitter: f64::NAN, ..CityConfig::default() };
        assert!(matches!(config.validate(), Err(ConfigError::InvalidJitter(_))));

        config = CityConfig { boundary_street_chance: 1.5, ..CityConfig::default() };
        assert_eq!(config.validate(), Err(ConfigError::InvalidProbability(1.5)));

        config = CityConfig::default();
        config.elevation.noise_amplitude = -1.0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidNoise { field: "noise_amplitude", value: -1.0 })
        );
    }

    #[test]
    fn dimensions_must_be_positive_and_bounded() {
        assert_eq!(validate_dimensions(30, 20), Ok((30, 20)));
        assert_eq!(validate_dimensions(1, 1), Ok((1, 1)));
        for (width, height) in [(0, 20), (30, -1), (MAX_GRID_EXTENT + 1, 5)] {
            assert_eq!(
                validate_dimensions(width, height),
                Err(ConfigError::InvalidDimensions { width, height, max: MAX_GRID_EXTENT })
            );
        }
    }

    #[test]
    fn load_reads_config_from_disk() {
        let mut file = NamedTempFile::new().expect("tempfile");
        writeln!(file, "smoothing_iterations = 4").expect("write config");
        let config = CityConfig::load(file.path()).expect("load config");
        assert_eq!(config.smoothing_iterations, 4);

        let missing = file.path().with_extension("missing");
        let err = CityConfig::load(&missing).expect_err("missing file");
        assert!(matches!(err, ConfigLoadError::Read { .. }), "got {err:?}");
    }
}
