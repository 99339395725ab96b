//! # Generation Module
//!
//! Procedural city generation: blocks, roads, buildings, walls and furniture.
//!
//! The pipeline runs one way. The partitioner splits the map into blocks and
//! road strips, the road network paints the strips and picks an exit, each
//! block becomes a park or a building, buildings are subdivided into rooms,
//! walls are resolved into junction tiles and finally rooms are furnished.
//! [`CityGenerator`] drives the whole pass.

pub mod building;
pub mod city;
pub mod furnish;
pub mod partition;
pub mod road;
pub mod road_network;
pub mod room;
pub mod structure;
pub mod walls;

pub use building::*;
pub use city::*;
pub use furnish::*;
pub use partition::*;
pub use road::*;
pub use road_network::*;
pub use room::*;
pub use structure::*;
pub use walls::*;

use crate::config::BLOCK_MARGIN;
use crate::{SprawlError, SprawlResult};
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for city generation.
///
/// Every field has a default, so a JSON override file only needs the keys it
/// changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Random seed for reproducible generation
    pub seed: u64,
    /// Map width in tiles
    pub map_width: u32,
    /// Map height in tiles
    pub map_height: u32,
    /// Number of levels, street level included
    pub level_count: usize,
    /// Smallest block side the partitioner may produce
    pub min_block_size: i32,
    /// Road thickness across its direction of travel
    pub road_width: i32,
    /// Width of the planted band around the city
    pub border_width: i32,
    /// Maximum number of nested block splits
    pub max_division_depth: u32,
    /// Hard cap on partition work items processed
    pub max_split_iterations: u32,
    /// Smallest room side the building subdivider may produce
    pub min_room_size: i32,
    /// Probability that a block becomes a park (0.0 to 1.0)
    pub park_chance: f64,
    /// Windows cut into each building's outline
    pub windows_per_building: u32,
    /// Trees planted in each park
    pub trees_per_park: u32,
    /// Whether rooms get furniture
    pub furnish_rooms: bool,
    /// Retry cap for contended placements (doors, spawn point)
    pub max_placement_attempts: u32,
    /// Purposes that should appear at least once in the city
    pub required_purposes: Vec<RoomPurpose>,
    /// Purposes drawn for every other room
    pub filler_purposes: Vec<RoomPurpose>,
}

impl GenerationConfig {
    /// Creates a default generation configuration.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprawl::GenerationConfig;
    ///
    /// let config = GenerationConfig::new(7);
    /// assert_eq!(config.seed, 7);
    /// assert_eq!(config.road_width, 3);
    /// assert!(config.validate().is_ok());
    /// ```
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            map_width: crate::config::DEFAULT_MAP_WIDTH,
            map_height: crate::config::DEFAULT_MAP_HEIGHT,
            level_count: crate::config::DEFAULT_LEVEL_COUNT,
            min_block_size: 10,
            road_width: crate::config::DEFAULT_ROAD_WIDTH,
            border_width: 3,
            max_division_depth: 9,
            max_split_iterations: 512,
            min_room_size: 4,
            park_chance: 0.15,
            windows_per_building: 4,
            trees_per_park: 6,
            furnish_rooms: true,
            max_placement_attempts: 100,
            required_purposes: vec![
                RoomPurpose::Library,
                RoomPurpose::ConferenceRoom,
                RoomPurpose::HalfBathroom,
            ],
            filler_purposes: vec![RoomPurpose::Office, RoomPurpose::HalfBathroom],
        }
    }

    /// Creates a configuration for testing with a smaller, simpler city.
    pub fn for_testing(seed: u64) -> Self {
        Self {
            seed,
            map_width: 60,
            map_height: 40,
            level_count: 2,
            min_block_size: 8,
            border_width: 2,
            max_division_depth: 3,
            park_chance: 0.1,
            windows_per_building: 2,
            trees_per_park: 3,
            max_placement_attempts: 50,
            ..Self::new(seed)
        }
    }

    /// Loads a configuration from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> SprawlResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Parses a configuration from JSON. Missing keys take their defaults.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprawl::GenerationConfig;
    ///
    /// let config = GenerationConfig::from_json_str(r#"{"seed": 9, "map_width": 80}"#).unwrap();
    /// assert_eq!(config.seed, 9);
    /// assert_eq!(config.map_width, 80);
    /// assert_eq!(config.map_height, GenerationConfig::default().map_height);
    /// ```
    pub fn from_json_str(text: &str) -> SprawlResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        Ok(config)
    }

    /// Smallest lot the partitioner can turn into a block.
    pub fn min_lot_size(&self) -> i32 {
        self.min_block_size + BLOCK_MARGIN
    }

    /// The region inside the border band that gets partitioned.
    pub fn inner_bounds(&self) -> Option<Structure> {
        let width = self.map_width as i32 - 2 * self.border_width;
        let height = self.map_height as i32 - 2 * self.border_width;
        if width < 1 || height < 1 {
            return None;
        }
        Some(Structure::new(self.border_width, self.border_width, width, height))
    }

    /// Rejects parameter combinations that cannot produce a city.
    ///
    /// Runs before any tile is written.
    pub fn validate(&self) -> SprawlResult<()> {
        if self.map_width == 0 || self.map_height == 0 {
            return Err(SprawlError::InvalidConfig(format!(
                "map size {}x{} is empty",
                self.map_width, self.map_height
            )));
        }
        if self.level_count == 0 {
            return Err(SprawlError::InvalidConfig(
                "at least one level is required".to_string(),
            ));
        }
        if self.road_width < 3 {
            return Err(SprawlError::InvalidConfig(format!(
                "road width {} is below 3",
                self.road_width
            )));
        }
        if self.min_block_size < 2 {
            return Err(SprawlError::InvalidConfig(format!(
                "minimum block size {} is below 2",
                self.min_block_size
            )));
        }
        if self.min_room_size < 2 {
            return Err(SprawlError::InvalidConfig(format!(
                "minimum room size {} is below 2",
                self.min_room_size
            )));
        }
        if self.border_width < 0 {
            return Err(SprawlError::InvalidConfig(format!(
                "border width {} is negative",
                self.border_width
            )));
        }
        if !(0.0..=1.0).contains(&self.park_chance) {
            return Err(SprawlError::InvalidConfig(format!(
                "park chance {} is outside [0, 1]",
                self.park_chance
            )));
        }
        if self.filler_purposes.is_empty() {
            return Err(SprawlError::InvalidConfig(
                "filler purpose list is empty".to_string(),
            ));
        }
        if self.max_division_depth == 0 || self.max_split_iterations == 0 {
            return Err(SprawlError::InvalidConfig(
                "division depth and split cap must allow at least one split".to_string(),
            ));
        }

        let inner = self.inner_bounds().ok_or_else(|| {
            SprawlError::InvalidConfig(format!(
                "border width {} leaves nothing of a {}x{} map",
                self.border_width, self.map_width, self.map_height
            ))
        })?;

        let lot = self.min_lot_size();
        if inner.width < lot || inner.height < lot {
            return Err(SprawlError::InvalidConfig(format!(
                "inner area {}x{} is smaller than a {}x{} lot",
                inner.width, inner.height, lot, lot
            )));
        }

        let split_span = 2 * lot + self.road_width;
        if inner.width < split_span && inner.height < split_span {
            return Err(SprawlError::InvalidConfig(format!(
                "inner area {}x{} cannot be split by a road (needs {} on one side)",
                inner.width, inner.height, split_span
            )));
        }

        Ok(())
    }
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self::new(42)
    }
}

/// Trait for procedural generators.
///
/// All generation systems implement this trait so the caller can seed one
/// random stream and hand it to any of them.
pub trait Generator<T> {
    /// Generates content using the provided configuration and random number generator.
    fn generate(&self, config: &GenerationConfig, rng: &mut StdRng) -> SprawlResult<T>;

    /// Validates that the generated content meets requirements.
    fn validate(&self, content: &T, config: &GenerationConfig) -> SprawlResult<()>;

    /// Gets the generator type name for logging and debugging.
    fn generator_type(&self) -> &'static str;
}

/// Utility functions for generation algorithms.
pub mod utils {
    use super::*;
    use rand::SeedableRng;

    /// Creates a seeded random number generator from the config.
    pub fn create_rng(config: &GenerationConfig) -> StdRng {
        StdRng::seed_from_u64(config.seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;
    use std::io::Write;

    #[test]
    fn test_generation_config_creation() {
        let config = GenerationConfig::new(12345);
        assert_eq!(config.seed, 12345);
        assert!(config.min_room_size >= 2);
        assert!(config.road_width >= 3);
        assert!(config.validate().is_ok());
        assert!(GenerationConfig::for_testing(1).validate().is_ok());
        assert_eq!(GenerationConfig::default().seed, 42);
    }

    #[test]
    fn test_validate_rejects_impossible_geometry() {
        let mut config = GenerationConfig::for_testing(1);
        config.map_width = 20;
        config.map_height = 20;
        assert!(matches!(config.validate(), Err(SprawlError::InvalidConfig(_))));

        let mut config = GenerationConfig::for_testing(1);
        config.border_width = 30;
        assert!(config.validate().is_err());

        let mut config = GenerationConfig::for_testing(1);
        config.min_block_size = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_bad_parameters() {
        let cases: [fn(&mut GenerationConfig); 9] = [
            |c| c.map_width = 0,
            |c| c.level_count = 0,
            |c| c.road_width = 2,
            |c| c.min_block_size = 1,
            |c| c.min_room_size = 1,
            |c| c.park_chance = 1.5,
            |c| c.filler_purposes.clear(),
            |c| c.max_division_depth = 0,
            |c| c.max_split_iterations = 0,
        ];

        for mutate in cases {
            let mut config = GenerationConfig::for_testing(3);
            mutate(&mut config);
            assert!(config.validate().is_err(), "{:?}", config);
        }
    }

    #[test]
    fn test_inner_bounds() {
        let config = GenerationConfig::for_testing(1);
        let inner = config.inner_bounds().unwrap();
        assert_eq!(inner.as_tuple(), (2, 2, 56, 36));
    }

    #[test]
    fn test_config_from_json_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"seed": 77, "level_count": 4, "filler_purposes": ["Office"]}}"#
        )
        .unwrap();

        let config = GenerationConfig::from_json_file(file.path()).unwrap();
        assert_eq!(config.seed, 77);
        assert_eq!(config.level_count, 4);
        assert_eq!(config.filler_purposes, vec![RoomPurpose::Office]);
        assert_eq!(config.road_width, GenerationConfig::default().road_width);
    }

    #[test]
    fn test_config_load_errors() {
        assert!(matches!(
            GenerationConfig::from_json_str("{ not json"),
            Err(SprawlError::Serde(_))
        ));
        assert!(matches!(
            GenerationConfig::from_json_file("/nonexistent/sprawl/config.json"),
            Err(SprawlError::Io(_))
        ));
    }

    #[test]
    fn test_utils_rng_creation() {
        let config = GenerationConfig::new(12345);
        let mut a = utils::create_rng(&config);
        let mut b = utils::create_rng(&config);
        assert_eq!(a.gen::<u64>(), b.gen::<u64>());
    }
}
