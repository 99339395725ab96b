//! # Sprawl
//!
//! A turn-based roguelike set in a procedurally generated city.
//!
//! ## Architecture Overview
//!
//! The crate is built around a single generation pass that turns a few numbers
//! (map size, block size, road width, storey count) into a finished [`World`]:
//!
//! - **Game Model**: positions, tile types and the multi-level tile grid
//! - **Generation System**: block partitioning, road carving, building
//!   subdivision, wall junction resolution and room furnishing
//! - **Utilities**: reachability checks over walkable tiles
//!
//! Rendering, input, field of view and turn dispatch live outside this crate;
//! they only ever see the finished tile grid, the exit list and the stair
//! registry.

pub mod game;
pub mod generation;
pub mod utils;

pub use game::*;
pub use generation::*;
pub use utils::*;

pub use game::{Level, Position, StairRegistry, TileType, WallKind, World};

pub use generation::{
    CityGenerator, GenerationConfig, Generator, Road, Room, RoomPurpose, Structure,
};

/// Core error type for the Sprawl generator and world model.
#[derive(thiserror::Error, Debug)]
pub enum SprawlError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// Requested parameters cannot produce a map
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A tile or door was placed somewhere it cannot go
    #[error("Invalid placement: {0}")]
    InvalidPlacement(String),

    /// Generation failed
    #[error("Generation failed: {0}")]
    GenerationFailed(String),
}

/// Result type used throughout the Sprawl codebase.
pub type SprawlResult<T> = Result<T, SprawlError>;

/// Version information for the game.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Game configuration constants.
pub mod config {
    /// Default city width in tiles
    pub const DEFAULT_MAP_WIDTH: u32 = 100;

    /// Default city height in tiles
    pub const DEFAULT_MAP_HEIGHT: u32 = 60;

    /// Default number of levels (street level plus upper storeys)
    pub const DEFAULT_LEVEL_COUNT: usize = 3;

    /// Default road width in tiles
    pub const DEFAULT_ROAD_WIDTH: i32 = 3;

    /// Cells lost between a lot and the block built on it: a one-cell gap on
    /// each side plus the inclusive far wall.
    pub const BLOCK_MARGIN: i32 = 3;

    /// Number of exit cells recorded when a road is carved through the border
    pub const EXIT_SPAN: usize = 3;
}
