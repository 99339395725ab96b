//! # Utilities Module
//!
//! Walkability and reachability queries over generated levels.

pub mod pathfinding;

pub use self::pathfinding::*;
