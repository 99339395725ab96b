//! # World Representation
//!
//! The multi-level tile grid the generator writes into, along with the exit
//! list and stair registry the turn layer reads back out.

use crate::{Position, SprawlError, SprawlResult, TileType};
use serde::{Deserialize, Serialize};

/// A single level of the city: one tile per cell, stored row by row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    /// Level index (0 is street level)
    pub id: usize,
    pub width: u32,
    pub height: u32,
    /// Tiles indexed as `tiles[y][x]`
    pub tiles: Vec<Vec<TileType>>,
}

impl Level {
    /// Creates a street-level grid of unbuilt cement.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprawl::{Level, Position, TileType};
    ///
    /// let level = Level::new(0, 20, 10);
    /// assert_eq!(level.get_tile(Position::new(19, 9)), Some(TileType::Cement));
    /// assert_eq!(level.get_tile(Position::new(20, 9)), None);
    /// ```
    pub fn new(id: usize, width: u32, height: u32) -> Self {
        Self::filled(id, width, height, TileType::Cement)
    }

    /// Creates a grid with every cell set to `tile`.
    pub fn filled(id: usize, width: u32, height: u32, tile: TileType) -> Self {
        Self {
            id,
            width,
            height,
            tiles: vec![vec![tile; width as usize]; height as usize],
        }
    }

    pub fn is_valid_position(&self, pos: Position) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as u32) < self.width && (pos.y as u32) < self.height
    }

    pub fn get_tile(&self, pos: Position) -> Option<TileType> {
        if !self.is_valid_position(pos) {
            return None;
        }
        Some(self.tiles[pos.y as usize][pos.x as usize])
    }

    /// Writes a tile, rejecting positions outside the grid.
    pub fn set_tile(&mut self, pos: Position, tile: TileType) -> SprawlResult<()> {
        if !self.is_valid_position(pos) {
            return Err(SprawlError::InvalidPlacement(format!(
                "({}, {}) is outside level {} ({}x{})",
                pos.x, pos.y, self.id, self.width, self.height
            )));
        }
        self.tiles[pos.y as usize][pos.x as usize] = tile;
        Ok(())
    }

    /// Whether `pos` lies on the outermost row or column.
    pub fn is_boundary(&self, pos: Position) -> bool {
        self.is_valid_position(pos)
            && (pos.x == 0
                || pos.y == 0
                || pos.x as u32 == self.width - 1
                || pos.y as u32 == self.height - 1)
    }

    /// Counts tiles matching a predicate.
    pub fn count_tiles(&self, predicate: impl Fn(TileType) -> bool) -> usize {
        self.tiles
            .iter()
            .flat_map(|row| row.iter())
            .filter(|tile| predicate(**tile))
            .count()
    }

    /// Positions of every tile matching a predicate, in row-major order.
    pub fn positions_where(&self, predicate: impl Fn(TileType) -> bool) -> Vec<Position> {
        let mut positions = Vec::new();
        for (y, row) in self.tiles.iter().enumerate() {
            for (x, tile) in row.iter().enumerate() {
                if predicate(*tile) {
                    positions.push(Position::new(x as i32, y as i32));
                }
            }
        }
        positions
    }

    /// Renders the level as one line of glyphs per row.
    pub fn render_ascii(&self) -> String {
        let mut out = String::with_capacity((self.width as usize + 1) * self.height as usize);
        for row in &self.tiles {
            out.extend(row.iter().map(|tile| tile.glyph()));
            out.push('\n');
        }
        out
    }
}

/// One end of a stair shaft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StairLocation {
    pub level: usize,
    pub position: Position,
}

/// Up and down stair locations across all levels.
///
/// Stairs are only ever added in pairs: an up stair on level N always has a
/// down stair on level N + 1 at the same position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StairRegistry {
    pub up: Vec<StairLocation>,
    pub down: Vec<StairLocation>,
}

impl StairRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    fn add_shaft(&mut self, lower_level: usize, position: Position) {
        self.up.push(StairLocation {
            level: lower_level,
            position,
        });
        self.down.push(StairLocation {
            level: lower_level + 1,
            position,
        });
    }

    pub fn is_up_stair(&self, level: usize, position: Position) -> bool {
        self.up.contains(&StairLocation { level, position })
    }

    pub fn is_down_stair(&self, level: usize, position: Position) -> bool {
        self.down.contains(&StairLocation { level, position })
    }

    /// Level reached by taking the stairs at `position`, if there are any.
    pub fn destination(&self, level: usize, position: Position) -> Option<usize> {
        if self.is_up_stair(level, position) {
            Some(level + 1)
        } else if self.is_down_stair(level, position) && level > 0 {
            Some(level - 1)
        } else {
            None
        }
    }

    /// Number of shafts registered.
    pub fn shaft_count(&self) -> usize {
        self.up.len()
    }
}

/// The complete generated city: every level plus exits and stairs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub levels: Vec<Level>,
    /// Map-boundary cells that lead out of the city
    pub exits: Vec<Position>,
    pub stairs: StairRegistry,
    /// Where the player starts on street level
    pub player_spawn: Position,
    pub current_level_id: usize,
}

impl World {
    /// Creates a world of `level_count` levels: cement at street level, sky above.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprawl::{Position, TileType, World};
    ///
    /// let world = World::new(30, 20, 3);
    /// assert_eq!(world.levels.len(), 3);
    /// assert_eq!(world.get_level(0).unwrap().get_tile(Position::new(1, 1)), Some(TileType::Cement));
    /// assert_eq!(world.get_level(2).unwrap().get_tile(Position::new(1, 1)), Some(TileType::Sky));
    /// ```
    pub fn new(width: u32, height: u32, level_count: usize) -> Self {
        let levels = (0..level_count)
            .map(|id| {
                if id == 0 {
                    Level::new(id, width, height)
                } else {
                    Level::filled(id, width, height, TileType::Sky)
                }
            })
            .collect();

        Self {
            levels,
            exits: Vec::new(),
            stairs: StairRegistry::new(),
            player_spawn: Position::origin(),
            current_level_id: 0,
        }
    }

    pub fn get_level(&self, id: usize) -> Option<&Level> {
        self.levels.get(id)
    }

    /// Mutable access to a level, reporting a missing level as an error.
    pub fn level_mut(&mut self, id: usize) -> SprawlResult<&mut Level> {
        let count = self.levels.len();
        self.levels.get_mut(id).ok_or_else(|| {
            SprawlError::InvalidPlacement(format!("level {} does not exist ({} levels)", id, count))
        })
    }

    pub fn current_level(&self) -> Option<&Level> {
        self.get_level(self.current_level_id)
    }

    /// Switches the current level.
    pub fn change_level(&mut self, id: usize) -> SprawlResult<()> {
        if id >= self.levels.len() {
            return Err(SprawlError::InvalidPlacement(format!(
                "cannot change to level {} ({} levels)",
                id,
                self.levels.len()
            )));
        }
        self.current_level_id = id;
        Ok(())
    }

    pub fn is_exit(&self, pos: Position) -> bool {
        self.exits.contains(&pos)
    }

    /// Places a stair shaft from `lower_level` up to the level above.
    ///
    /// Writes `StairsUp` below and `StairsDown` above at the same position and
    /// records both ends in the registry.
    pub fn add_stair_shaft(&mut self, lower_level: usize, position: Position) -> SprawlResult<()> {
        if lower_level + 1 >= self.levels.len() {
            return Err(SprawlError::InvalidPlacement(format!(
                "no level above {} for a stair shaft",
                lower_level
            )));
        }
        self.level_mut(lower_level)?
            .set_tile(position, TileType::StairsUp)?;
        self.level_mut(lower_level + 1)?
            .set_tile(position, TileType::StairsDown)?;
        self.stairs.add_shaft(lower_level, position);
        Ok(())
    }
}
