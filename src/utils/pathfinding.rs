//! # Reachability
//!
//! Breadth-first queries over walkable tiles, used to check that a generated
//! city can actually be walked: exits to doors, doors to every room, and
//! every corner of a furnished room to its doors and stairs.

use crate::{Level, Position};
use ::pathfinding::prelude::bfs_reach;
use std::collections::HashSet;

/// Walkable cardinal neighbours of `pos`.
pub fn walkable_neighbors(level: &Level, pos: Position) -> Vec<Position> {
    pos.cardinal_adjacent_positions()
        .into_iter()
        .filter(|next| level.get_tile(*next).is_some_and(|tile| tile.is_walkable()))
        .collect()
}

/// Every position reachable from `start` by walking.
///
/// `start` itself is always included, walkable or not, so a search can
/// begin on a door or stair tile.
///
/// # Examples
///
/// ```
/// use sprawl::utils::reachable_from;
/// use sprawl::{Level, Position, TileType};
///
/// let mut level = Level::new(0, 5, 1);
/// level.set_tile(Position::new(2, 0), TileType::Tree).unwrap();
/// let reached = reachable_from(&level, Position::new(0, 0));
/// assert!(reached.contains(&Position::new(1, 0)));
/// assert!(!reached.contains(&Position::new(3, 0)));
/// ```
pub fn reachable_from(level: &Level, start: Position) -> HashSet<Position> {
    bfs_reach(start, |pos| walkable_neighbors(level, *pos)).collect()
}

/// Like [`reachable_from`], but the walk never leaves the cells `area` accepts.
pub fn reachable_within(
    level: &Level,
    start: Position,
    area: impl Fn(Position) -> bool,
) -> HashSet<Position> {
    bfs_reach(start, |pos| {
        walkable_neighbors(level, *pos)
            .into_iter()
            .filter(|next| area(*next))
            .collect::<Vec<_>>()
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TileType;

    #[test]
    fn test_reachable_stops_at_walls() {
        let mut level = Level::new(0, 6, 6);
        for y in 0..6 {
            level
                .set_tile(Position::new(3, y), TileType::Wall(crate::WallKind::Vertical))
                .unwrap();
        }

        let reached = reachable_from(&level, Position::new(0, 0));
        assert_eq!(reached.len(), 3 * 6);
        assert!(reached.iter().all(|pos| pos.x < 3));
    }

    #[test]
    fn test_door_opens_the_way() {
        let mut level = Level::new(0, 6, 6);
        for y in 0..6 {
            level
                .set_tile(Position::new(3, y), TileType::Wall(crate::WallKind::Vertical))
                .unwrap();
        }
        level.set_tile(Position::new(3, 2), TileType::Door).unwrap();

        let reached = reachable_from(&level, Position::new(0, 0));
        assert!(reached.contains(&Position::new(3, 2)));
        assert!(reached.contains(&Position::new(5, 5)));
        assert_eq!(reached.len(), 6 * 6 - 5);
    }

    #[test]
    fn test_reachable_within_stays_in_area() {
        let level = Level::new(0, 8, 8);
        let reached = reachable_within(&level, Position::new(1, 1), |pos| pos.x < 3 && pos.y < 2);
        assert_eq!(reached.len(), 6);
        assert!(!reached.contains(&Position::new(3, 1)));
        assert!(!reached.contains(&Position::new(1, 2)));
    }

    #[test]
    fn test_no_path_through_sky() {
        let level = Level::filled(1, 4, 4, TileType::Sky);
        assert_eq!(reachable_from(&level, Position::new(0, 0)).len(), 1);
    }
}
