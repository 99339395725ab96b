//! # Room Furnishing
//!
//! Per-purpose furniture layouts. Furnishing is decorative: a room too small
//! for part of a layout simply ends up with less furniture.
//!
//! Every write goes through one placement rule. The cell must be inside the
//! room's interior and must not be reserved (door approaches, stairs).
//! Unless a layout asks to override, the cell must also still be empty.
//! Anything that blocks movement is taken back out if it would cut any open
//! cell of the room off from its doors and stairs.

use crate::generation::{Room, RoomPurpose, Structure};
use crate::utils::reachable_within;
use crate::{Level, Position, SprawlResult, TileType};
use log::trace;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

/// Furnishes `room` for `purpose`, returning how many tiles were placed.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use sprawl::generation::{furnish, Room, RoomPurpose, Structure};
/// use sprawl::{Level, TileType};
///
/// let room = Room::new(Structure::new(0, 0, 8, 6));
/// let mut level = Level::new(0, 10, 10);
/// for pos in room.bounds.inner() {
///     level.set_tile(pos, TileType::Floor).unwrap();
/// }
/// let mut rng = rand::rngs::StdRng::seed_from_u64(3);
/// let placed = furnish(&mut level, &room, RoomPurpose::Library, &mut rng).unwrap();
/// assert!(placed > 0);
/// ```
pub fn furnish(
    level: &mut Level,
    room: &Room,
    purpose: RoomPurpose,
    rng: &mut StdRng,
) -> SprawlResult<usize> {
    let placed = match purpose {
        RoomPurpose::Office => furnish_office(level, room, rng)?,
        RoomPurpose::Library => furnish_library(level, room, rng)?,
        RoomPurpose::ConferenceRoom => furnish_conference_room(level, room, rng)?,
        RoomPurpose::HalfBathroom => furnish_half_bathroom(level, room, rng)?,
        RoomPurpose::Park => furnish_park(level, room, rng)?,
    };
    trace!(
        "Furnished {} at {:?} with {} tiles",
        purpose.name(),
        room.bounds.as_tuple(),
        placed
    );
    Ok(placed)
}

/// Writes `tile` at `pos` if the placement rule allows it.
fn place(
    level: &mut Level,
    room: &Room,
    pos: Position,
    tile: TileType,
    override_existing: bool,
) -> SprawlResult<bool> {
    if !room.bounds.is_inner(pos) {
        return Ok(false);
    }
    let Some(existing) = level.get_tile(pos) else {
        return Ok(false);
    };
    if existing.is_reserved() || existing.is_wall() {
        return Ok(false);
    }
    if !override_existing && !existing.is_empty() {
        return Ok(false);
    }
    level.set_tile(pos, tile)?;
    if !tile.is_walkable() && !stays_connected(level, room) {
        trace!("{:?} at ({}, {}) would split the room", tile, pos.x, pos.y);
        level.set_tile(pos, existing)?;
        return Ok(false);
    }
    Ok(true)
}

/// Whether every walkable interior cell and every door of `room` can still
/// reach each other without leaving the room.
fn stays_connected(level: &Level, room: &Room) -> bool {
    let bounds = room.bounds;
    let mut open: Vec<Position> = bounds
        .inner()
        .into_iter()
        .filter(|pos| level.get_tile(*pos).is_some_and(TileType::is_walkable))
        .collect();
    open.extend(
        bounds
            .edges()
            .into_iter()
            .filter(|pos| level.get_tile(*pos) == Some(TileType::Door)),
    );

    let Some(&start) = open.first() else {
        return true;
    };
    let reached = reachable_within(level, start, |pos| {
        bounds.is_inner(pos) || bounds.side_of(pos).is_some()
    });
    open.iter().all(|pos| reached.contains(pos))
}

fn place_all(
    level: &mut Level,
    room: &Room,
    spots: &[Position],
    mut tile: impl FnMut() -> TileType,
    override_existing: bool,
) -> SprawlResult<usize> {
    let mut placed = 0;
    for pos in spots {
        if place(level, room, *pos, tile(), override_existing)? {
            placed += 1;
        }
    }
    Ok(placed)
}

fn bookcase(rng: &mut StdRng) -> TileType {
    TileType::Bookcase {
        full: rng.gen_bool(0.5),
    }
}

/// Draws `k` spots with replacement.
fn sample_with_replacement(spots: &[Position], k: usize, rng: &mut StdRng) -> Vec<Position> {
    (0..k).filter_map(|_| spots.choose(rng).copied()).collect()
}

/// Bookcases along the walls, a desk in the middle and a chair behind it.
fn furnish_office(level: &mut Level, room: &Room, rng: &mut StdRng) -> SprawlResult<usize> {
    let size = room.bounds.inner().len();
    let spots = sample_with_replacement(&room.bounds.along_inside_walls(), (size / 3).max(1), rng);
    let mut placed = 0;
    for pos in spots {
        let tile = bookcase(rng);
        if place(level, room, pos, tile, false)? {
            placed += 1;
        }
    }

    let center = room.bounds.center();
    if place(level, room, Position::new(center.x, center.y - 1), TileType::Chair, true)? {
        placed += 1;
    }
    if place(level, room, center, TileType::ComputerDesk, false)? {
        placed += 1;
    }
    Ok(placed)
}

/// Rows of shelving on every other column, leaving the top and bottom
/// interior rows clear as aisles.
fn furnish_library(level: &mut Level, room: &Room, rng: &mut StdRng) -> SprawlResult<usize> {
    let b = room.bounds;
    let (top, bottom) = (b.y1 + 1, b.y2() - 1);
    let spots: Vec<Position> = b
        .inner()
        .into_iter()
        .filter(|pos| pos.x % 2 == 0 && pos.y != top && pos.y != bottom)
        .collect();
    place_all(level, room, &spots, || bookcase(rng), false)
}

/// A ring of chairs around a block of tables. Large rooms keep a walkway
/// and shelving between the ring and the walls.
fn furnish_conference_room(
    level: &mut Level,
    room: &Room,
    rng: &mut StdRng,
) -> SprawlResult<usize> {
    let b = room.bounds;
    let mut placed = 0;

    let ring: Structure = if b.width >= 9 && b.height >= 9 {
        let size = b.inner().len();
        let spots = sample_with_replacement(&b.along_inside_walls(), (size / 3).max(1), rng);
        for pos in spots {
            let tile = bookcase(rng);
            if place(level, room, pos, tile, false)? {
                placed += 1;
            }
        }
        b.shrink(2).unwrap_or(b)
    } else if b.width >= 7 && b.height >= 7 {
        b.shrink(1).unwrap_or(b)
    } else {
        b
    };

    let along = ring.along_inside_walls();
    let Some(min_x) = along.iter().map(|p| p.x).min() else {
        return Ok(placed);
    };
    let max_x = along.iter().map(|p| p.x).max().unwrap_or(min_x);
    let min_y = along.iter().map(|p| p.y).min().unwrap_or(0);
    let max_y = along.iter().map(|p| p.y).max().unwrap_or(min_y);

    let chairs: Vec<Position> = along
        .into_iter()
        .filter(|p| !((p.x == min_x || p.x == max_x) && (p.y == min_y || p.y == max_y)))
        .collect();
    placed += place_all(level, room, &chairs, || TileType::Chair, true)?;
    placed += place_all(
        level,
        room,
        &ring.inner_away_from_walls(),
        || TileType::Table,
        true,
    )?;
    Ok(placed)
}

/// A sink and toilet against the wall facing the door, plus one empty shelf.
fn furnish_half_bathroom(
    level: &mut Level,
    room: &Room,
    rng: &mut StdRng,
) -> SprawlResult<usize> {
    let mut placed = 0;
    let mut fixtures_wall = room.inside_wall_opposite_door();
    if fixtures_wall.is_empty() {
        fixtures_wall = room.bounds.along_inside_walls();
    }
    let spots: Vec<Position> = fixtures_wall.choose_multiple(rng, 2).copied().collect();
    for (pos, fixture) in spots.into_iter().zip([TileType::Sink, TileType::Toilet]) {
        if place(level, room, pos, fixture, true)? {
            placed += 1;
        }
    }

    if let Some(&pos) = room.bounds.along_inside_walls().choose(rng) {
        if place(level, room, pos, TileType::Bookcase { full: false }, false)? {
            placed += 1;
        }
    }
    Ok(placed)
}

/// An indoor garden: grass over the floor and a few trees.
fn furnish_park(level: &mut Level, room: &Room, rng: &mut StdRng) -> SprawlResult<usize> {
    let inner = room.bounds.inner();
    let mut placed = place_all(level, room, &inner, || TileType::Grass, true)?;
    let trees = sample_with_replacement(&inner, 5.min(inner.len()), rng);
    placed += place_all(level, room, &trees, || TileType::Tree, true)?;
    Ok(placed)
}

/// Turns a whole block into a park: grass over its footprint and
/// `trees` trees scattered over the grass.
pub fn plant_park(
    level: &mut Level,
    block: Structure,
    trees: u32,
    rng: &mut StdRng,
) -> SprawlResult<()> {
    let area = block.area();
    for pos in &area {
        level.set_tile(*pos, TileType::Grass)?;
    }
    for pos in sample_with_replacement(&area, trees as usize, rng) {
        level.set_tile(pos, TileType::Tree)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generation::{place_door, resolve_walls};
    use rand::SeedableRng;

    const PURPOSES: [RoomPurpose; 5] = [
        RoomPurpose::Office,
        RoomPurpose::Library,
        RoomPurpose::ConferenceRoom,
        RoomPurpose::HalfBathroom,
        RoomPurpose::Park,
    ];

    fn walled(bounds: Structure) -> (Level, Room) {
        let mut level = Level::new(0, 20, 20);
        for pos in bounds.inner() {
            level.set_tile(pos, TileType::Floor).unwrap();
        }
        resolve_walls(&mut level, bounds).unwrap();
        (level, Room::new(bounds))
    }

    fn is_furniture(tile: TileType) -> bool {
        matches!(
            tile,
            TileType::Chair
                | TileType::Table
                | TileType::Bookcase { .. }
                | TileType::Sink
                | TileType::Toilet
                | TileType::ComputerDesk
        )
    }

    #[test]
    fn test_furnish_never_writes_outside_interior() {
        for purpose in PURPOSES {
            for seed in 0..10 {
                let bounds = Structure::new(2, 3, 11, 10);
                let (mut level, mut room) = walled(bounds);
                let door = Position::new(6, 3);
                place_door(&mut level, door).unwrap();
                room.set_door(door).unwrap();
                let before = level.clone();

                let mut rng = StdRng::seed_from_u64(seed);
                furnish(&mut level, &room, purpose, &mut rng).unwrap();

                for pos in before.positions_where(|_| true) {
                    if !bounds.is_inner(pos) || before.get_tile(pos).is_some_and(TileType::is_reserved) {
                        assert_eq!(level.get_tile(pos), before.get_tile(pos), "{:?} {:?}", purpose, pos);
                    }
                }
            }
        }
    }

    #[test]
    fn test_furniture_never_seals_doors_or_stairs() {
        let bounds = Structure::new(2, 2, 11, 10);
        let doors = [
            Position::new(6, 2),
            Position::new(8, 12),
            Position::new(2, 6),
            Position::new(13, 8),
        ];
        let stair = Position::new(10, 5);

        for purpose in PURPOSES {
            for seed in 0..30 {
                let (mut level, mut room) = walled(bounds);
                for door in doors {
                    place_door(&mut level, door).unwrap();
                }
                room.set_door(doors[0]).unwrap();
                level.set_tile(stair, TileType::StairsUp).unwrap();

                let mut rng = StdRng::seed_from_u64(seed);
                furnish(&mut level, &room, purpose, &mut rng).unwrap();

                let reached = reachable_within(&level, doors[0], |pos| {
                    bounds.is_inner(pos) || bounds.side_of(pos).is_some()
                });
                for door in doors {
                    assert!(reached.contains(&door), "{:?} seed {} door {:?}", purpose, seed, door);
                }
                assert!(reached.contains(&stair), "{:?} seed {}", purpose, seed);
                for pos in bounds.inner() {
                    if level.get_tile(pos).is_some_and(TileType::is_walkable) {
                        assert!(reached.contains(&pos), "{:?} seed {} pocket {:?}", purpose, seed, pos);
                    }
                }
            }
        }
    }

    #[test]
    fn test_blocking_piece_is_taken_back() {
        // A 3x1 corridor of floor: a shelf in the middle would cut the room in two.
        let bounds = Structure::new(0, 0, 4, 2);
        let (mut level, room) = walled(bounds);
        let middle = Position::new(2, 1);
        assert!(!place(&mut level, &room, middle, TileType::Table, false).unwrap());
        assert_eq!(level.get_tile(middle), Some(TileType::Floor));

        assert!(place(&mut level, &room, Position::new(1, 1), TileType::Table, false).unwrap());
        assert!(place(&mut level, &room, middle, TileType::Chair, false).unwrap());
    }

    #[test]
    fn test_office_layout() {
        let (mut level, room) = walled(Structure::new(0, 0, 8, 6));
        let mut rng = StdRng::seed_from_u64(1);
        furnish(&mut level, &room, RoomPurpose::Office, &mut rng).unwrap();

        assert_eq!(level.get_tile(Position::new(4, 3)), Some(TileType::ComputerDesk));
        assert_eq!(level.get_tile(Position::new(4, 2)), Some(TileType::Chair));
        assert!(level.count_tiles(|t| matches!(t, TileType::Bookcase { .. })) >= 1);
    }

    #[test]
    fn test_library_leaves_aisles() {
        let bounds = Structure::new(1, 1, 9, 7);
        let (mut level, room) = walled(bounds);
        let mut rng = StdRng::seed_from_u64(2);
        let placed = furnish(&mut level, &room, RoomPurpose::Library, &mut rng).unwrap();

        let shelves = level.positions_where(|t| matches!(t, TileType::Bookcase { .. }));
        assert_eq!(shelves.len(), placed);
        // Even columns 2..=8 across the four rows between the aisles.
        assert_eq!(placed, 4 * 4);
        for pos in shelves {
            assert_eq!(pos.x % 2, 0);
            assert!(pos.y != 2 && pos.y != 7);
        }
    }

    #[test]
    fn test_conference_room_ring() {
        let bounds = Structure::new(0, 0, 12, 12);
        let (mut level, room) = walled(bounds);
        let mut rng = StdRng::seed_from_u64(4);
        furnish(&mut level, &room, RoomPurpose::ConferenceRoom, &mut rng).unwrap();

        let ring = bounds.shrink(2).unwrap();
        for pos in ring.inner_away_from_walls() {
            assert_eq!(level.get_tile(pos), Some(TileType::Table));
        }
        assert!(level.count_tiles(|t| t == TileType::Chair) > 0);
        // Ring corners stay clear of chairs.
        assert_ne!(level.get_tile(Position::new(ring.x1 + 1, ring.y1 + 1)), Some(TileType::Chair));
    }

    #[test]
    fn test_small_conference_room_degrades() {
        let (mut level, room) = walled(Structure::new(0, 0, 3, 3));
        let mut rng = StdRng::seed_from_u64(4);
        assert!(furnish(&mut level, &room, RoomPurpose::ConferenceRoom, &mut rng).is_ok());
    }

    #[test]
    fn test_half_bathroom_fixtures_face_door() {
        for seed in 0..10 {
            let bounds = Structure::new(0, 0, 6, 5);
            let (mut level, mut room) = walled(bounds);
            let door = Position::new(3, 0);
            place_door(&mut level, door).unwrap();
            room.set_door(door).unwrap();

            let mut rng = StdRng::seed_from_u64(seed);
            furnish(&mut level, &room, RoomPurpose::HalfBathroom, &mut rng).unwrap();

            for pos in level.positions_where(|t| t == TileType::Sink || t == TileType::Toilet) {
                assert_eq!(pos.y, 4);
            }
            assert!(level.count_tiles(|t| t == TileType::Sink || t == TileType::Toilet) >= 1);
        }
    }

    #[test]
    fn test_reserved_tiles_are_left_alone() {
        let bounds = Structure::new(0, 0, 8, 8);
        let (mut level, room) = walled(bounds);
        for pos in bounds.inner() {
            level.set_tile(pos, TileType::ReservedFloor).unwrap();
        }
        let mut rng = StdRng::seed_from_u64(5);
        for purpose in PURPOSES {
            assert_eq!(furnish(&mut level, &room, purpose, &mut rng).unwrap(), 0);
        }
        assert_eq!(level.count_tiles(is_furniture), 0);
    }

    #[test]
    fn test_plant_park() {
        let mut level = Level::new(0, 20, 20);
        let block = Structure::new(2, 2, 10, 8);
        let mut rng = StdRng::seed_from_u64(6);
        plant_park(&mut level, block, 4, &mut rng).unwrap();

        let trees = level.count_tiles(|t| t == TileType::Tree);
        assert!((1..=4).contains(&trees));
        assert_eq!(
            level.count_tiles(|t| t == TileType::Grass) + trees,
            block.area().len()
        );
    }
}
