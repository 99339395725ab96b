//! # Building Subdivision
//!
//! Turns a block outline into a walled building: floor, outline walls, a
//! tree of rooms joined by doors, one exterior door and a few windows.
//!
//! Subdivision keeps splitting the largest rectangles with a single wall
//! carrying a single door, so the rooms and doors always form a tree and
//! every room can be walked to from every other room.

use crate::generation::{resolve_walls, Axis, GenerationConfig, Room, Structure};
use crate::{Level, Position, SprawlError, SprawlResult, TileType};
use log::{debug, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A finished building storey.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Building {
    pub outline: Structure,
    /// Level this storey was built on
    pub level: usize,
    pub rooms: Vec<Room>,
    /// Doors between rooms
    pub doors: Vec<Position>,
    /// Door to the street, street level only
    pub exterior_door: Option<Position>,
}

/// Splits `block` into rooms joined by doors.
///
/// A rectangle is split while its longer side is more than twice
/// `min_room_size`; the cut runs across that side at an offset that leaves
/// both halves at least `min_room_size`, and never ends on a door already in
/// the rectangle's outline. Each cut gets one door somewhere along its
/// length, so the result always has one door fewer than rooms.
///
/// # Examples
///
/// ```
/// use rand::SeedableRng;
/// use sprawl::generation::{subdivide, Structure};
///
/// let mut rng = rand::rngs::StdRng::seed_from_u64(4);
/// let (rooms, doors) = subdivide(Structure::new(0, 0, 20, 12), 4, &mut rng).unwrap();
/// assert_eq!(doors.len(), rooms.len() - 1);
/// ```
pub fn subdivide(
    block: Structure,
    min_room_size: i32,
    rng: &mut StdRng,
) -> SprawlResult<(Vec<Room>, Vec<Position>)> {
    if min_room_size < 2 {
        return Err(SprawlError::InvalidConfig(format!(
            "minimum room size {} is below 2",
            min_room_size
        )));
    }

    let mut rooms = Vec::new();
    let mut doors = Vec::new();
    let mut stack: Vec<(Structure, Vec<Position>)> = vec![(block, Vec::new())];

    while let Some((rect, outline_doors)) = stack.pop() {
        match split_rect(rect, &outline_doors, min_room_size, rng) {
            Some((first, second, door)) => {
                doors.push(door);
                for child in [second, first] {
                    let mut inherited: Vec<Position> = outline_doors
                        .iter()
                        .copied()
                        .filter(|d| child.side_of(*d).is_some())
                        .collect();
                    inherited.push(door);
                    stack.push((child, inherited));
                }
            }
            None => {
                let mut room = Room::new(rect);
                if let Some(door) = outline_doors.last() {
                    room.set_door(*door)?;
                }
                rooms.push(room);
            }
        }
    }

    Ok((rooms, doors))
}

/// Chooses a cut for `rect`, returning both halves and the door in the cut.
fn split_rect(
    rect: Structure,
    outline_doors: &[Position],
    min_room_size: i32,
    rng: &mut StdRng,
) -> Option<(Structure, Structure, Position)> {
    let limit = 2 * min_room_size;
    // A cut needs at least one cell between its ends for the door.
    let wide = (rect.width > limit && rect.height >= 2).then_some(Axis::Vertical);
    let tall = (rect.height > limit && rect.width >= 2).then_some(Axis::Horizontal);
    let order = if rect.width >= rect.height {
        [wide, tall]
    } else {
        [tall, wide]
    };

    for axis in order.into_iter().flatten() {
        let span = match axis {
            Axis::Vertical => rect.width,
            Axis::Horizontal => rect.height,
        };
        let offsets: Vec<i32> = (min_room_size..=span - min_room_size)
            .filter(|offset| {
                let (start, end) = cut_ends(rect, axis, *offset);
                !outline_doors.contains(&start) && !outline_doors.contains(&end)
            })
            .collect();

        let Some(&offset) = offsets.choose(rng) else {
            continue;
        };

        return Some(match axis {
            Axis::Vertical => {
                let x = rect.x1 + offset;
                let door = Position::new(x, rng.gen_range(rect.y1 + 1..rect.y2()));
                (
                    Structure::new(rect.x1, rect.y1, offset, rect.height),
                    Structure::new(x, rect.y1, rect.width - offset, rect.height),
                    door,
                )
            }
            Axis::Horizontal => {
                let y = rect.y1 + offset;
                let door = Position::new(rng.gen_range(rect.x1 + 1..rect.x2()), y);
                (
                    Structure::new(rect.x1, rect.y1, rect.width, offset),
                    Structure::new(rect.x1, y, rect.width, rect.height - offset),
                    door,
                )
            }
        });
    }

    None
}

/// Where a cut at `offset` meets the rectangle's outline.
fn cut_ends(rect: Structure, axis: Axis, offset: i32) -> (Position, Position) {
    match axis {
        Axis::Vertical => (
            Position::new(rect.x1 + offset, rect.y1),
            Position::new(rect.x1 + offset, rect.y2()),
        ),
        Axis::Horizontal => (
            Position::new(rect.x1, rect.y1 + offset),
            Position::new(rect.x2(), rect.y1 + offset),
        ),
    }
}

/// Writes a door and reserves the floor on either side of it.
pub fn place_door(level: &mut Level, pos: Position) -> SprawlResult<()> {
    level.set_tile(pos, TileType::Door)?;
    for neighbor in pos.cardinal_adjacent_positions() {
        if level.get_tile(neighbor) == Some(TileType::Floor) {
            level.set_tile(neighbor, TileType::ReservedFloor)?;
        }
    }
    Ok(())
}

/// Puts one door in a straight section of `outline`.
///
/// Tries random edge cells first, then falls back to the first straight
/// wall cell in edge order. Returns `None` only when the outline has no
/// straight wall left at all.
pub fn place_exterior_door(
    level: &mut Level,
    outline: Structure,
    max_attempts: u32,
    rng: &mut StdRng,
) -> SprawlResult<Option<Position>> {
    let edges = outline.edges();
    let is_flat = |level: &Level, pos: Position| level.get_tile(pos).is_some_and(TileType::is_flat_wall);

    let mut chosen = None;
    for _ in 0..max_attempts {
        if let Some(&pos) = edges.choose(rng) {
            if is_flat(level, pos) {
                chosen = Some(pos);
                break;
            }
        }
    }

    if chosen.is_none() {
        warn!(
            "No exterior door spot after {} tries on {:?}, scanning",
            max_attempts,
            outline.as_tuple()
        );
        chosen = edges.iter().copied().find(|pos| is_flat(level, *pos));
    }

    if let Some(pos) = chosen {
        place_door(level, pos)?;
    }
    Ok(chosen)
}

/// Cuts windows into the straight walls of `outline`, half along the
/// horizontal edges and half along the vertical ones.
pub fn place_windows(
    level: &mut Level,
    outline: Structure,
    count: u32,
    rng: &mut StdRng,
) -> SprawlResult<usize> {
    let each = (count / 2) as usize;
    let mut placed = 0;

    for (edges, vertical) in [
        (outline.horizontal_edges(), false),
        (outline.vertical_edges(), true),
    ] {
        if edges.len() <= each {
            continue;
        }
        for pos in edges.choose_multiple(rng, each) {
            if level.get_tile(*pos).is_some_and(TileType::is_flat_wall) {
                level.set_tile(*pos, TileType::Window { vertical })?;
                placed += 1;
            }
        }
    }

    Ok(placed)
}

/// Builds one storey of a building on `level`.
///
/// The outline is floored and walled, subdivided into rooms whose walls
/// join the outline, then doors are cut. Street-level storeys also get an
/// exterior door; every storey gets windows.
pub fn construct_building(
    level: &mut Level,
    outline: Structure,
    config: &GenerationConfig,
    exterior_door: bool,
    rng: &mut StdRng,
) -> SprawlResult<Building> {
    for pos in outline.inner() {
        level.set_tile(pos, TileType::Floor)?;
    }
    resolve_walls(level, outline)?;

    let (mut rooms, doors) = subdivide(outline, config.min_room_size, rng)?;
    for room in &rooms {
        resolve_walls(level, room.bounds)?;
    }
    for door in &doors {
        place_door(level, *door)?;
    }

    let exterior = if exterior_door {
        place_exterior_door(level, outline, config.max_placement_attempts, rng)?
    } else {
        None
    };
    if let Some(pos) = exterior {
        for room in rooms.iter_mut().filter(|room| room.door.is_none()) {
            if room.bounds.side_of(pos).is_some() {
                room.set_door(pos)?;
            }
        }
    }

    let windows = place_windows(level, outline, config.windows_per_building, rng)?;
    debug!(
        "Building {:?} on level {}: {} rooms, {} doors, {} windows",
        outline.as_tuple(),
        level.id,
        rooms.len(),
        doors.len(),
        windows
    );

    Ok(Building {
        outline,
        level: level.id,
        rooms,
        doors,
        exterior_door: exterior,
    })
}
