//! # Wall Resolution
//!
//! Writes the outline of a structure as wall tiles, joining it cleanly with
//! walls already on the grid.
//!
//! Every wall shape is described by the arms it extends along (see
//! [`crate::WallArms`]). Placing a wall over an existing wall keeps the union of both
//! sets of arms, so two rooms sharing a corner end up with a tee or cross
//! instead of one corner glyph drawn over another. Because the union does not
//! care which wall came first, structures can be resolved in any order.

use crate::generation::{Corner, Structure};
use crate::{Level, Position, SprawlResult, TileType, WallKind};
use log::trace;

/// Wall shape drawn at each corner of a lone rectangle.
pub fn corner_kind(corner: Corner) -> WallKind {
    match corner {
        Corner::TopLeft => WallKind::TopLeft,
        Corner::TopRight => WallKind::TopRight,
        Corner::BottomLeft => WallKind::BottomLeft,
        Corner::BottomRight => WallKind::BottomRight,
    }
}

/// Resolves the wall shape for a cell holding `existing` when `placed` is
/// drawn over it.
///
/// Non-wall tiles are simply replaced.
///
/// # Examples
///
/// ```
/// use sprawl::generation::merge;
/// use sprawl::{TileType, WallKind};
///
/// let existing = TileType::Wall(WallKind::BottomLeft);
/// assert_eq!(merge(existing, WallKind::TopLeft), WallKind::TeeRight);
/// assert_eq!(merge(TileType::Floor, WallKind::TopLeft), WallKind::TopLeft);
/// ```
pub fn merge(existing: TileType, placed: WallKind) -> WallKind {
    match existing {
        TileType::Wall(kind) => WallKind::from_arms(kind.arms() | placed.arms()),
        _ => placed,
    }
}

/// Resolves the tile for `corner` of a structure drawn over `existing`.
pub fn resolve_corner(existing: TileType, corner: Corner) -> WallKind {
    merge(existing, corner_kind(corner))
}

/// Wall shape a structure wants at `pos`, if `pos` is on its outline.
fn outline_kind(structure: &Structure, pos: Position) -> Option<WallKind> {
    if let Some(corner) = structure.corner_at(pos) {
        return Some(corner_kind(corner));
    }
    structure.side_of(pos).map(|side| {
        if side.is_vertical() {
            WallKind::Vertical
        } else {
            WallKind::Horizontal
        }
    })
}

/// Draws the outline of `structure` into `level`.
///
/// Straight edges become vertical or horizontal walls and corners become
/// corner tiles, each merged with any wall already in the cell.
pub fn resolve_walls(level: &mut Level, structure: Structure) -> SprawlResult<()> {
    for pos in structure.edges_and_corners() {
        let Some(placed) = outline_kind(&structure, pos) else {
            continue;
        };
        let existing = level.get_tile(pos).unwrap_or(TileType::Cement);
        let resolved = merge(existing, placed);
        if resolved != placed {
            trace!("Wall at ({}, {}) joined into {:?}", pos.x, pos.y, resolved);
        }
        level.set_tile(pos, TileType::Wall(resolved))?;
    }
    Ok(())
}
