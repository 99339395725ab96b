//! # Structures
//!
//! Axis-aligned rectangles with the derived coordinate sets every later pass
//! works from: corners, edges, interior and the rows just inside each wall.
//!
//! A structure at `(x1, y1)` of size `width x height` has its far corner at
//! `(x1 + width, y1 + height)`, so its walls enclose `width - 1` by
//! `height - 1` interior cells. Edges never include corners, and edges,
//! corners and interior together cover the whole footprint exactly once.

use crate::Position;
use serde::{Deserialize, Serialize};

/// One side of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Top,
    Right,
    Bottom,
    Left,
}

impl Side {
    pub fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }

    /// Next side clockwise.
    pub fn clockwise(self) -> Side {
        match self {
            Side::Top => Side::Right,
            Side::Right => Side::Bottom,
            Side::Bottom => Side::Left,
            Side::Left => Side::Top,
        }
    }

    /// Whether walls along this side run vertically.
    pub fn is_vertical(self) -> bool {
        matches!(self, Side::Left | Side::Right)
    }

    pub const ALL: [Side; 4] = [Side::Top, Side::Right, Side::Bottom, Side::Left];
}

/// One of the four corners of a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Immutable axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Structure {
    pub x1: i32,
    pub y1: i32,
    pub width: i32,
    pub height: i32,
}

impl Structure {
    /// Creates a structure. Width and height must both be at least 1.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprawl::{Position, Structure};
    ///
    /// let s = Structure::new(2, 3, 4, 5);
    /// assert_eq!(s.x2(), 6);
    /// assert_eq!(s.y2(), 8);
    /// assert_eq!(s.center(), Position::new(4, 5));
    /// ```
    pub fn new(x1: i32, y1: i32, width: i32, height: i32) -> Self {
        debug_assert!(width >= 1 && height >= 1, "degenerate structure {}x{}", width, height);
        Self {
            x1,
            y1,
            width,
            height,
        }
    }

    pub fn x2(&self) -> i32 {
        self.x1 + self.width
    }

    pub fn y2(&self) -> i32 {
        self.y1 + self.height
    }

    pub fn as_tuple(&self) -> (i32, i32, i32, i32) {
        (self.x1, self.y1, self.width, self.height)
    }

    /// Floor midpoint of the two corners.
    pub fn center(&self) -> Position {
        Position::new(
            (self.x1 + self.x2()).div_euclid(2),
            (self.y1 + self.y2()).div_euclid(2),
        )
    }

    pub fn corner(&self, corner: Corner) -> Position {
        match corner {
            Corner::TopLeft => Position::new(self.x1, self.y1),
            Corner::TopRight => Position::new(self.x2(), self.y1),
            Corner::BottomLeft => Position::new(self.x1, self.y2()),
            Corner::BottomRight => Position::new(self.x2(), self.y2()),
        }
    }

    pub fn corners(&self) -> [Position; 4] {
        [
            self.corner(Corner::TopLeft),
            self.corner(Corner::TopRight),
            self.corner(Corner::BottomLeft),
            self.corner(Corner::BottomRight),
        ]
    }

    /// Which corner `pos` is, if any.
    pub fn corner_at(&self, pos: Position) -> Option<Corner> {
        [
            Corner::TopLeft,
            Corner::TopRight,
            Corner::BottomLeft,
            Corner::BottomRight,
        ]
        .into_iter()
        .find(|corner| self.corner(*corner) == pos)
    }

    /// Left and right edges, excluding corners.
    pub fn vertical_edges(&self) -> Vec<Position> {
        let mut tiles = Vec::new();
        for y in (self.y1 + 1)..self.y2() {
            tiles.push(Position::new(self.x1, y));
            tiles.push(Position::new(self.x2(), y));
        }
        tiles
    }

    /// Top and bottom edges, excluding corners.
    pub fn horizontal_edges(&self) -> Vec<Position> {
        let mut tiles = Vec::new();
        for x in (self.x1 + 1)..self.x2() {
            tiles.push(Position::new(x, self.y1));
            tiles.push(Position::new(x, self.y2()));
        }
        tiles
    }

    pub fn edges(&self) -> Vec<Position> {
        let mut tiles = self.horizontal_edges();
        tiles.extend(self.vertical_edges());
        tiles
    }

    pub fn edges_and_corners(&self) -> Vec<Position> {
        let mut tiles = self.edges();
        tiles.extend(self.corners());
        tiles
    }

    /// Cells along one side, excluding the corners at either end.
    pub fn edge(&self, side: Side) -> Vec<Position> {
        match side {
            Side::Top => ((self.x1 + 1)..self.x2())
                .map(|x| Position::new(x, self.y1))
                .collect(),
            Side::Bottom => ((self.x1 + 1)..self.x2())
                .map(|x| Position::new(x, self.y2()))
                .collect(),
            Side::Left => ((self.y1 + 1)..self.y2())
                .map(|y| Position::new(self.x1, y))
                .collect(),
            Side::Right => ((self.y1 + 1)..self.y2())
                .map(|y| Position::new(self.x2(), y))
                .collect(),
        }
    }

    /// The side whose non-corner edge contains `pos`.
    pub fn side_of(&self, pos: Position) -> Option<Side> {
        let inside_x = pos.x > self.x1 && pos.x < self.x2();
        let inside_y = pos.y > self.y1 && pos.y < self.y2();

        if inside_x && pos.y == self.y1 {
            Some(Side::Top)
        } else if inside_x && pos.y == self.y2() {
            Some(Side::Bottom)
        } else if inside_y && pos.x == self.x1 {
            Some(Side::Left)
        } else if inside_y && pos.x == self.x2() {
            Some(Side::Right)
        } else {
            None
        }
    }

    pub fn is_vertical_edge(&self, pos: Position) -> bool {
        self.side_of(pos).is_some_and(Side::is_vertical)
    }

    pub fn is_horizontal_edge(&self, pos: Position) -> bool {
        self.side_of(pos).is_some_and(|side| !side.is_vertical())
    }

    /// Interior cells, column by column.
    pub fn inner(&self) -> Vec<Position> {
        let mut tiles = Vec::new();
        for x in (self.x1 + 1)..self.x2() {
            for y in (self.y1 + 1)..self.y2() {
                tiles.push(Position::new(x, y));
            }
        }
        tiles
    }

    pub fn is_inner(&self, pos: Position) -> bool {
        pos.x > self.x1 && pos.x < self.x2() && pos.y > self.y1 && pos.y < self.y2()
    }

    /// Every cell of the footprint, walls included.
    pub fn area(&self) -> Vec<Position> {
        let mut tiles = Vec::new();
        for x in self.x1..=self.x2() {
            for y in self.y1..=self.y2() {
                tiles.push(Position::new(x, y));
            }
        }
        tiles
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x >= self.x1 && pos.x <= self.x2() && pos.y >= self.y1 && pos.y <= self.y2()
    }

    /// True if the two footprints share any cell.
    pub fn intersects(&self, other: &Structure) -> bool {
        self.x1 <= other.x2() && self.x2() >= other.x1 && self.y1 <= other.y2() && self.y2() >= other.y1
    }

    /// Coordinates along the boundary line two rectangles share, inclusive of
    /// the ends. Empty when they do not touch edge to edge.
    ///
    /// # Examples
    ///
    /// ```
    /// use sprawl::Structure;
    ///
    /// let left = Structure::new(0, 0, 4, 4);
    /// let right = Structure::new(4, 2, 4, 4);
    /// assert_eq!(left.abuts(&right).len(), 3);
    /// ```
    pub fn abuts(&self, other: &Structure) -> Vec<Position> {
        let mut coords = Vec::new();

        let y_start = self.y1.max(other.y1);
        let y_end = self.y2().min(other.y2());
        if y_start <= y_end {
            if self.x2() == other.x1 {
                coords.extend((y_start..=y_end).map(|y| Position::new(self.x2(), y)));
            }
            if self.x1 == other.x2() {
                coords.extend((y_start..=y_end).map(|y| Position::new(self.x1, y)));
            }
        }

        let x_start = self.x1.max(other.x1);
        let x_end = self.x2().min(other.x2());
        if x_start <= x_end {
            if self.y2() == other.y1 {
                coords.extend((x_start..=x_end).map(|x| Position::new(x, self.y2())));
            }
            if self.y1 == other.y2() {
                coords.extend((x_start..=x_end).map(|x| Position::new(x, self.y1)));
            }
        }

        coords
    }

    /// The row or column of interior cells directly inside one wall.
    pub fn inside_wall(&self, side: Side) -> Vec<Position> {
        match side {
            Side::Left => ((self.y1 + 1)..self.y2())
                .map(|y| Position::new(self.x1 + 1, y))
                .collect(),
            Side::Right => ((self.y1 + 1)..self.y2())
                .map(|y| Position::new(self.x2() - 1, y))
                .collect(),
            Side::Top => ((self.x1 + 1)..self.x2())
                .map(|x| Position::new(x, self.y1 + 1))
                .collect(),
            Side::Bottom => ((self.x1 + 1)..self.x2())
                .map(|x| Position::new(x, self.y2() - 1))
                .collect(),
        }
    }

    /// Interior cells touching any wall, each listed once.
    pub fn along_inside_walls(&self) -> Vec<Position> {
        let mut spots = Vec::new();
        for side in Side::ALL {
            for pos in self.inside_wall(side) {
                if !spots.contains(&pos) {
                    spots.push(pos);
                }
            }
        }
        spots
    }

    /// Interior cells that touch no wall.
    pub fn inner_away_from_walls(&self) -> Vec<Position> {
        let mut spots = Vec::new();
        for x in (self.x1 + 2)..(self.x2() - 1) {
            for y in (self.y1 + 2)..(self.y2() - 1) {
                spots.push(Position::new(x, y));
            }
        }
        spots
    }

    /// Shrinks by `amount` on every side, if anything is left.
    pub fn shrink(&self, amount: i32) -> Option<Structure> {
        let width = self.width - 2 * amount;
        let height = self.height - 2 * amount;
        if width < 1 || height < 1 {
            return None;
        }
        Some(Structure::new(self.x1 + amount, self.y1 + amount, width, height))
    }
}
